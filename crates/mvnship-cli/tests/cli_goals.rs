use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn mvnship_cmd() -> Command {
    Command::cargo_bin("mvnship").unwrap()
}

fn project(dir: &Path, version: &str, config: &str) {
    fs::write(
        dir.join("package.json"),
        format!(r#"{{ "name": "site", "version": "{version}" }}"#),
    )
    .unwrap();
    fs::write(dir.join("Mvnship.toml"), config).unwrap();
    fs::write(dir.join("index.html"), "<html></html>").unwrap();
}

const CONFIG: &str = r#"
[options]
groupId = "com.example"
url = "https://repo.example.com/releases"

[targets.docs]
goal = "package"
classifier = "sources"
"#;

#[test]
fn test_package_creates_zip() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .arg("package")
        .assert()
        .success()
        .stderr(predicate::str::contains("Packaged"));

    let archive = tmp.path().join("site-1.0.0.zip");
    let zip = zip::ZipArchive::new(fs::File::open(archive).unwrap()).unwrap();
    let names: Vec<&str> = zip.file_names().collect();
    assert!(names.contains(&"site-1.0.0/index.html"));
    assert!(!names.iter().any(|n| n.ends_with("Mvnship.toml")));
}

#[test]
fn test_run_named_target_uses_its_goal() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .args(["run", "docs"])
        .assert()
        .success();

    assert!(tmp.path().join("site-1.0.0-sources.zip").is_file());
}

#[test]
fn test_missing_group_id_fails() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0", "");

    mvnship_cmd()
        .current_dir(tmp.path())
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"groupId\""));

    assert!(!tmp.path().join("site-1.0.0.zip").exists());
}

#[test]
fn test_release_dry_run_shows_versions() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0-SNAPSHOT", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .args(["release", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npm version 1.0.0 -m %s"))
        .stdout(predicate::str::contains("npm version 1.1.0-SNAPSHOT -m %s"))
        .stdout(predicate::str::contains("-Durl=https://repo.example.com/releases"));

    assert!(!tmp.path().join("site-1.0.0.zip").exists());
}

#[test]
fn test_release_patch_dry_run() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0-SNAPSHOT", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .args(["release", "1.0.1", "patch", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npm version 1.0.2-SNAPSHOT -m %s"));
}

#[test]
fn test_plan_prints_coordinates() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "2.0.0", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .args(["plan", "deploy", "--set", "type=war"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example:site:zip:2.0.0"))
        .stdout(predicate::str::contains("site-2.0.0.war"))
        .stdout(predicate::str::contains("-Dpackaging=war"));
}

#[test]
fn test_plan_debug_shows_maven_debug_flags() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "2.0.0", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .args(["plan", "deploy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-e -X").not());

    mvnship_cmd()
        .current_dir(tmp.path())
        .args(["plan", "deploy", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-e -X"));
}

#[test]
fn test_targets_lists_configured_targets() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("docs"))
        .stdout(predicate::str::contains("package"));
}

#[test]
fn test_unknown_override_key_fails() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0", CONFIG);

    mvnship_cmd()
        .current_dir(tmp.path())
        .args(["package", "--set", "colour=blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown option 'colour'"));
}

#[cfg(unix)]
#[test]
fn test_deploy_invokes_mvn() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0", CONFIG);

    let log = tmp.path().join("mvn-args.log");
    let stub = tmp.path().join("fake-mvn.sh");
    fs::write(
        &stub,
        format!("#!/bin/sh\necho \"$@\" > '{}'\n", log.display()),
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    mvnship_cmd()
        .current_dir(tmp.path())
        .env("MVNSHIP_MVN", &stub)
        .args(["deploy", "--set", "unsecure=true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Deployed"));

    let args = fs::read_to_string(log).unwrap();
    assert!(args.starts_with("deploy:deploy-file -Dfile=site-1.0.0.zip"));
    assert!(args.contains("-Dmaven.wagon.http.ssl.insecure=true"));
    assert!(args.contains("-Durl=https://repo.example.com/releases"));
}

#[cfg(unix)]
#[test]
fn test_failing_mvn_reports_error() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "1.0.0", CONFIG);

    let stub = tmp.path().join("fake-mvn.sh");
    fs::write(&stub, "#!/bin/sh\necho 'Return code is: 401' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    mvnship_cmd()
        .current_dir(tmp.path())
        .env("MVNSHIP_MVN", &stub)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to deploy to maven"))
        .stderr(predicate::str::contains("Return code is: 401"));
}
