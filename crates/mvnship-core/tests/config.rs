use mvnship_core::config::{ConfigFile, FlagValue, RawOptions, CONFIG_FILE};
use tempfile::TempDir;

const FULL_TOML: &str = r#"
[options]
groupId = "test.project"
type = "war"
uniqueVersion = "true"

[targets.deploy]
url = "file://repo"
files = [{ src = ["**", "!node_modules/**"] }]

[targets.docs]
goal = "install"
classifier = "javadoc"
injectDestFolder = false
gitpush = true
gitpushtag = true
"#;

#[test]
fn test_parse_empty_config() {
    let config = ConfigFile::parse_toml("").unwrap();
    assert_eq!(config, ConfigFile::default());
}

#[test]
fn test_parse_shared_and_target_tables() {
    let config = ConfigFile::parse_toml(FULL_TOML).unwrap();
    assert_eq!(config.options.group_id.as_deref(), Some("test.project"));
    assert_eq!(config.options.artifact_type.as_deref(), Some("war"));
    assert_eq!(
        config.options.unique_version,
        Some(FlagValue::Text("true".into()))
    );

    let names: Vec<&str> = config.target_names().collect();
    assert_eq!(names, vec!["deploy", "docs"]);

    let docs = &config.targets["docs"];
    assert_eq!(docs.goal.as_deref(), Some("install"));
    assert_eq!(docs.inject_dest_folder, Some(false));
    assert_eq!(docs.git_push, Some(true));
    assert_eq!(docs.git_push_tag, Some(true));
}

#[test]
fn test_layered_target_overrides_shared() {
    let config = ConfigFile::parse_toml(FULL_TOML).unwrap();
    let deploy = config.layered("deploy");
    assert_eq!(deploy.group_id.as_deref(), Some("test.project"));
    assert_eq!(deploy.url.as_deref(), Some("file://repo"));
    assert_eq!(deploy.files.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_layered_unknown_target_uses_shared_only() {
    let config = ConfigFile::parse_toml(FULL_TOML).unwrap();
    let layered = config.layered("release");
    assert_eq!(layered, config.options);
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = ConfigFile::parse_toml("[options]\ngroupid = \"x\"\n").unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {err}");
}

#[test]
fn test_unique_version_accepts_boolean() {
    let config = ConfigFile::parse_toml("[options]\nuniqueVersion = true\n").unwrap();
    assert!(config.options.unique_version.unwrap().is_true());
}

#[test]
fn test_flag_value_is_exact() {
    assert!(FlagValue::Text("true".into()).is_true());
    assert!(!FlagValue::Text("TRUE".into()).is_true());
    assert!(!FlagValue::Text("yes".into()).is_true());
    assert!(!FlagValue::Bool(false).is_true());
}

#[test]
fn test_overlay_prefers_later_layer() {
    let base = RawOptions {
        group_id: Some("a".into()),
        url: Some("file://base".into()),
        ..Default::default()
    };
    let over = RawOptions {
        url: Some("file://over".into()),
        ..Default::default()
    };
    let merged = base.overlay(&over);
    assert_eq!(merged.group_id.as_deref(), Some("a"));
    assert_eq!(merged.url.as_deref(), Some("file://over"));
}

#[test]
fn test_set_pair_overrides() {
    let mut raw = RawOptions::default();
    raw.set_pair("groupId=com.example").unwrap();
    raw.set_pair("unsecure=true").unwrap();
    raw.set_pair("commitPrefix=release: %s").unwrap();
    raw.set_pair("url=https://host/repo?a=b").unwrap();
    assert_eq!(raw.group_id.as_deref(), Some("com.example"));
    assert_eq!(raw.unsecure, Some(true));
    assert_eq!(raw.commit_prefix.as_deref(), Some("release: %s"));
    assert_eq!(raw.url.as_deref(), Some("https://host/repo?a=b"));
}

#[test]
fn test_set_rejects_unknown_and_malformed() {
    let mut raw = RawOptions::default();
    assert!(raw.set_pair("nope=1").is_err());
    assert!(raw.set_pair("groupId").is_err());
    assert!(raw.set_pair("debug=yes").is_err());
    assert!(raw.set_pair("files=**").is_err());
}

#[test]
fn test_every_documented_key_is_settable() {
    for key in RawOptions::KEYS {
        let mut raw = RawOptions::default();
        let value = match *key {
            "debug" | "unsecure" | "injectDestFolder" | "gitpush" | "gitpushtag" => "true",
            _ => "x",
        };
        raw.set(key, value).unwrap_or_else(|e| panic!("{key}: {e}"));
        assert_ne!(raw, RawOptions::default(), "{key} had no effect");
    }
}

#[test]
fn test_from_path_interpolates_env_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(".mvnship.env"),
        "# secrets\nREPO_URL=https://nexus.example.com/releases\n",
    )
    .unwrap();
    std::fs::write(
        tmp.path().join(CONFIG_FILE),
        "[options]\ngroupId = \"g\"\nurl = \"${env:REPO_URL}\"\n",
    )
    .unwrap();

    let config = ConfigFile::from_path(&tmp.path().join(CONFIG_FILE)).unwrap();
    assert_eq!(
        config.options.url.as_deref(),
        Some("https://nexus.example.com/releases")
    );
}

#[test]
fn test_from_path_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(ConfigFile::from_path(&tmp.path().join(CONFIG_FILE)).is_err());
}
