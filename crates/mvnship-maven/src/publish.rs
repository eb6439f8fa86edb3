//! Argument assembly for `mvn install:install-file` and `mvn deploy:deploy-file`.
//!
//! Argument order is fixed: goal, `file`, `groupId`, `artifactId`,
//! `packaging`, `version`, then the conditional flags.

use std::path::{Path, PathBuf};

use mvnship_core::naming::ArtifactCoordinates;
use mvnship_core::options::ResolvedOptions;
use mvnship_util::errors::MvnshipError;
use mvnship_util::process::CommandBuilder;

/// Default repository-manager executable.
pub const MVN: &str = "mvn";

/// Flags that turn off TLS certificate and host checks for deploys.
pub const INSECURE_TLS_FLAGS: [&str; 2] = [
    "-Dmaven.wagon.http.ssl.insecure=true",
    "-Dmaven.wagon.http.ssl.allowall=true",
];

/// Verbose-errors and extended-diagnostics flags.
pub const DEBUG_FLAGS: [&str; 2] = ["-e", "-X"];

/// Types that are published under their own packaging instead of the
/// configured one.
const COERCED_TYPES: [&str; 2] = ["war", "jar"];

/// Which Maven plugin goal to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishVerb {
    Install,
    Deploy,
}

impl PublishVerb {
    pub fn plugin_goal(&self) -> &'static str {
        match self {
            PublishVerb::Install => "install:install-file",
            PublishVerb::Deploy => "deploy:deploy-file",
        }
    }
}

/// The packaging passed to Maven: a `war` or `jar` type overrides the
/// configured packaging.
pub fn effective_packaging(coords: &ArtifactCoordinates) -> &str {
    match coords.artifact_type.as_deref() {
        Some(t) if COERCED_TYPES.contains(&t) => t,
        _ => &coords.packaging,
    }
}

/// Build the literal argument vector (without the executable).
pub fn build_publish_args(verb: PublishVerb, opts: &ResolvedOptions) -> Vec<String> {
    let coords = &opts.coordinates;
    let mut args = vec![
        verb.plugin_goal().to_string(),
        format!("-Dfile={}", opts.file),
        format!("-DgroupId={}", coords.group_id),
        format!("-DartifactId={}", coords.artifact_id),
        format!("-Dpackaging={}", effective_packaging(coords)),
        format!("-Dversion={}", coords.version),
    ];

    if verb == PublishVerb::Deploy && opts.unsecure {
        args.extend(INSECURE_TLS_FLAGS.iter().map(|f| f.to_string()));
    }
    if let Some(ref classifier) = coords.classifier {
        args.push(format!("-Dclassifier={classifier}"));
    }
    if opts.unique_version {
        args.push("-DuniqueVersion=true".to_string());
    }
    if verb == PublishVerb::Deploy {
        if let Some(ref url) = opts.url {
            args.push(format!("-Durl={url}"));
        }
    }
    if let Some(ref repository_id) = opts.repository_id {
        args.push(format!("-DrepositoryId={repository_id}"));
    }
    // Maven misparses `--settings <path>` here; the value must be attached.
    if let Some(ref settings) = opts.settings_xml {
        args.push(format!("--settings={settings}"));
    }
    if opts.debug {
        args.extend(DEBUG_FLAGS.iter().map(|f| f.to_string()));
    }
    args
}

/// The full `mvn` invocation for `verb`, run from `project_dir`.
pub fn publish_command(
    program: &str,
    verb: PublishVerb,
    opts: &ResolvedOptions,
    project_dir: &Path,
) -> CommandBuilder {
    CommandBuilder::new(program)
        .args(build_publish_args(verb, opts))
        .cwd(project_dir)
}

/// Rename an archive written under its format's native extension (for
/// example `app-1.0.0.zip`) to the name the publish command references
/// (`app-1.0.0.war`). A no-op when the names already agree.
///
/// Rename failures are returned unchanged as [`MvnshipError::Io`].
pub fn normalize_archive(produced: &Path, expected: &Path) -> Result<PathBuf, MvnshipError> {
    if produced == expected {
        return Ok(expected.to_path_buf());
    }
    tracing::debug!(
        "renaming {} to {}",
        produced.display(),
        expected.display()
    );
    std::fs::rename(produced, expected)?;
    Ok(expected.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(packaging: &str, ty: Option<&str>) -> ArtifactCoordinates {
        ArtifactCoordinates {
            group_id: "g".into(),
            artifact_id: "a".into(),
            version: "1.0.0".into(),
            classifier: None,
            packaging: packaging.into(),
            artifact_type: ty.map(Into::into),
        }
    }

    #[test]
    fn war_and_jar_types_override_packaging() {
        assert_eq!(effective_packaging(&coords("zip", Some("war"))), "war");
        assert_eq!(effective_packaging(&coords("zip", Some("jar"))), "jar");
    }

    #[test]
    fn other_types_keep_packaging() {
        assert_eq!(effective_packaging(&coords("zip", Some("tgz"))), "zip");
        assert_eq!(effective_packaging(&coords("tar", None)), "tar");
    }

    #[test]
    fn plugin_goals() {
        assert_eq!(PublishVerb::Install.plugin_goal(), "install:install-file");
        assert_eq!(PublishVerb::Deploy.plugin_goal(), "deploy:deploy-file");
    }
}
