//! Artifact coordinates and the archive file name derived from them.

use std::fmt;

/// Classifiers whose artifacts are always zip files, whatever the packaging.
const ZIP_CLASSIFIERS: [&str; 2] = ["javadoc", "sources"];

/// Packaging used when neither `type` nor `packaging` says otherwise.
pub const DEFAULT_EXTENSION: &str = "zip";

/// The group/artifact/version/classifier/packaging tuple identifying a
/// published file in the target repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
    pub packaging: String,
    pub artifact_type: Option<String>,
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.packaging, self.version
        )?;
        if let Some(ref c) = self.classifier {
            write!(f, ":{c}")?;
        }
        Ok(())
    }
}

/// A computed archive file name: `baseName.extension`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFileName {
    pub base_name: String,
    pub extension: String,
    pub full_name: String,
}

impl ResolvedFileName {
    fn new(base_name: String, extension: String) -> Self {
        let full_name = format!("{base_name}.{extension}");
        Self {
            base_name,
            extension,
            full_name,
        }
    }
}

/// `artifactId-version[-classifier]`.
pub fn base_name(artifact_id: &str, version: &str, classifier: Option<&str>) -> String {
    match classifier.filter(|c| !c.is_empty()) {
        Some(c) => format!("{artifact_id}-{version}-{c}"),
        None => format!("{artifact_id}-{version}"),
    }
}

/// Pick the file extension. First match wins:
/// a javadoc/sources classifier forces `zip`, then an explicit `type`,
/// then `packaging`, then `zip`.
pub fn resolve_extension(
    classifier: Option<&str>,
    artifact_type: Option<&str>,
    packaging: Option<&str>,
) -> String {
    if classifier.is_some_and(|c| ZIP_CLASSIFIERS.contains(&c)) {
        return DEFAULT_EXTENSION.to_string();
    }
    artifact_type
        .filter(|t| !t.is_empty())
        .or(packaging.filter(|p| !p.is_empty()))
        .unwrap_or(DEFAULT_EXTENSION)
        .to_string()
}

/// Compute the canonical archive name for a set of coordinates. Never fails.
pub fn resolve_file_name(coords: &ArtifactCoordinates) -> ResolvedFileName {
    let classifier = coords.classifier.as_deref();
    ResolvedFileName::new(
        base_name(&coords.artifact_id, &coords.version, classifier),
        resolve_extension(
            classifier,
            coords.artifact_type.as_deref(),
            Some(coords.packaging.as_str()),
        ),
    )
}
