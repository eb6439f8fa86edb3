//! Maven repository layout, used to report where a deployed artifact lands.

use mvnship_core::naming::ArtifactCoordinates;

/// Standard Maven layout path for a given coordinate.
///
/// `com.example:my-app:1.0.0` becomes `com/example/my-app/1.0.0`
pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
    format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
}

/// File name Maven stores an artifact under:
/// `artifactId-version[-classifier].extension`.
pub fn repository_file_name(coords: &ArtifactCoordinates, extension: &str) -> String {
    match coords.classifier {
        Some(ref c) => format!("{}-{}-{c}.{extension}", coords.artifact_id, coords.version),
        None => format!("{}-{}.{extension}", coords.artifact_id, coords.version),
    }
}

/// Full URL of an artifact within the repository at `base_url`.
pub fn artifact_url(base_url: &str, coords: &ArtifactCoordinates, extension: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        coordinate_path(&coords.group_id, &coords.artifact_id, &coords.version),
        repository_file_name(coords, extension)
    )
}
