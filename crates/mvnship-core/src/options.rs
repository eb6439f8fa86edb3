//! Option resolution: layered raw options plus manifest defaults become one
//! fully-resolved option set per goal.

use mvnship_util::errors::MvnshipError;
use mvnship_util::fs::join_slash;

use crate::config::{FileSpec, RawOptions};
use crate::goal::Goal;
use crate::manifest::PackageManifest;
use crate::naming::{self, ArtifactCoordinates, ResolvedFileName};

/// Manifest read for artifact defaults and bumped by releases.
pub const DEFAULT_VERSION_FILE: &str = "package.json";

/// Commit message template; `%s` is replaced with the bumped version.
pub const DEFAULT_COMMIT_PREFIX: &str = "%s";

/// Packaging used when neither the options nor the manifest set one.
pub const DEFAULT_PACKAGING: &str = "zip";

/// Everything a goal's steps need, resolved and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub goal: Goal,
    pub coordinates: ArtifactCoordinates,
    pub file_name: ResolvedFileName,
    /// The archive path relative to the project directory: the explicit
    /// `file` option, else `file_name.full_name`.
    pub file: String,
    pub url: Option<String>,
    pub repository_id: Option<String>,
    pub unique_version: bool,
    pub settings_xml: Option<String>,
    pub debug: bool,
    pub unsecure: bool,
    /// Folder every archive entry is nested under; `None` when disabled.
    pub dest_folder: Option<String>,
    pub version_file: String,
    pub commit_prefix: String,
    pub git_push: bool,
    pub git_push_tag: bool,
    /// File mappings the archive step consumes, after folder injection.
    pub files: Vec<FileSpec>,
}

/// The file list used when a target configures none.
pub fn default_files() -> Vec<FileSpec> {
    vec![FileSpec::new(["**", "!node_modules/**", "!.git/**"])]
}

/// Fail fast when required options are missing, naming all of them.
///
/// `groupId` is always required and `url` is required for goals that talk
/// to a remote repository. `artifactId` and `version` are required only
/// when the manifest cannot supply them either.
pub fn require_options(
    goal: Goal,
    raw: &RawOptions,
    manifest: &PackageManifest,
) -> Result<(), MvnshipError> {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());

    let mut missing = Vec::new();
    if !present(&raw.group_id) {
        missing.push("groupId");
    }
    if goal.requires_url() && !present(&raw.url) {
        missing.push("url");
    }
    if !present(&raw.artifact_id) && !present(&manifest.name) {
        missing.push("artifactId");
    }
    if !present(&raw.version) && !present(&manifest.version) {
        missing.push("version");
    }

    if missing.is_empty() {
        tracing::debug!("all required options present for goal {goal}");
        Ok(())
    } else {
        Err(MvnshipError::MissingOptions {
            keys: missing.into_iter().map(str::to_string).collect(),
        })
    }
}

/// Resolve `raw` against `manifest` for `goal`.
///
/// Pure: the same inputs always produce the same output, and neither input
/// is modified.
pub fn resolve(
    goal: Goal,
    raw: &RawOptions,
    manifest: &PackageManifest,
) -> Result<ResolvedOptions, MvnshipError> {
    require_options(goal, raw, manifest)?;

    let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
    let or_manifest = |v: &Option<String>, m: &Option<String>| {
        non_empty(v).or_else(|| non_empty(m)).unwrap_or_default()
    };

    let coordinates = ArtifactCoordinates {
        group_id: or_manifest(&raw.group_id, &None),
        artifact_id: or_manifest(&raw.artifact_id, &manifest.name),
        version: or_manifest(&raw.version, &manifest.version),
        classifier: non_empty(&raw.classifier),
        packaging: non_empty(&raw.packaging)
            .or_else(|| non_empty(&manifest.packaging))
            .unwrap_or_else(|| DEFAULT_PACKAGING.to_string()),
        artifact_type: non_empty(&raw.artifact_type),
    };

    let file_name = naming::resolve_file_name(&coordinates);
    let file = non_empty(&raw.file).unwrap_or_else(|| file_name.full_name.clone());

    let dest_folder = if raw.inject_dest_folder.unwrap_or(true) {
        Some(non_empty(&raw.dest_folder).unwrap_or_else(|| file_name.base_name.clone()))
    } else {
        None
    };

    let files = raw.files.clone().unwrap_or_else(default_files);
    let files = match dest_folder {
        Some(ref folder) => inject_dest_folder(&files, folder),
        None => files,
    };

    Ok(ResolvedOptions {
        goal,
        coordinates,
        file_name,
        file,
        url: non_empty(&raw.url),
        repository_id: non_empty(&raw.repository_id),
        unique_version: raw.unique_version.as_ref().is_some_and(|f| f.is_true()),
        settings_xml: non_empty(&raw.settings_xml),
        debug: raw.debug.unwrap_or(false),
        unsecure: raw.unsecure.unwrap_or(false),
        dest_folder,
        version_file: non_empty(&raw.version_file)
            .unwrap_or_else(|| DEFAULT_VERSION_FILE.to_string()),
        commit_prefix: non_empty(&raw.commit_prefix)
            .unwrap_or_else(|| DEFAULT_COMMIT_PREFIX.to_string()),
        git_push: raw.git_push.unwrap_or(false),
        git_push_tag: raw.git_push_tag.unwrap_or(false),
        files,
    })
}

/// Nest every mapping's destination under `folder`.
pub fn inject_dest_folder(files: &[FileSpec], folder: &str) -> Vec<FileSpec> {
    files
        .iter()
        .map(|f| FileSpec {
            dest: Some(join_slash(&[folder, f.dest.as_deref().unwrap_or("")])),
            ..f.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injection_keeps_existing_dest_as_subfolder() {
        let mut spec = FileSpec::new(["dist/**"]);
        spec.dest = Some("web".into());
        let out = inject_dest_folder(&[spec], "app-1.0.0");
        assert_eq!(out[0].dest.as_deref(), Some("app-1.0.0/web"));
        assert_eq!(out[0].src, vec!["dist/**"]);
    }

    #[test]
    fn default_files_exclude_node_modules() {
        let files = default_files();
        assert!(files[0].src.iter().any(|s| s == "!node_modules/**"));
    }
}
