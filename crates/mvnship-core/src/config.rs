//! The `Mvnship.toml` configuration file and its layered option tables.
//!
//! Options are declared once in `[options]` (shared by every target) and
//! per target in `[targets.<name>]`. Resolution order, later wins per key:
//! `[options]` → `[targets.<name>]` → `--set key=value` overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use mvnship_util::errors::MvnshipError;

use crate::properties;

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "Mvnship.toml";

/// The parsed representation of an `Mvnship.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub options: RawOptions,

    #[serde(default)]
    pub targets: BTreeMap<String, RawOptions>,
}

/// One option table. Every recognised key is listed here; anything else is
/// rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawOptions {
    pub goal: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    #[serde(rename = "type")]
    pub artifact_type: Option<String>,
    pub classifier: Option<String>,
    pub file: Option<String>,
    pub url: Option<String>,
    pub repository_id: Option<String>,
    pub unique_version: Option<FlagValue>,
    pub settings_xml: Option<String>,
    pub debug: Option<bool>,
    pub unsecure: Option<bool>,
    pub inject_dest_folder: Option<bool>,
    pub dest_folder: Option<String>,
    pub version_file: Option<String>,
    pub mode: Option<String>,
    pub commit_prefix: Option<String>,
    #[serde(rename = "gitpush")]
    pub git_push: Option<bool>,
    #[serde(rename = "gitpushtag")]
    pub git_push_tag: Option<bool>,
    pub files: Option<Vec<FileSpec>>,
}

/// A value that may be written as a TOML string or boolean.
///
/// `uniqueVersion` historically arrives as a string from the command line,
/// so both `"true"` and `true` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    /// True only for `true` or the exact string `"true"`.
    pub fn is_true(&self) -> bool {
        match self {
            FlagValue::Bool(b) => *b,
            FlagValue::Text(s) => s == "true",
        }
    }
}

/// A file mapping: glob patterns relative to `cwd`, placed under `dest`
/// inside the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    pub src: Vec<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub dest: Option<String>,
}

impl FileSpec {
    pub fn new<S: Into<String>>(src: impl IntoIterator<Item = S>) -> Self {
        Self {
            src: src.into_iter().map(Into::into).collect(),
            cwd: None,
            dest: None,
        }
    }
}

impl ConfigFile {
    /// Load `Mvnship.toml`, resolving `${env:VAR}` references from
    /// `.mvnship.env` next to it and the process environment.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MvnshipError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars = properties::load_env_file(&dir.join(properties::ENV_FILE))?;
        let resolved = properties::interpolate(&content, &env_vars);

        Self::parse_toml(&resolved)
    }

    /// Parse an `Mvnship.toml` from a string (no interpolation).
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            MvnshipError::Config {
                message: format!("Failed to parse {CONFIG_FILE}: {e}"),
            }
            .into()
        })
    }

    /// Shared options overlaid with the named target's table, if any.
    pub fn layered(&self, target: &str) -> RawOptions {
        match self.targets.get(target) {
            Some(t) => self.options.overlay(t),
            None => self.options.clone(),
        }
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}

impl RawOptions {
    /// Keys accepted by [`RawOptions::set`].
    pub const KEYS: &'static [&'static str] = &[
        "goal",
        "groupId",
        "artifactId",
        "version",
        "packaging",
        "type",
        "classifier",
        "file",
        "url",
        "repositoryId",
        "uniqueVersion",
        "settingsXml",
        "debug",
        "unsecure",
        "injectDestFolder",
        "destFolder",
        "versionFile",
        "mode",
        "commitPrefix",
        "gitpush",
        "gitpushtag",
    ];

    /// Return `self` with every key present in `over` replaced.
    pub fn overlay(&self, over: &RawOptions) -> RawOptions {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }
        RawOptions {
            goal: pick(&self.goal, &over.goal),
            group_id: pick(&self.group_id, &over.group_id),
            artifact_id: pick(&self.artifact_id, &over.artifact_id),
            version: pick(&self.version, &over.version),
            packaging: pick(&self.packaging, &over.packaging),
            artifact_type: pick(&self.artifact_type, &over.artifact_type),
            classifier: pick(&self.classifier, &over.classifier),
            file: pick(&self.file, &over.file),
            url: pick(&self.url, &over.url),
            repository_id: pick(&self.repository_id, &over.repository_id),
            unique_version: pick(&self.unique_version, &over.unique_version),
            settings_xml: pick(&self.settings_xml, &over.settings_xml),
            debug: pick(&self.debug, &over.debug),
            unsecure: pick(&self.unsecure, &over.unsecure),
            inject_dest_folder: pick(&self.inject_dest_folder, &over.inject_dest_folder),
            dest_folder: pick(&self.dest_folder, &over.dest_folder),
            version_file: pick(&self.version_file, &over.version_file),
            mode: pick(&self.mode, &over.mode),
            commit_prefix: pick(&self.commit_prefix, &over.commit_prefix),
            git_push: pick(&self.git_push, &over.git_push),
            git_push_tag: pick(&self.git_push_tag, &over.git_push_tag),
            files: pick(&self.files, &over.files),
        }
    }

    /// Apply a single `key=value` override from the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), MvnshipError> {
        let text = Some(value.to_string());
        match key {
            "goal" => self.goal = text,
            "groupId" => self.group_id = text,
            "artifactId" => self.artifact_id = text,
            "version" => self.version = text,
            "packaging" => self.packaging = text,
            "type" => self.artifact_type = text,
            "classifier" => self.classifier = text,
            "file" => self.file = text,
            "url" => self.url = text,
            "repositoryId" => self.repository_id = text,
            "uniqueVersion" => self.unique_version = Some(FlagValue::Text(value.to_string())),
            "settingsXml" => self.settings_xml = text,
            "debug" => self.debug = Some(parse_bool(key, value)?),
            "unsecure" => self.unsecure = Some(parse_bool(key, value)?),
            "injectDestFolder" => self.inject_dest_folder = Some(parse_bool(key, value)?),
            "destFolder" => self.dest_folder = text,
            "versionFile" => self.version_file = text,
            "mode" => self.mode = text,
            "commitPrefix" => self.commit_prefix = text,
            "gitpush" => self.git_push = Some(parse_bool(key, value)?),
            "gitpushtag" => self.git_push_tag = Some(parse_bool(key, value)?),
            "files" => {
                return Err(MvnshipError::Config {
                    message: "'files' can only be set in Mvnship.toml".to_string(),
                })
            }
            _ => {
                return Err(MvnshipError::Config {
                    message: format!(
                        "Unknown option '{key}' (known options: {})",
                        Self::KEYS.join(", ")
                    ),
                })
            }
        }
        Ok(())
    }

    /// Parse a `key=value` override string and apply it.
    pub fn set_pair(&mut self, pair: &str) -> Result<(), MvnshipError> {
        let (key, value) = pair.split_once('=').ok_or_else(|| MvnshipError::Config {
            message: format!("Invalid override '{pair}', expected key=value"),
        })?;
        self.set(key.trim(), value)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, MvnshipError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(MvnshipError::Config {
            message: format!("Option '{key}' expects true or false, got '{value}'"),
        }),
    }
}
