use serde::Deserialize;
use std::path::Path;

use mvnship_util::errors::MvnshipError;

/// The fields mvnship reads from the project's `package.json` (or the
/// configured `versionFile`). Any other fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
}

impl PackageManifest {
    /// Load and parse a manifest from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MvnshipError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_json(&content).map_err(|e| {
            MvnshipError::Manifest {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn parse_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
