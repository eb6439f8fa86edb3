//! Release planning: the release version, the next development version, and
//! the bump mode that links them.

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};

use mvnship_util::errors::MvnshipError;

/// Pre-release marker for in-development versions.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Bump mode used when neither the target arguments nor `mode` name one.
pub const DEFAULT_MODE: &str = "minor";

/// Which segment of a semantic version to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpMode {
    Major,
    Minor,
    Patch,
    Build,
}

impl BumpMode {
    pub const ALL: [BumpMode; 4] = [
        BumpMode::Major,
        BumpMode::Minor,
        BumpMode::Patch,
        BumpMode::Build,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpMode::Major => "major",
            BumpMode::Minor => "minor",
            BumpMode::Patch => "patch",
            BumpMode::Build => "build",
        }
    }
}

impl fmt::Display for BumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpMode {
    type Err = ();

    /// Exact, case-sensitive match on one of the four mode names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BumpMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(())
    }
}

/// The versions a release run moves through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub current_version: String,
    pub mode: BumpMode,
    pub release_version: String,
    pub next_version: String,
    pub git_push: bool,
    pub git_push_tag: bool,
}

impl ReleasePlan {
    /// Compute a release plan from the manifest version and the target's
    /// positional arguments.
    ///
    /// A lone first argument naming a bump mode is taken as the mode, not as
    /// a version. `default_mode` comes from the `mode` option.
    pub fn new(
        current_version: &str,
        version_or_mode: Option<&str>,
        mode_arg: Option<&str>,
        default_mode: &str,
    ) -> Result<Self, MvnshipError> {
        let (explicit_version, mode_name) = match (version_or_mode, mode_arg) {
            (Some(first), None) if first.parse::<BumpMode>().is_ok() => (None, first),
            (first, mode) => (first, mode.unwrap_or(default_mode)),
        };

        let release_version = explicit_version
            .map(str::to_string)
            .unwrap_or_else(|| strip_snapshot(current_version).to_string());

        let version_error = || MvnshipError::Version {
            version: release_version.clone(),
            mode: mode_name.to_string(),
        };
        let mode: BumpMode = mode_name.parse().map_err(|_| version_error())?;
        let next = increment(&release_version, mode).ok_or_else(version_error)?;

        Ok(Self {
            current_version: current_version.to_string(),
            mode,
            next_version: format!("{next}{SNAPSHOT_SUFFIX}"),
            release_version,
            git_push: false,
            git_push_tag: false,
        })
    }

    pub fn with_git(mut self, push: bool, push_tag: bool) -> Self {
        self.git_push = push;
        self.git_push_tag = push_tag;
        self
    }

    /// Tag created by bumping to the release version.
    pub fn release_tag(&self) -> String {
        format!("v{}", self.release_version)
    }

    /// Tag created by bumping to the next development version.
    pub fn next_tag(&self) -> String {
        format!("v{}", self.next_version)
    }
}

/// Remove a trailing `-SNAPSHOT`, if present.
pub fn strip_snapshot(version: &str) -> &str {
    version.strip_suffix(SNAPSHOT_SUFFIX).unwrap_or(version)
}

/// Increment `version` at `mode`, or `None` when it is not a valid
/// semantic version (or has non-numeric build metadata in `build` mode).
///
/// A pre-release version is promoted rather than bumped when the segment
/// being incremented is already the lowest non-zero one, so `2.0.0-rc.1`
/// bumps to `2.0.0` in major mode.
pub fn increment(version: &str, mode: BumpMode) -> Option<String> {
    let mut v = Version::parse(version.trim()).ok()?;
    let was_pre = !v.pre.is_empty();
    match mode {
        BumpMode::Major => {
            if v.minor != 0 || v.patch != 0 || !was_pre {
                v.major += 1;
            }
            v.minor = 0;
            v.patch = 0;
            v.pre = Prerelease::EMPTY;
            v.build = BuildMetadata::EMPTY;
        }
        BumpMode::Minor => {
            if v.patch != 0 || !was_pre {
                v.minor += 1;
            }
            v.patch = 0;
            v.pre = Prerelease::EMPTY;
            v.build = BuildMetadata::EMPTY;
        }
        BumpMode::Patch => {
            if !was_pre {
                v.patch += 1;
            }
            v.pre = Prerelease::EMPTY;
            v.build = BuildMetadata::EMPTY;
        }
        BumpMode::Build => {
            let next = if v.build.is_empty() {
                1
            } else {
                v.build.as_str().parse::<u64>().ok()? + 1
            };
            v.build = BuildMetadata::new(&next.to_string()).ok()?;
        }
    }
    Some(v.to_string())
}
