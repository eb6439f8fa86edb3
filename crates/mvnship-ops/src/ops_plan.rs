//! Operation: turn a target invocation into a validated [`GoalPlan`].
//!
//! Loads `Mvnship.toml`, layers `[options]`, the target table and `--set`
//! overrides, reads the version file, checks required options, computes
//! the release versions and resolves the final option set. Nothing is
//! written and no tool is run.

use std::path::{Path, PathBuf};

use mvnship_core::config::{ConfigFile, RawOptions, CONFIG_FILE};
use mvnship_core::goal::{Goal, TargetAddress};
use mvnship_core::manifest::PackageManifest;
use mvnship_core::options::{self, DEFAULT_VERSION_FILE};
use mvnship_core::release::{ReleasePlan, DEFAULT_MODE};
use mvnship_util::errors::MvnshipError;
use mvnship_util::fs::find_ancestor_with;

use crate::plan::{GoalContext, GoalPlan};

/// What the user asked for.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Directory the search for `Mvnship.toml` starts from.
    pub cwd: PathBuf,
    /// Explicit configuration file; skips the search.
    pub config: Option<PathBuf>,
    pub target: String,
    /// `key=value` overrides, applied last in order.
    pub overrides: Vec<String>,
    /// Forces the `debug` option on.
    pub debug: bool,
}

/// The configuration in effect and the directory it anchors.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub project_dir: PathBuf,
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Locate and parse the configuration for a run started in `cwd`.
///
/// Without an explicit path the nearest `Mvnship.toml` in `cwd` or an
/// ancestor is used. When none exists the run proceeds with empty options
/// rooted at `cwd`, so everything must come from `--set` overrides.
pub fn load_config(cwd: &Path, explicit: Option<&Path>) -> miette::Result<LoadedConfig> {
    let path = match explicit {
        Some(p) if p.is_absolute() => Some(p.to_path_buf()),
        Some(p) => Some(cwd.join(p)),
        None => find_ancestor_with(cwd, CONFIG_FILE).map(|dir| dir.join(CONFIG_FILE)),
    };

    match path {
        Some(path) => {
            tracing::debug!("using configuration {}", path.display());
            let file = ConfigFile::from_path(&path)?;
            let project_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf());
            Ok(LoadedConfig {
                project_dir,
                path: Some(path),
                file,
            })
        }
        None => {
            tracing::debug!("no {CONFIG_FILE} found above {}", cwd.display());
            Ok(LoadedConfig {
                project_dir: cwd.to_path_buf(),
                path: None,
                file: ConfigFile::default(),
            })
        }
    }
}

/// Build the plan for `request`.
pub fn prepare(request: &PlanRequest) -> miette::Result<GoalPlan> {
    let target = TargetAddress::parse(&request.target)?;
    let loaded = load_config(&request.cwd, request.config.as_deref())?;
    prepare_with(loaded, target, &request.overrides, request.debug)
}

/// Build the plan for `target` against an already-loaded configuration.
pub fn prepare_with(
    loaded: LoadedConfig,
    target: TargetAddress,
    overrides: &[String],
    debug: bool,
) -> miette::Result<GoalPlan> {
    let mut raw = layered_options(&loaded.file, &target.name, overrides)?;
    if debug {
        raw.debug = Some(true);
    }
    let goal = determine_goal(&loaded.file, &target.name, &raw)?;

    let version_file = raw
        .version_file
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_VERSION_FILE.to_string());
    let manifest = read_manifest(&loaded.project_dir.join(&version_file), goal)?;

    options::require_options(goal, &raw, &manifest)?;

    let release = if goal == Goal::Release {
        let plan = release_plan(&target, &raw, &manifest)?;
        raw.version = Some(plan.release_version.clone());
        Some(plan)
    } else {
        if !target.args.is_empty() {
            tracing::warn!(
                "ignoring arguments [{}]: only the release goal takes arguments",
                target.args.join(", ")
            );
        }
        None
    };

    let options = options::resolve(goal, &raw, &manifest)?;
    let context = GoalContext {
        target,
        project_dir: loaded.project_dir,
        config_path: loaded.path,
        options,
        release,
    };
    Ok(GoalPlan::new(context)?)
}

/// `[options]`, then the target table, then each override in order.
pub fn layered_options(
    config: &ConfigFile,
    target: &str,
    overrides: &[String],
) -> Result<RawOptions, MvnshipError> {
    let mut raw = config.layered(target);
    for pair in overrides {
        raw.set_pair(pair)?;
    }
    Ok(raw)
}

/// The `goal` option when set, else the target name itself. A name that is
/// neither a configured target nor a goal is rejected.
pub fn determine_goal(
    config: &ConfigFile,
    target: &str,
    raw: &RawOptions,
) -> Result<Goal, MvnshipError> {
    match raw.goal.as_deref().filter(|g| !g.is_empty()) {
        Some(goal) => goal.parse(),
        None => target.parse().map_err(|_| MvnshipError::Config {
            message: if config.targets.contains_key(target) {
                format!("Target '{target}' does not set a goal")
            } else {
                format!("Unknown target '{target}'")
            },
        }),
    }
}

/// Read the version file. A release cannot run without it; the other goals
/// fall back to an empty manifest and rely on explicit options.
fn read_manifest(path: &Path, goal: Goal) -> miette::Result<PackageManifest> {
    if goal != Goal::Release && !path.is_file() {
        tracing::debug!(
            "{} not found; artifact defaults come from options only",
            path.display()
        );
        return Ok(PackageManifest::default());
    }
    PackageManifest::from_path(path)
}

fn release_plan(
    target: &TargetAddress,
    raw: &RawOptions,
    manifest: &PackageManifest,
) -> Result<ReleasePlan, MvnshipError> {
    let current = manifest
        .version
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MvnshipError::Manifest {
            message: "the version file has no version to release".to_string(),
        })?;
    let default_mode = raw
        .mode
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MODE);

    let plan = ReleasePlan::new(current, target.arg(0), target.arg(1), default_mode)?
        .with_git(raw.git_push.unwrap_or(false), raw.git_push_tag.unwrap_or(false));
    tracing::info!(
        "release {} -> {} (next {}, mode {})",
        plan.current_version,
        plan.release_version,
        plan.next_version,
        plan.mode
    );
    Ok(plan)
}
