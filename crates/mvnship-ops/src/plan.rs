//! Goal sequencing: the ordered steps each goal expands to.
//!
//! A [`GoalPlan`] owns everything its steps need. Nothing is read from
//! global state once a plan exists; executing it consumes it.

use std::fmt;
use std::path::PathBuf;

use mvnship_core::goal::{Goal, TargetAddress};
use mvnship_core::options::ResolvedOptions;
use mvnship_core::release::ReleasePlan;
use mvnship_util::errors::MvnshipError;

/// One unit of work within a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Set the manifest version through `npm version`, which commits and
    /// tags. With `delete_tag` the tag it created is removed again.
    BumpVersion { version: String, delete_tag: bool },
    /// Write the archive from the resolved file list.
    Archive,
    InstallFile,
    DeployFile,
    GitPush,
    GitPushTag { tag: String },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::BumpVersion { .. } => "bump-version",
            Step::Archive => "archive",
            Step::InstallFile => "install-file",
            Step::DeployFile => "deploy-file",
            Step::GitPush => "git-push",
            Step::GitPushTag { .. } => "git-push-tag",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::BumpVersion { version, .. } => write!(f, "{} {version}", self.name()),
            Step::GitPushTag { tag } => write!(f, "{} {tag}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Inputs shared by every step of one goal invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalContext {
    pub target: TargetAddress,
    /// Directory relative paths (archive, version file, file mappings) are
    /// resolved against. Also the working directory of every tool.
    pub project_dir: PathBuf,
    /// The configuration file in use, if any. Never archived.
    pub config_path: Option<PathBuf>,
    pub options: ResolvedOptions,
    /// Present exactly when the goal is [`Goal::Release`].
    pub release: Option<ReleasePlan>,
}

impl GoalContext {
    pub fn goal(&self) -> Goal {
        self.options.goal
    }
}

/// A goal's context and the steps it expands to, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalPlan {
    pub context: GoalContext,
    pub steps: Vec<Step>,
}

impl GoalPlan {
    pub fn new(context: GoalContext) -> Result<Self, MvnshipError> {
        let steps = sequence(context.goal(), context.release.as_ref())?;
        tracing::debug!(
            "goal {} expands to [{}]",
            context.goal(),
            steps
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self { context, steps })
    }
}

/// The ordered steps for `goal`.
///
/// A release bumps to the release version, packages and deploys it, then
/// bumps to the next development version and deletes the tag that second
/// bump created. Pushes come last and only when enabled.
pub fn sequence(goal: Goal, release: Option<&ReleasePlan>) -> Result<Vec<Step>, MvnshipError> {
    let steps = match goal {
        Goal::Package => vec![Step::Archive],
        Goal::Install => vec![Step::Archive, Step::InstallFile],
        Goal::Deploy => vec![Step::Archive, Step::DeployFile],
        Goal::Release => {
            let plan = release.ok_or_else(|| MvnshipError::Generic {
                message: "release goal requires a release plan".to_string(),
            })?;
            let mut steps = vec![
                Step::BumpVersion {
                    version: plan.release_version.clone(),
                    delete_tag: false,
                },
                Step::Archive,
                Step::DeployFile,
                Step::BumpVersion {
                    version: plan.next_version.clone(),
                    delete_tag: true,
                },
            ];
            if plan.git_push {
                steps.push(Step::GitPush);
            }
            if plan.git_push_tag {
                steps.push(Step::GitPushTag {
                    tag: plan.release_tag(),
                });
            }
            steps
        }
    };
    Ok(steps)
}
