//! Operation: execute a [`GoalPlan`].
//!
//! Steps run strictly in order and the first failure aborts the run.
//! Completed steps are not undone: a failed deploy after the release bump
//! leaves that commit and tag in place.

use std::path::{Path, PathBuf};

use mvnship_core::config::CONFIG_FILE;
use mvnship_core::properties::ENV_FILE;
use mvnship_maven::publish::{self, PublishVerb};
use mvnship_maven::repository;
use mvnship_util::errors::MvnshipError;
use mvnship_util::fs::to_slash;
use mvnship_util::process::CommandBuilder;
use mvnship_util::progress::{spinner, status, status_info, status_warn};

use crate::archive::{self, ArchiveFormat, Archiver};
use crate::plan::{GoalContext, GoalPlan, Step};
use crate::runner::{ToolRunner, Tools};
use crate::vcs;

/// The collaborators a plan is executed with.
pub struct Executor<'a> {
    pub runner: &'a dyn ToolRunner,
    pub archiver: &'a dyn Archiver,
    pub tools: Tools,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: Vec<String>,
    /// The archive written by the run, if it packaged one.
    pub archive: Option<PathBuf>,
}

/// A step and the commands it would run, for `--dry-run` and `plan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPreview {
    pub step: String,
    pub commands: Vec<String>,
}

/// Run every step of `plan` in order.
pub fn execute(plan: GoalPlan, exec: &Executor<'_>) -> miette::Result<RunSummary> {
    let GoalPlan { context, steps } = plan;
    let mut summary = RunSummary {
        completed: Vec::with_capacity(steps.len()),
        archive: None,
    };

    for step in &steps {
        tracing::debug!("step {step}");
        if let Err(e) = run_step(step, &context, exec, &mut summary) {
            tracing::error!(
                "step {step} failed; completed steps [{}] are not rolled back",
                summary.completed.join(", ")
            );
            return Err(e.into());
        }
        summary.completed.push(step.to_string());
    }
    Ok(summary)
}

fn run_step(
    step: &Step,
    ctx: &GoalContext,
    exec: &Executor<'_>,
    summary: &mut RunSummary,
) -> Result<(), MvnshipError> {
    match step {
        Step::BumpVersion {
            version,
            delete_tag,
        } => {
            bump_version(ctx, exec, version)?;
            if *delete_tag {
                delete_tag_best_effort(ctx, exec, &format!("v{version}"));
            }
        }
        Step::Archive => {
            summary.archive = Some(create_archive(ctx, exec.archiver)?);
        }
        Step::InstallFile => publish_file(ctx, exec, PublishVerb::Install, summary)?,
        Step::DeployFile => publish_file(ctx, exec, PublishVerb::Deploy, summary)?,
        Step::GitPush => {
            let cmd = vcs::push_command(&exec.tools.git, &ctx.project_dir);
            run_checked(exec.runner, &cmd, "Failed to push")?;
            status("Pushed", "commits");
        }
        Step::GitPushTag { tag } => {
            let cmd = vcs::push_tag_command(&exec.tools.git, tag, &ctx.project_dir);
            run_checked(exec.runner, &cmd, &format!("Failed to push tag {tag}"))?;
            status("Pushed", &format!("tag {tag}"));
        }
    }
    Ok(())
}

/// Run `cmd` and turn a non-zero exit into a [`MvnshipError::Subprocess`]
/// carrying `context` and the tool's own output.
fn run_checked(
    runner: &dyn ToolRunner,
    cmd: &CommandBuilder,
    context: &str,
) -> Result<(), MvnshipError> {
    let out = runner.run(cmd)?;
    if out.success {
        Ok(())
    } else {
        let program = Path::new(cmd.program());
        Err(MvnshipError::Subprocess {
            tool: program
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| cmd.program().to_string()),
            message: format!("{context}: {}", out.failure_text()),
        })
    }
}

/// Directory `npm version` runs in: wherever the version file lives.
fn version_dir(ctx: &GoalContext) -> PathBuf {
    let file = ctx.project_dir.join(&ctx.options.version_file);
    file.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ctx.project_dir.clone())
}

fn bump_version(ctx: &GoalContext, exec: &Executor<'_>, version: &str) -> Result<(), MvnshipError> {
    let cmd = vcs::bump_command(
        &exec.tools.npm,
        version,
        &ctx.options.commit_prefix,
        &version_dir(ctx),
    );
    run_checked(
        exec.runner,
        &cmd,
        &format!("Failed to bump version to {version}"),
    )?;
    status("Bumped", &format!("version to {version}"));
    Ok(())
}

/// The next-version bump tags a development version nobody wants; remove
/// it. Failing to do so is reported but does not fail the release.
fn delete_tag_best_effort(ctx: &GoalContext, exec: &Executor<'_>, tag: &str) {
    let dir = version_dir(ctx);
    if !vcs::is_git_repo(exec.runner, &exec.tools.git, &dir) {
        tracing::debug!("not a git repository; no tag to delete");
        return;
    }
    let cmd = vcs::delete_tag_command(&exec.tools.git, tag, &dir);
    match run_checked(exec.runner, &cmd, &format!("Failed to delete tag {tag}")) {
        Ok(()) => status_info("Deleted", &format!("tag {tag}")),
        Err(e) => {
            tracing::error!("{e}");
            status_warn("Warning", &format!("could not delete tag {tag}"));
        }
    }
}

/// Project-relative paths that must never end up inside the archive.
fn excluded_paths(ctx: &GoalContext) -> Vec<String> {
    let file = &ctx.options.file;
    let format = ArchiveFormat::from_extension(&ctx.options.file_name.extension);
    let mut excluded = vec![
        file.clone(),
        to_slash(&archive::native_path(Path::new(file), format)),
        ENV_FILE.to_string(),
    ];
    let config = ctx
        .config_path
        .as_deref()
        .and_then(|p| p.strip_prefix(&ctx.project_dir).ok())
        .map(to_slash)
        .unwrap_or_else(|| CONFIG_FILE.to_string());
    excluded.push(config);
    excluded
}

fn create_archive(ctx: &GoalContext, archiver: &dyn Archiver) -> Result<PathBuf, MvnshipError> {
    let opts = &ctx.options;
    let format = ArchiveFormat::from_extension(&opts.file_name.extension);
    let entries = archive::collect_entries(&ctx.project_dir, &opts.files, &excluded_paths(ctx))?;
    let target = ctx.project_dir.join(&opts.file);

    let produced = archiver.create(format, &entries, &target)?;
    let path = publish::normalize_archive(&produced, &target)?;
    status(
        "Packaged",
        &format!("{} ({} files)", opts.file, entries.len()),
    );
    Ok(path)
}

fn publish_file(
    ctx: &GoalContext,
    exec: &Executor<'_>,
    verb: PublishVerb,
    summary: &RunSummary,
) -> Result<(), MvnshipError> {
    let opts = &ctx.options;
    if summary.archive.is_none() {
        return Err(MvnshipError::Generic {
            message: format!("{} requires the archive step to run first", verb.plugin_goal()),
        });
    }
    let cmd = publish::publish_command(&exec.tools.mvn, verb, opts, &ctx.project_dir);

    let (label, failure) = match verb {
        PublishVerb::Install => ("Installing", "Failed to install to local repository"),
        PublishVerb::Deploy => ("Deploying", "Failed to deploy to maven"),
    };
    let pb = spinner(&format!("{label} {} ({})", opts.file, opts.coordinates));
    let result = run_checked(exec.runner, &cmd, failure);
    pb.finish_and_clear();
    result?;

    match (verb, opts.url.as_deref()) {
        (PublishVerb::Deploy, Some(url)) => {
            status("Deployed", &format!("{} to {url}", opts.file));
            tracing::info!(
                "artifact available at {}",
                repository::artifact_url(url, &opts.coordinates, &opts.file_name.extension)
            );
        }
        _ => status("Installed", &format!("{} as {}", opts.file, opts.coordinates)),
    }
    Ok(())
}

/// Describe what [`execute`] would do without doing it.
pub fn preview(plan: &GoalPlan, tools: &Tools) -> Vec<StepPreview> {
    let ctx = &plan.context;
    plan.steps
        .iter()
        .map(|step| {
            let commands = match step {
                Step::BumpVersion {
                    version,
                    delete_tag,
                } => {
                    let dir = version_dir(ctx);
                    let mut cmds = vec![vcs::bump_command(
                        &tools.npm,
                        version,
                        &ctx.options.commit_prefix,
                        &dir,
                    )
                    .to_string()];
                    if *delete_tag {
                        cmds.push(
                            vcs::delete_tag_command(&tools.git, &format!("v{version}"), &dir)
                                .to_string(),
                        );
                    }
                    cmds
                }
                Step::Archive => Vec::new(),
                Step::InstallFile => vec![publish::publish_command(
                    &tools.mvn,
                    PublishVerb::Install,
                    &ctx.options,
                    &ctx.project_dir,
                )
                .to_string()],
                Step::DeployFile => vec![publish::publish_command(
                    &tools.mvn,
                    PublishVerb::Deploy,
                    &ctx.options,
                    &ctx.project_dir,
                )
                .to_string()],
                Step::GitPush => {
                    vec![vcs::push_command(&tools.git, &ctx.project_dir).to_string()]
                }
                Step::GitPushTag { tag } => {
                    vec![vcs::push_tag_command(&tools.git, tag, &ctx.project_dir).to_string()]
                }
            };
            let step = match step {
                Step::Archive => format!("{step} -> {}", ctx.options.file),
                _ => step.to_string(),
            };
            StepPreview { step, commands }
        })
        .collect()
}
