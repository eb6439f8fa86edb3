//! Version bumping through `npm version` and the git housekeeping around it.

use std::path::Path;

use mvnship_util::process::CommandBuilder;

use crate::runner::ToolRunner;

/// Placeholder `npm version` replaces with the new version.
const VERSION_PLACEHOLDER: &str = "%s";

/// Commit message template for `npm version -m`.
///
/// A prefix without the `%s` placeholder gets it appended, so `"[release] "`
/// produces commits like `[release] 1.2.0`.
pub fn commit_message(prefix: &str) -> String {
    if prefix.contains(VERSION_PLACEHOLDER) {
        prefix.to_string()
    } else {
        format!("{prefix}{VERSION_PLACEHOLDER}")
    }
}

/// `npm version <version> -m <message>`, run where the version file lives.
pub fn bump_command(npm: &str, version: &str, commit_prefix: &str, dir: &Path) -> CommandBuilder {
    CommandBuilder::new(npm)
        .args(["version", version, "-m"])
        .arg(commit_message(commit_prefix))
        .cwd(dir)
}

pub fn status_command(git: &str, dir: &Path) -> CommandBuilder {
    CommandBuilder::new(git).args(["status", "--porcelain"]).cwd(dir)
}

pub fn delete_tag_command(git: &str, tag: &str, dir: &Path) -> CommandBuilder {
    CommandBuilder::new(git).args(["tag", "-d", tag]).cwd(dir)
}

pub fn push_command(git: &str, dir: &Path) -> CommandBuilder {
    CommandBuilder::new(git).arg("push").cwd(dir)
}

pub fn push_tag_command(git: &str, tag: &str, dir: &Path) -> CommandBuilder {
    CommandBuilder::new(git).args(["push", "origin", tag]).cwd(dir)
}

/// Whether `dir` is inside a git working tree. Any failure to ask counts
/// as "no".
pub fn is_git_repo(runner: &dyn ToolRunner, git: &str, dir: &Path) -> bool {
    match runner.run(&status_command(git, dir)) {
        Ok(out) => out.success,
        Err(e) => {
            tracing::debug!("git status check failed: {e}");
            false
        }
    }
}
