//! External tool invocation (`mvn`, `npm`, `git`).

use mvnship_maven::publish::MVN;
use mvnship_util::errors::MvnshipError;
use mvnship_util::process::CommandBuilder;

/// Captured result of a finished tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// The most useful text to show when the tool failed: stderr when it
    /// said anything, stdout otherwise. Maven reports build errors on stdout.
    pub fn failure_text(&self) -> String {
        let text = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        let text = text.trim();
        if text.is_empty() {
            match self.code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            }
        } else {
            text.to_string()
        }
    }
}

/// Runs a prepared command to completion.
///
/// An `Err` means the tool could not be run at all; a tool that ran and
/// failed returns `Ok` with `success == false`.
pub trait ToolRunner {
    fn run(&self, cmd: &CommandBuilder) -> Result<ToolOutput, MvnshipError>;
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, cmd: &CommandBuilder) -> Result<ToolOutput, MvnshipError> {
        let output = cmd.exec()?;
        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Executable names for each external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub mvn: String,
    pub npm: String,
    pub git: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            mvn: MVN.to_string(),
            npm: "npm".to_string(),
            git: "git".to_string(),
        }
    }
}

impl Tools {
    /// Defaults, overridden by `MVNSHIP_MVN`, `MVNSHIP_NPM` and `MVNSHIP_GIT`.
    pub fn from_env() -> Self {
        let pick = |var: &str, default: String| match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => {
                tracing::debug!("{var} overrides executable: {v}");
                v
            }
            _ => default,
        };
        let defaults = Self::default();
        Self {
            mvn: pick("MVNSHIP_MVN", defaults.mvn),
            npm: pick("MVNSHIP_NPM", defaults.npm),
            git: pick("MVNSHIP_GIT", defaults.git),
        }
    }
}
