//! Command dispatch and handler modules.

mod plan;
mod run;
mod targets;

use miette::Result;

use crate::cli::{self, Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Command::Run { target, flags } => run::exec(&target, &flags, config),
        Command::Package { flags } => run::exec("package", &flags, config),
        Command::Install { flags } => run::exec("install", &flags, config),
        Command::Deploy { flags } => run::exec("deploy", &flags, config),
        Command::Release {
            version,
            mode,
            flags,
        } => run::exec(
            &cli::release_address(version.as_deref(), mode.as_deref()),
            &flags,
            config,
        ),
        Command::Plan { target, set, debug } => plan::exec(&target, &set, debug, config),
        Command::Targets => targets::exec(config),
    }
}
