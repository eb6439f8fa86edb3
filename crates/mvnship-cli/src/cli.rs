//! CLI argument definitions for mvnship.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "mvnship",
    version,
    about = "Package a web project and publish it to a Maven repository",
    long_about = "mvnship archives a project's files and hands the archive to \
                  `mvn install:install-file` or `mvn deploy:deploy-file`. The release \
                  goal also bumps the version with `npm version` and pushes to git."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this configuration file instead of searching for Mvnship.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Flags shared by every command that runs a goal.
#[derive(Args, Debug, Clone, Default)]
pub struct RunFlags {
    /// Override an option, e.g. --set classifier=dist (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Print the planned steps and commands without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Pass Maven's error and debug flags (-e -X)
    #[arg(long)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a target: <name>[:<version-or-mode>[:<mode>]]
    Run {
        /// Target address, e.g. deploy or release:1.0.1:patch
        target: String,
        #[command(flatten)]
        flags: RunFlags,
    },

    /// Create the archive
    Package {
        #[command(flatten)]
        flags: RunFlags,
    },

    /// Archive and install into the local Maven repository
    Install {
        #[command(flatten)]
        flags: RunFlags,
    },

    /// Archive and deploy to the remote repository
    Deploy {
        #[command(flatten)]
        flags: RunFlags,
    },

    /// Bump to the release version, deploy, then bump to the next snapshot
    Release {
        /// Release version, or a bump mode (major, minor, patch, build)
        version: Option<String>,
        /// Bump mode for the next development version
        mode: Option<String>,
        #[command(flatten)]
        flags: RunFlags,
    },

    /// Show the resolved options and steps for a target
    Plan {
        /// Target address, e.g. deploy or release:1.0.1:patch
        target: String,
        /// Override an option (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Show Maven commands with the error and debug flags (-e -X)
        #[arg(long)]
        debug: bool,
    },

    /// List configured targets and their goals
    Targets,
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// The target address a `release` subcommand stands for.
pub fn release_address(version: Option<&str>, mode: Option<&str>) -> String {
    std::iter::once("release")
        .chain(version)
        .chain(mode)
        .collect::<Vec<_>>()
        .join(":")
}
