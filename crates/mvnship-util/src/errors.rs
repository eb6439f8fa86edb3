use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all mvnship operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MvnshipError {
    /// I/O operation failed. Filesystem errors are carried through unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable package manifest (e.g. package.json).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check that the version file exists and contains valid JSON"))]
    Manifest { message: String },

    /// Invalid configuration file, override, or option value.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your Mvnship.toml and --set overrides"))]
    Config { message: String },

    /// One or more required options are absent. Lists every missing key.
    #[error("Required options {} missing.", quoted(.keys))]
    #[diagnostic(help("Add the missing keys to [options] or the target table in Mvnship.toml"))]
    MissingOptions { keys: Vec<String> },

    /// The next development version could not be computed.
    #[error(
        "Failed to determine next development version based on version ({version}) and mode ({mode})"
    )]
    Version { version: String, mode: String },

    /// Writing the archive failed.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// An external tool (mvn, npm, git) failed to start or exited non-zero.
    #[error("{tool} failed: {message}")]
    Subprocess { tool: String, message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

fn quoted(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias for `miette::Result<T>`.
pub type MvnshipResult<T> = miette::Result<T>;
