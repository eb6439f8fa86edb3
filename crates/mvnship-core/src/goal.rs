//! Goals and target addressing (`release:1.0.1:patch`).

use std::fmt;
use std::str::FromStr;

use mvnship_util::errors::MvnshipError;

/// The operation requested for a target invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    Package,
    Install,
    Deploy,
    Release,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Package, Goal::Install, Goal::Deploy, Goal::Release];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Package => "package",
            Goal::Install => "install",
            Goal::Deploy => "deploy",
            Goal::Release => "release",
        }
    }

    /// Goals that talk to a remote repository and therefore need `url`.
    pub fn requires_url(&self) -> bool {
        matches!(self, Goal::Deploy | Goal::Release)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = MvnshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| MvnshipError::Config {
                message: format!(
                    "Unknown goal '{s}' (expected one of package, install, deploy, release)"
                ),
            })
    }
}

/// A target name plus its colon-separated positional arguments.
///
/// `release:1.0.1:patch` addresses the `release` target with the arguments
/// `["1.0.1", "patch"]`. At most two arguments are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAddress {
    pub name: String,
    pub args: Vec<String>,
}

impl TargetAddress {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn parse(spec: &str) -> Result<Self, MvnshipError> {
        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(MvnshipError::Config {
                message: format!("Invalid target '{spec}': missing target name"),
            });
        }
        let args: Vec<String> = parts.map(str::to_string).collect();
        if args.len() > 2 {
            return Err(MvnshipError::Config {
                message: format!(
                    "Invalid target '{spec}': expected at most <target>:<version>:<mode>"
                ),
            });
        }
        if args.iter().any(String::is_empty) {
            return Err(MvnshipError::Config {
                message: format!("Invalid target '{spec}': empty argument"),
            });
        }
        Ok(Self {
            name: name.to_string(),
            args,
        })
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl fmt::Display for TargetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            write!(f, ":{arg}")?;
        }
        Ok(())
    }
}
