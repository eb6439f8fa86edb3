#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;

use mvnship_ops::archive::FsArchiver;
use mvnship_ops::ops_exec::Executor;
use mvnship_ops::runner::{ToolOutput, ToolRunner, Tools};
use mvnship_util::errors::MvnshipError;
use mvnship_util::process::CommandBuilder;

/// Records every command instead of running it. Commands whose program and
/// first argument match a configured failure exit with status 1.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandBuilder>>,
    failures: Vec<(String, String)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(program: &str, first_arg: &str) -> Self {
        Self {
            calls: RefCell::default(),
            failures: vec![(program.to_string(), first_arg.to_string())],
        }
    }

    /// Each recorded command as `program arg arg ...`.
    pub fn lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| {
                std::iter::once(c.program().to_string())
                    .chain(c.arguments().iter().cloned())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    pub fn calls(&self) -> Vec<CommandBuilder> {
        self.calls.borrow().clone()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, cmd: &CommandBuilder) -> Result<ToolOutput, MvnshipError> {
        self.calls.borrow_mut().push(cmd.clone());
        let first = cmd.arguments().first().map(String::as_str).unwrap_or("");
        let fails = self
            .failures
            .iter()
            .any(|(p, a)| p == cmd.program() && a == first);
        Ok(if fails {
            ToolOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: "simulated failure".to_string(),
            }
        } else {
            ToolOutput {
                success: true,
                code: Some(0),
                ..Default::default()
            }
        })
    }
}

pub fn executor(runner: &RecordingRunner) -> Executor<'_> {
    Executor {
        runner,
        archiver: &FsArchiver,
        tools: Tools::default(),
    }
}

/// A small web project: `package.json`, `Mvnship.toml` and a few files,
/// including a `node_modules` tree that must never be archived.
pub fn web_project(dir: &Path, version: &str, config: &str) {
    std::fs::write(
        dir.join("package.json"),
        format!(r#"{{ "name": "test-project", "version": "{version}" }}"#),
    )
    .unwrap();
    std::fs::write(dir.join("Mvnship.toml"), config).unwrap();
    std::fs::write(dir.join("index.html"), "<html></html>").unwrap();
    std::fs::create_dir_all(dir.join("js")).unwrap();
    std::fs::write(dir.join("js/app.js"), "console.log(1);").unwrap();
    std::fs::create_dir_all(dir.join("node_modules/left-pad")).unwrap();
    std::fs::write(dir.join("node_modules/left-pad/index.js"), "").unwrap();
}

pub const BASIC_CONFIG: &str = r#"
[options]
groupId = "test.project"
url = "file://repo"
"#;
