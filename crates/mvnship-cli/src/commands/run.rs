use std::path::Path;

use miette::Result;

use mvnship_ops::archive::FsArchiver;
use mvnship_ops::ops_exec::{self, Executor};
use mvnship_ops::ops_plan::{self, PlanRequest};
use mvnship_ops::runner::{SystemRunner, Tools};
use mvnship_util::errors::MvnshipError;
use mvnship_util::progress::status;

use crate::cli::RunFlags;

pub fn exec(target: &str, flags: &RunFlags, config: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(MvnshipError::Io)?;
    let plan = ops_plan::prepare(&PlanRequest {
        cwd,
        config: config.map(Path::to_path_buf),
        target: target.to_string(),
        overrides: flags.set.clone(),
        debug: flags.debug,
    })?;
    let tools = Tools::from_env();

    if flags.dry_run {
        println!("{} ({}), dry run:", target, plan.context.goal());
        for step in ops_exec::preview(&plan, &tools) {
            println!("  {}", step.step);
            for cmd in &step.commands {
                println!("    $ {cmd}");
            }
        }
        return Ok(());
    }

    let summary = ops_exec::execute(
        plan,
        &Executor {
            runner: &SystemRunner,
            archiver: &FsArchiver,
            tools,
        },
    )?;
    status(
        "Finished",
        &format!("{target} ({} steps)", summary.completed.len()),
    );
    Ok(())
}
