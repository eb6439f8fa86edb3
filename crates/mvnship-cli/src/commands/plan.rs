use std::path::Path;

use console::style;
use miette::Result;

use mvnship_ops::ops_exec;
use mvnship_ops::ops_plan::{self, PlanRequest};
use mvnship_ops::runner::Tools;
use mvnship_util::errors::MvnshipError;

pub fn exec(
    target: &str,
    overrides: &[String],
    debug: bool,
    config: Option<&Path>,
) -> Result<()> {
    let cwd = std::env::current_dir().map_err(MvnshipError::Io)?;
    let plan = ops_plan::prepare(&PlanRequest {
        cwd,
        config: config.map(Path::to_path_buf),
        target: target.to_string(),
        overrides: overrides.to_vec(),
        debug,
    })?;
    let ctx = &plan.context;
    let opts = &ctx.options;

    println!("{}", style(format!("{} ({})", ctx.target, ctx.goal())).bold());
    println!("  project:     {}", ctx.project_dir.display());
    if let Some(ref path) = ctx.config_path {
        println!("  config:      {}", path.display());
    }
    println!("  coordinates: {}", opts.coordinates);
    println!("  archive:     {}", opts.file);
    if let Some(ref folder) = opts.dest_folder {
        println!("  folder:      {folder}/");
    }
    if let Some(ref url) = opts.url {
        println!("  url:         {url}");
    }
    if let Some(ref release) = ctx.release {
        println!(
            "  release:     {} -> {} (next {}, mode {})",
            release.current_version, release.release_version, release.next_version, release.mode
        );
    }

    println!("{}", style("steps").bold());
    for (i, step) in ops_exec::preview(&plan, &Tools::from_env())
        .into_iter()
        .enumerate()
    {
        println!("  {}. {}", i + 1, step.step);
        for cmd in step.commands {
            println!("       $ {cmd}");
        }
    }
    Ok(())
}
