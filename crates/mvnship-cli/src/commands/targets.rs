use std::path::Path;

use miette::Result;

use mvnship_core::goal::Goal;
use mvnship_ops::ops_plan;
use mvnship_util::errors::MvnshipError;

pub fn exec(config: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(MvnshipError::Io)?;
    let loaded = ops_plan::load_config(&cwd, config)?;
    let builtin = Goal::ALL.map(|g| g.as_str()).join(", ");

    if loaded.file.targets.is_empty() {
        println!("No targets configured. Built-in goals: {builtin}");
        return Ok(());
    }

    for name in loaded.file.target_names() {
        let raw = loaded.file.layered(name);
        match ops_plan::determine_goal(&loaded.file, name, &raw) {
            Ok(goal) => println!("  {name:<16} {goal}"),
            Err(e) => println!("  {name:<16} (invalid: {e})"),
        }
    }
    println!("Built-in goals: {builtin}");
    Ok(())
}
