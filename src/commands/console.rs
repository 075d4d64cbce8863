//! Console command implementation

use std::path::PathBuf;

use super::helpers::resolve_settings;
use crate::cli::ConsoleArgs;
use crate::config;
use crate::error::Result;
use crate::launcher::LaunchPlan;

/// Run console command
pub fn run(project: Option<PathBuf>, manifest: Option<PathBuf>, args: ConsoleArgs) -> Result<()> {
    let settings = resolve_settings(project.as_deref(), manifest.as_deref(), &args.flags)?;
    let prepared = config::configure(&settings)?;

    let plan = LaunchPlan::console(&settings.java, &prepared, args.headless, &settings.project_dir);
    if args.dry_run {
        println!("{plan}");
        return Ok(());
    }
    plan.execute()
}
