//! Agent command implementation

use std::path::PathBuf;

use super::configure::print_summary;
use super::helpers::resolve_settings;
use crate::cli::AgentArgs;
use crate::config;
use crate::error::Result;
use crate::launcher::LaunchPlan;

/// Run agent command
pub fn run(project: Option<PathBuf>, manifest: Option<PathBuf>, args: AgentArgs) -> Result<()> {
    let settings = resolve_settings(project.as_deref(), manifest.as_deref(), &args.flags)?;
    let prepared = config::configure(&settings)?;

    let plan = LaunchPlan::agent(&settings.java, &prepared, settings.daemon, &settings.project_dir);
    if args.dry_run {
        print_summary(&prepared);
        println!();
        println!("{plan}");
        return Ok(());
    }
    plan.execute()
}
