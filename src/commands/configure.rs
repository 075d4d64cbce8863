//! Configure command implementation
//!
//! Resolves the run configuration, stages it, and prints what was staged.

use std::path::PathBuf;

use console::Style;

use super::helpers::resolve_settings;
use crate::cli::ConfigureArgs;
use crate::config::{self, PreparedRun};
use crate::error::{GrinderError, Result};

/// Run configure command
pub fn run(project: Option<PathBuf>, manifest: Option<PathBuf>, args: ConfigureArgs) -> Result<()> {
    let settings = resolve_settings(project.as_deref(), manifest.as_deref(), &args.flags)?;
    let prepared = config::configure(&settings)?;

    if args.json {
        let json = serde_json::to_string_pretty(&prepared).map_err(|e| GrinderError::IoError {
            message: format!("Failed to serialize configuration: {e}"),
        })?;
        println!("{json}");
    } else {
        print_summary(&prepared);
    }
    Ok(())
}

/// Human readable summary of a staged run
pub fn print_summary(prepared: &PreparedRun) {
    let label = Style::new().bold();
    let value = Style::new().cyan();

    println!("{}", Style::new().bold().green().apply_to("Grinder configuration staged"));
    println!("  {} {}", label.apply_to("Properties:"), value.apply_to(prepared.source.display()));
    println!("  {} {}", label.apply_to("Script:    "), value.apply_to(prepared.script.display()));
    println!("  {} {}", label.apply_to("Logs:      "), value.apply_to(prepared.log_dir.display()));
    println!(
        "  {} {}",
        label.apply_to("Staged:    "),
        value.apply_to(prepared.layout.properties_file.display())
    );
    if let Some(agent) = &prepared.configuration.agent_argument {
        println!("  {} {}", label.apply_to("Agent:     "), value.apply_to(agent));
    }
    println!(
        "  {} {} entries",
        label.apply_to("Classpath: "),
        prepared.configuration.classpath_entries.len()
    );
}
