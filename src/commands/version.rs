//! Version command implementation

use crate::config::manifest::MANIFEST_FILE;
use crate::config::settings::{DEFAULT_PROPERTIES_DIR, DEFAULT_STAGING_DIR};
use crate::error::Result;
use crate::launcher::{AGENT_MAIN_CLASS, CONSOLE_MAIN_CLASS};

/// Run version command
pub fn run() -> Result<()> {
    println!("grinderctl {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Grinder entry points:");
    println!("  Agent:   {AGENT_MAIN_CLASS}");
    println!("  Console: {CONSOLE_MAIN_CLASS}");
    println!();
    println!("Project layout:");
    println!("  Manifest:   {MANIFEST_FILE}");
    println!("  Properties: {DEFAULT_PROPERTIES_DIR}");
    println!("  Staging:    {DEFAULT_STAGING_DIR}");
    println!();
    println!("Build info:");
    println!(
        "  Profile: {}, minimum Rust {}",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        env!("CARGO_PKG_RUST_VERSION")
    );

    Ok(())
}
