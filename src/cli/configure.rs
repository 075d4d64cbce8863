use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::SettingsOverrides;

/// Parse a `-D key=value` definition
fn parse_define(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, _)) if key.trim().is_empty() => Err(format!("empty key in '{value}'")),
        Some((key, value)) => Ok((key.trim().to_string(), value.to_string())),
        None => Err(format!("expected key=value, got '{value}'")),
    }
}

/// Flags shared by every command that resolves a run configuration
#[derive(Args, Debug, Clone, Default)]
pub struct RunFlags {
    /// Explicit grinder properties file (skips directory search)
    #[arg(long = "properties", value_name = "FILE")]
    pub properties_file: Option<PathBuf>,

    /// Directory holding exactly one .properties file
    #[arg(long, value_name = "DIR")]
    pub properties_dir: Option<PathBuf>,

    /// Root directory of the test scripts
    #[arg(long, value_name = "DIR")]
    pub test_dir: Option<PathBuf>,

    /// Grinder log directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Directory the agent configuration is staged into
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Override a grinder property (repeatable)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,

    /// Do not expand ${...} placeholders in the properties file
    #[arg(long)]
    pub no_filtering: bool,

    /// Run the agent in daemon mode
    #[arg(long)]
    pub daemon: bool,

    /// Daemon sleep period in milliseconds
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub daemon_period: Option<i64>,
}

impl RunFlags {
    pub fn to_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            properties_file: self.properties_file.clone(),
            properties_dir: self.properties_dir.clone(),
            test_dir: self.test_dir.clone(),
            log_dir: self.log_dir.clone(),
            staging_dir: self.staging_dir.clone(),
            defines: self.defines.clone(),
            no_filtering: self.no_filtering,
            daemon: self.daemon,
            daemon_period_ms: self.daemon_period,
        }
    }
}

/// Arguments for the configure command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Stage the configuration found under src/grinder/config:\n    grinderctl configure --test-dir src/test/jython\n\n\
                   Override a property:\n    grinderctl configure -D grinder.threads=10\n\n\
                   Print the resolved configuration as JSON:\n    grinderctl configure --json")]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub flags: RunFlags,

    /// Print the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,
}
