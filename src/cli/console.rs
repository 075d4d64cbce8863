use clap::Parser;

use super::configure::RunFlags;

/// Arguments for the console command
#[derive(Parser, Debug)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub flags: RunFlags,

    /// Start the console without its user interface
    #[arg(long)]
    pub headless: bool,

    /// Print the command line instead of launching the console
    #[arg(long)]
    pub dry_run: bool,
}
