use clap::Parser;

use super::configure::RunFlags;

/// Arguments for the agent command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Stage and start an agent:\n    grinderctl agent\n\n\
                   Show the java command line without running it:\n    grinderctl agent --dry-run\n\n\
                   Run as a daemon, reconnecting every 30 seconds:\n    grinderctl agent --daemon --daemon-period 30000")]
pub struct AgentArgs {
    #[command(flatten)]
    pub flags: RunFlags,

    /// Print the command line instead of launching the agent
    #[arg(long)]
    pub dry_run: bool,
}
