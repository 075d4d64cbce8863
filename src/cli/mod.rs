//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - configure: Configure command arguments and the shared run flags
//! - agent: Agent command arguments
//! - console: Console command arguments
//! - tcpproxy: TCP proxy pass-through tokens
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod agent;
pub mod completions;
pub mod configure;
pub mod console;
pub mod tcpproxy;

pub use agent::AgentArgs;
pub use completions::CompletionsArgs;
pub use configure::{ConfigureArgs, RunFlags};
pub use console::ConsoleArgs;
pub use tcpproxy::TcpProxyArgs;

/// grinderctl - configure and launch The Grinder
#[derive(Parser, Debug)]
#[command(
    name = "grinderctl",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Configure, stage and launch The Grinder load-testing toolchain",
    long_about = "grinderctl resolves a run configuration for The Grinder from a properties \
                  file, grinder.yaml overrides and resolved artifacts, stages it for the agent, \
                  and launches the agent, the console or the TCP proxy.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  grinderctl configure                          \x1b[90m# Resolve and stage the configuration\x1b[0m\n   \
                  grinderctl agent --dry-run                    \x1b[90m# Show the agent command line\x1b[0m\n   \
                  grinderctl console --headless                 \x1b[90m# Start a headless console\x1b[0m\n   \
                  grinderctl tcpproxy -requestfilter NONE       \x1b[90m# Assemble the proxy filters\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "GRINDERCTL_PROJECT")]
    pub project: Option<PathBuf>,

    /// Run manifest (defaults to <project>/grinder.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve, validate and stage the run configuration
    Configure(ConfigureArgs),

    /// Stage the configuration and start a Grinder agent
    Agent(AgentArgs),

    /// Stage the configuration and start the Grinder console
    Console(ConsoleArgs),

    /// Assemble the TCP proxy filter chains
    #[command(name = "tcpproxy")]
    Tcpproxy(TcpProxyArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing_configure() {
        let cli = Cli::try_parse_from(["grinderctl", "configure"]).unwrap();
        assert!(matches!(cli.command, Commands::Configure(_)));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["grinderctl", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "grinderctl",
            "-v",
            "-C",
            "/tmp/project",
            "--manifest",
            "load.yaml",
            "configure",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.manifest, Some(PathBuf::from("load.yaml")));
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["grinderctl", "console", "--dry-run", "-C", "/tmp/p"]).unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/p")));
        match cli.command {
            Commands::Console(args) => {
                assert!(args.dry_run);
                assert!(!args.headless);
            }
            _ => panic!("Expected Console command"),
        }
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["grinderctl", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_long_help_names_the_grinder() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("The Grinder"));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["grinderctl"]).is_err());
    }
}
