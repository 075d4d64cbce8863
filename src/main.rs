//! grinderctl - configure and launch The Grinder
//!
//! Resolves a Grinder run configuration from a properties file, manifest
//! overrides and resolved artifacts, stages it for the agent, and assembles
//! the TCP proxy filter chains.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod launcher;
mod logging;
mod properties;
mod proxy;
#[cfg(test)]
mod temp;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Configure(args) => commands::configure::run(cli.project, cli.manifest, args),
        Commands::Agent(args) => commands::agent::run(cli.project, cli.manifest, args),
        Commands::Console(args) => commands::console::run(cli.project, cli.manifest, args),
        Commands::Tcpproxy(args) => commands::tcpproxy::run(cli.project, cli.manifest, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        logging::report(&e);
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
