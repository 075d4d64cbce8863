//! TCP proxy command implementation
//!
//! Assembles both filter chains and prints the startup summary. The proxy
//! engine itself runs outside this tool.

use std::path::PathBuf;

use super::helpers::resolve_settings;
use crate::cli::{RunFlags, TcpProxyArgs};
use crate::error::Result;
use crate::proxy;

/// Run tcpproxy command
pub fn run(project: Option<PathBuf>, manifest: Option<PathBuf>, args: TcpProxyArgs) -> Result<()> {
    let settings = resolve_settings(project.as_deref(), manifest.as_deref(), &RunFlags::default())?;
    let session = proxy::prepare(&args.tokens, &settings.project_dir, &settings.tcpproxy_dir)?;

    println!("{}", session.startup_summary());
    println!(
        "   Filter keys:        {}",
        session
            .request_filter
            .keys()
            .into_iter()
            .chain(session.response_filter.keys())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
