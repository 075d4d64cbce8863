//! TCP proxy filter assembly
//!
//! Turns the proxy's command line tokens into two composed filters, one per
//! direction, ready to be handed to a proxy engine:
//! - [`args`]: option parsing and the startup summary
//! - [`chain`]: filter tokens, per-direction chains and composition
//! - [`catalog`]: name to constructor lookup with injected collaborators
//! - [`filter`]: the filter capability and the built-in filters
//! - [`comments`]: comment sink shared with recording filters

pub mod args;
pub mod catalog;
pub mod chain;
pub mod comments;
pub mod connection;
pub mod filter;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

pub use args::{ProxyMode, ProxyOptions};
pub use catalog::{FilterDeps, TypeCatalog};
pub use chain::{ComposedFilter, Direction, FilterChain, FilterToken};
pub use comments::{CommentLog, CommentSource};
pub use connection::{ConnectionDetails, EndPoint};
pub use filter::{Filter, FilterOutput};

use crate::error::{Result, resource};

/// File recorded filter output is written to, inside the proxy directory
pub const OUTPUT_FILE: &str = "grinder.py";

/// Everything the proxy engine needs, fully resolved
#[derive(Debug)]
pub struct ProxySession {
    pub options: ProxyOptions,
    pub request_filter: ComposedFilter,
    pub response_filter: ComposedFilter,
    pub comments: Arc<dyn CommentSource>,
}

impl ProxySession {
    /// Resolve both chains against `catalog`. Either chain failing yields no
    /// session.
    pub fn assemble(
        options: ProxyOptions,
        catalog: &TypeCatalog,
        output: FilterOutput,
    ) -> Result<Self> {
        let comments: Arc<dyn CommentSource> = Arc::new(CommentLog::new());
        let properties = options.load_filter_properties()?;
        debug!(entries = properties.len(), "filter properties");

        let deps = FilterDeps {
            output,
            comments: Arc::clone(&comments),
            properties,
            direction: Direction::Request,
        };

        let request_filter = options.request_filters.resolve(catalog, &deps)?;
        let response_filter = options.response_filters.resolve(catalog, &deps)?;

        Ok(Self {
            options,
            request_filter,
            response_filter,
            comments,
        })
    }

    pub fn startup_summary(&self) -> String {
        self.options.startup_summary(
            &self.request_filter.to_string(),
            &self.response_filter.to_string(),
        )
    }
}

/// Parse `tokens`, assemble the filters with the built-in catalog and log
/// the startup summary. Relative paths in the options resolve against
/// `project_dir`; filter output goes to `<output_dir>/grinder.py`.
pub fn prepare<S: AsRef<str>>(
    tokens: &[S],
    project_dir: &Path,
    output_dir: &Path,
) -> Result<ProxySession> {
    let mut options = ProxyOptions::parse(tokens)?;
    options.resolve_paths(project_dir);
    let catalog = TypeCatalog::with_builtins()?;

    let output_path = output_dir.join(OUTPUT_FILE);
    let output = FilterOutput::create(&output_path)
        .map_err(|e| resource::unavailable(output_path.display().to_string(), e.to_string()))?;
    debug!(output = %output_path.display(), "proxy filter output");

    let session = ProxySession::assemble(options, &catalog, output)?;
    info!("{}", session.startup_summary());
    Ok(session)
}
