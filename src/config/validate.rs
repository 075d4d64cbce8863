//! Validation of a resolved configuration against the file system
//!
//! Checks run in order and stop at the first failure:
//! 1. `grinder.script` is set
//! 2. the script exists below the test script root
//! 3. the log directory exists or can be created

use std::path::{Path, PathBuf};

use tracing::debug;

use super::merge::ResolvedConfiguration;
use crate::common::fs::ensure_dir;
use crate::common::path_normalizer::to_normalized_str;
use crate::error::{Result, config, resource};

pub const SCRIPT_KEY: &str = "grinder.script";
pub const LOG_DIRECTORY_KEY: &str = "grinder.logDirectory";

/// A configuration whose script and log directory have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfiguration {
    /// Resolved configuration with `grinder.logDirectory` filled in
    pub configuration: ResolvedConfiguration,
    /// Script name as declared by `grinder.script`
    pub script_name: String,
    /// Location of the script below the test script root
    pub script_path: PathBuf,
    pub log_dir: PathBuf,
}

pub fn validate(
    configuration: ResolvedConfiguration,
    test_dir: &Path,
    log_dir: &Path,
) -> Result<ValidatedConfiguration> {
    let script_name = configuration
        .get(SCRIPT_KEY)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| config::incomplete(SCRIPT_KEY))?
        .to_string();

    let script_path = test_dir.join(&script_name);
    if !script_path.is_file() {
        return Err(resource::not_found(script_path.display().to_string()));
    }
    debug!(script = %script_path.display(), "grinder test script");

    if log_dir.exists() && !log_dir.is_dir() {
        return Err(resource::unavailable(
            log_dir.display().to_string(),
            "not a directory",
        ));
    }
    ensure_dir(log_dir)
        .map_err(|e| resource::unavailable(log_dir.display().to_string(), e.to_string()))?;
    debug!(log_dir = %log_dir.display(), "grinder log directory");

    let mut configuration = configuration;
    configuration.properties = configuration
        .properties
        .with(LOG_DIRECTORY_KEY, to_normalized_str(log_dir));

    Ok(ValidatedConfiguration {
        configuration,
        script_name,
        script_path,
        log_dir: log_dir.to_path_buf(),
    })
}
