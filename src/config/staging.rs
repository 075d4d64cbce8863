//! Materializing a validated configuration into the staging directory
//!
//! Files are rewritten on every run. A failure leaves whatever was already
//! written in place.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::validate::ValidatedConfiguration;
use crate::common::fs::{copy_lines, ensure_dir, ensure_parent_dir, is_same_file, write_file};
use crate::error::{Result, staging};
use crate::properties;

/// Name of the staged properties file
pub const AGENT_PROPERTIES_FILE: &str = "grinder_agent.properties";

const PROPERTIES_HEADER: &str = "Grinder Agent Properties";

/// Files written into the staging directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagingLayout {
    pub dir: PathBuf,
    pub properties_file: PathBuf,
    pub script_file: Option<PathBuf>,
}

/// Destination of the script inside `dir`.
///
/// Plain relative names keep their sub-directories; absolute names or names
/// climbing out with `..` are staged under their file name only.
fn script_destination(dir: &Path, script_name: &str) -> Option<PathBuf> {
    let name = Path::new(script_name);
    let contained = name
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if contained {
        Some(dir.join(name))
    } else {
        name.file_name().map(|file_name| dir.join(file_name))
    }
}

pub fn stage(validated: &ValidatedConfiguration, dir: &Path) -> Result<StagingLayout> {
    let properties_file = dir.join(AGENT_PROPERTIES_FILE);
    let script_destination = script_destination(dir, &validated.script_name);
    if script_destination.as_deref() == Some(properties_file.as_path()) {
        return Err(staging::failed(
            properties_file.display().to_string(),
            format!("script '{}' would overwrite the staged properties", validated.script_name),
        ));
    }

    ensure_dir(dir).map_err(|e| staging::failed(dir.display().to_string(), e.to_string()))?;

    let contents = properties::store(&validated.configuration.properties, PROPERTIES_HEADER);
    write_file(&properties_file, &contents)
        .map_err(|e| staging::failed(properties_file.display().to_string(), e.to_string()))?;
    debug!(file = %properties_file.display(), "staged grinder properties");

    let script_file = match script_destination {
        Some(destination) if is_same_file(&validated.script_path, &destination) => {
            debug!(file = %destination.display(), "test script already in the staging directory");
            Some(destination)
        }
        Some(destination) => {
            ensure_parent_dir(&destination)
                .and_then(|()| copy_lines(&validated.script_path, &destination))
                .map_err(|e| staging::failed(destination.display().to_string(), e.to_string()))?;
            debug!(file = %destination.display(), "staged test script");
            Some(destination)
        }
        None => None,
    };

    info!(dir = %dir.display(), "grinder configuration staged");

    Ok(StagingLayout {
        dir: dir.to_path_buf(),
        properties_file,
        script_file,
    })
}
