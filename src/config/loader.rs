//! Locating and loading the grinder properties file
//!
//! The properties file is either named explicitly or discovered as the only
//! `.properties` file in a configured directory. More than one candidate is an
//! error: candidates are never merged.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, config, resource};
use crate::properties::{self, PlaceholderFilter, Properties};

/// Suffix a properties file must carry
pub const PROPERTIES_SUFFIX: &str = ".properties";

/// Where the properties file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySource {
    /// An explicit file, loaded without enumeration
    File(PathBuf),
    /// A directory expected to hold exactly one properties file
    Directory(PathBuf),
}

/// Properties read from a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProperties {
    pub path: PathBuf,
    pub properties: Properties,
}

fn has_properties_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(PROPERTIES_SUFFIX) && name.len() > PROPERTIES_SUFFIX.len())
}

/// Resolve the single properties file named by `source` without reading it.
pub fn locate(source: &PropertySource) -> Result<PathBuf> {
    match source {
        PropertySource::File(path) => {
            if !path.exists() {
                return Err(config::missing(path.display().to_string()));
            }
            if !path.is_file() || !has_properties_suffix(path) {
                return Err(config::malformed(
                    path.display().to_string(),
                    format!("expected a {PROPERTIES_SUFFIX} file"),
                ));
            }
            Ok(path.clone())
        }
        PropertySource::Directory(dir) => find_candidate(dir),
    }
}

fn find_candidate(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(config::missing(dir.display().to_string()));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry
            .map_err(|e| resource::unavailable(dir.display().to_string(), e.to_string()))?;
        if entry.file_type().is_file() && has_properties_suffix(entry.path()) {
            candidates.push(entry.into_path());
        }
    }

    match candidates.len() {
        0 => Err(config::missing(format!(
            "{} (no {PROPERTIES_SUFFIX} file)",
            dir.display()
        ))),
        1 => Ok(candidates.remove(0)),
        _ => Err(config::ambiguous(
            dir.display().to_string(),
            candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy()),
        )),
    }
}

fn read_properties(path: &Path, filter: Option<&PlaceholderFilter>) -> Result<Properties> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => config::missing(path.display().to_string()),
        _ => resource::unavailable(path.display().to_string(), e.to_string()),
    })?;

    let text = properties::decode_latin1(&bytes);
    let text = match filter {
        Some(filter) => filter.interpolate(&text),
        None => text,
    };

    properties::parse(&text)
        .map_err(|e| config::malformed(path.display().to_string(), e.to_string()))
}

/// Locate and parse the properties file. With a filter, placeholders in the
/// file text are substituted before parsing.
pub fn load(source: &PropertySource, filter: Option<&PlaceholderFilter>) -> Result<LoadedProperties> {
    let path = locate(source)?;
    debug!(path = %path.display(), filtered = filter.is_some(), "loading grinder properties");

    let properties = read_properties(&path, filter)?;
    debug!(entries = properties.len(), "grinder properties loaded");

    Ok(LoadedProperties { path, properties })
}
