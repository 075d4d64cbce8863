//! Overlaying build-tool overrides and deriving JVM settings
//!
//! Every function here is pure: inputs are borrowed, a new value is returned,
//! and nothing touches the file system.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use super::artifact::{Artifact, LocalRepository};
use super::overrides::OverrideMap;
use crate::common::path_normalizer::to_normalized_str;
use crate::properties::Properties;

pub const CLASSPATH_KEY: &str = "grinder.jvm.classpath";
pub const JVM_ARGUMENTS_KEY: &str = "grinder.jvm.arguments";

/// Artifact id prefix identifying the instrumentation agent
pub const AGENT_ARTIFACT_PREFIX: &str = "grinder-dcr-agent";

const JAVAAGENT_FLAG: &str = "-javaagent:";

#[cfg(windows)]
pub const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const PATH_SEPARATOR: &str = ":";

/// File properties merged with overrides and derived JVM settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    pub properties: Properties,
    /// Artifact files in resolution order, duplicates kept
    pub classpath_entries: Vec<PathBuf>,
    /// `-javaagent:<path>` when an instrumentation artifact was found
    pub agent_argument: Option<String>,
}

impl ResolvedConfiguration {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    pub fn classpath(&self) -> Option<&str> {
        self.properties.get(CLASSPATH_KEY)
    }

    pub fn jvm_arguments(&self) -> Option<&str> {
        self.properties.get(JVM_ARGUMENTS_KEY)
    }
}

/// Overlay eligible overrides onto `raw`; an override always wins.
pub fn overlay(raw: &Properties, overrides: &OverrideMap) -> Properties {
    let mut merged = raw.clone();
    for (key, value) in overrides.eligible() {
        debug!(key, value, "applying property override");
        merged.insert(key, value);
    }
    for key in overrides.ignored_keys() {
        debug!(key, "ignoring override outside the grinder namespace");
    }
    merged
}

/// Join artifact files into a classpath string, preserving order.
pub fn classpath(artifacts: &[Artifact]) -> String {
    artifacts
        .iter()
        .map(|a| to_normalized_str(&a.file))
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

/// `-javaagent:` flag for the first instrumentation artifact, if any.
pub fn agent_argument(artifacts: &[Artifact], repository: &LocalRepository) -> Option<String> {
    artifacts
        .iter()
        .find(|a| a.artifact.starts_with(AGENT_ARTIFACT_PREFIX))
        .map(|agent| {
            let path = to_normalized_str(&repository.artifact_path(agent));
            format!("{JAVAAGENT_FLAG}{path}")
        })
}

/// Append `flag` to an existing space-separated argument list.
fn append_argument(existing: Option<&str>, flag: &str) -> String {
    match existing {
        Some(existing) if !existing.is_empty() => format!("{existing} {flag}"),
        _ => flag.to_string(),
    }
}

/// Merge file properties, overrides and artifacts into a resolved configuration.
pub fn merge(
    raw: &Properties,
    overrides: &OverrideMap,
    artifacts: &[Artifact],
    repository: &LocalRepository,
) -> ResolvedConfiguration {
    let mut properties = overlay(raw, overrides);

    let classpath = classpath(artifacts);
    debug!(%classpath, "grinder JVM classpath");
    properties.insert(CLASSPATH_KEY, classpath);

    let agent_argument = agent_argument(artifacts, repository);
    if let Some(flag) = &agent_argument {
        let arguments = append_argument(properties.get(JVM_ARGUMENTS_KEY), flag);
        debug!(%arguments, "grinder JVM arguments");
        properties.insert(JVM_ARGUMENTS_KEY, arguments);
    }

    ResolvedConfiguration {
        properties,
        classpath_entries: artifacts.iter().map(|a| a.file.clone()).collect(),
        agent_argument,
    }
}
