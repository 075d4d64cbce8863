//! Run manifest (grinder.yaml) data structures
//!
//! The manifest plays the part of the embedding build tool: it names the
//! configuration directories, supplies property overrides and lists the
//! resolved dependency artifacts.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use super::artifact::Artifact;
use super::overrides::OverrideMap;
use crate::error::{Result, config};

/// File name of the manifest at the project root
pub const MANIFEST_FILE: &str = "grinder.yaml";

/// Run manifest from grinder.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Explicit properties file, bypassing directory enumeration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_dir: Option<PathBuf>,

    /// Root directory of the test scripts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcpproxy_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,

    /// Whether `${...}` placeholders in the properties file are expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtering: Option<bool>,

    /// Placeholder values used when filtering
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, Value>,

    /// Property overrides; only `grinder.` keys take effect
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,

    /// Resolved dependency artifacts, in classpath order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daemon: Option<DaemonSettings>,

    /// JVM launcher program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java: Option<String>,
}

/// Agent daemon settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonSettings {
    #[serde(default)]
    pub enabled: bool,

    /// Sleep period between agent runs in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_ms: Option<i64>,
}

/// Render a scalar YAML value as a property string.
///
/// `Ok(None)` for null; sequences, mappings and tagged values are rejected.
fn scalar_to_string(key: &str, value: &Value) -> std::result::Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
            Err(format!("value of '{key}' must be a scalar"))
        }
    }
}

impl Manifest {
    fn parse(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Parse a manifest from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Self::parse(yaml)?)
    }

    /// Load the manifest at `path`; a missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => config::missing(path.display().to_string()),
            _ => config::malformed(path.display().to_string(), e.to_string()),
        })?;
        debug!(manifest = %path.display(), "loading run manifest");

        Self::parse(&text).map_err(|e| config::malformed(path.display().to_string(), e.to_string()))
    }

    /// Load the manifest at `path`, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(manifest = %path.display(), "no run manifest, using defaults");
            Ok(Self::default())
        }
    }

    /// Override map built from the `properties` table
    pub fn overrides(&self) -> Result<OverrideMap> {
        self.properties
            .iter()
            .map(|(key, value)| {
                scalar_to_string(key, value)
                    .map(|value| (key.clone(), value))
                    .map_err(|reason| config::malformed(MANIFEST_FILE, reason))
            })
            .collect()
    }

    /// Placeholder values from the `filters` table; null entries are dropped.
    pub fn filter_values(&self) -> Result<BTreeMap<String, String>> {
        let mut values = BTreeMap::new();
        for (key, value) in &self.filters {
            let value = scalar_to_string(key, value)
                .map_err(|reason| config::malformed(MANIFEST_FILE, reason))?;
            if let Some(value) = value {
                values.insert(key.clone(), value);
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrinderError;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_empty_manifest_is_default() {
        assert_eq!(Manifest::from_yaml("").unwrap(), Manifest::default());
        assert_eq!(Manifest::from_yaml("  \n").unwrap(), Manifest::default());
    }

    #[test]
    fn test_full_manifest() {
        let yaml = r#"
path: conf/grinder.properties
test_dir: src/test/jython
log_dir: out/logs
local_repository: /opt/m2
filtering: false
filters:
  host: example.org
properties:
  grinder.threads: 8
  grinder.useConsole: false
  grinder.runs: ~
  project.version: "1.0"
artifacts:
  - group: net.sourceforge.grinder
    artifact: grinder-dcr-agent
    version: "3.11"
    file: /jars/grinder-dcr-agent-3.11.jar
daemon:
  enabled: true
  period_ms: 5000
java: /usr/bin/java
"#;
        let manifest = Manifest::from_yaml(yaml).unwrap();
        assert_eq!(manifest.path, Some(PathBuf::from("conf/grinder.properties")));
        assert_eq!(manifest.filtering, Some(false));
        assert_eq!(manifest.artifacts.len(), 1);
        assert_eq!(manifest.artifacts[0].classifier(), None);
        assert_eq!(
            manifest.daemon,
            Some(DaemonSettings {
                enabled: true,
                period_ms: Some(5000),
            })
        );

        let overrides = manifest.overrides().unwrap();
        assert_eq!(overrides.len(), 4);
        assert_eq!(
            overrides.eligible().collect::<Vec<_>>(),
            vec![("grinder.threads", "8"), ("grinder.useConsole", "false")]
        );
        assert_eq!(
            manifest.filter_values().unwrap().get("host").map(String::as_str),
            Some("example.org")
        );
    }

    #[test]
    fn test_structured_override_is_malformed() {
        let manifest = Manifest::from_yaml("properties:\n  grinder.hosts: [a, b]\n").unwrap();
        let err = manifest.overrides().unwrap_err();
        assert!(matches!(err, GrinderError::ConfigurationMalformed { .. }));
        assert!(err.to_string().contains("grinder.hosts"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Manifest::from_yaml("test_dirr: src\n").is_err());
    }

    #[test]
    fn test_load_missing_explicit_manifest() {
        let temp = create_temp_dir();
        let err = Manifest::load(&temp.path().join(MANIFEST_FILE)).unwrap_err();
        assert!(matches!(err, GrinderError::ConfigurationMissing { .. }));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp = create_temp_dir();
        let manifest = Manifest::load_or_default(&temp.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_load_reports_path_on_bad_yaml() {
        let temp = create_temp_dir();
        let path = temp.path().join(MANIFEST_FILE);
        std::fs::write(&path, "artifacts: [unclosed").unwrap();

        match Manifest::load(&path).unwrap_err() {
            GrinderError::ConfigurationMalformed { path: reported, .. } => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("Expected ConfigurationMalformed, got {other:?}"),
        }
    }
}
