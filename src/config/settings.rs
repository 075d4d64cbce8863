//! Effective run settings
//!
//! Layered lowest to highest: built-in defaults, the run manifest, then
//! command line flags. Relative paths resolve against the project directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::artifact::{Artifact, LocalRepository};
use super::loader::PropertySource;
use super::manifest::{DaemonSettings, Manifest};
use super::overrides::OverrideMap;
use crate::common::path_normalizer::resolve_against;
use crate::error::{Result, config};
use crate::properties::PlaceholderFilter;

pub const DEFAULT_PROPERTIES_DIR: &str = "src/grinder/config";
pub const DEFAULT_LOG_DIR: &str = "target/grinder/log_files";
pub const DEFAULT_STAGING_DIR: &str = "target/grinder/config";
pub const DEFAULT_TCPPROXY_DIR: &str = "target/grinder/tcpproxy";
pub const DEFAULT_JAVA: &str = "java";
pub const DEFAULT_DAEMON_PERIOD_MS: u64 = 60_000;

/// Agent daemon mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonOption {
    pub enabled: bool,
    pub period_ms: u64,
}

impl Default for DaemonOption {
    fn default() -> Self {
        Self {
            enabled: false,
            period_ms: DEFAULT_DAEMON_PERIOD_MS,
        }
    }
}

impl DaemonOption {
    /// Non-positive or absent periods fall back to the default.
    pub fn effective_period(period_ms: Option<i64>) -> u64 {
        period_ms
            .and_then(|p| u64::try_from(p).ok())
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_DAEMON_PERIOD_MS)
    }

    /// Period in whole seconds, at least one.
    pub fn period_seconds(&self) -> u64 {
        (self.period_ms / 1000).max(1)
    }
}

impl From<&DaemonSettings> for DaemonOption {
    fn from(settings: &DaemonSettings) -> Self {
        Self {
            enabled: settings.enabled,
            period_ms: Self::effective_period(settings.period_ms),
        }
    }
}

/// Values given on the command line, each overriding the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub properties_file: Option<PathBuf>,
    pub properties_dir: Option<PathBuf>,
    pub test_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub staging_dir: Option<PathBuf>,
    /// `-D key=value` definitions, extending the manifest overrides
    pub defines: Vec<(String, String)>,
    pub no_filtering: bool,
    pub daemon: bool,
    pub daemon_period_ms: Option<i64>,
}

/// Fully layered settings for one run
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub project_dir: PathBuf,
    pub properties_source: PropertySource,
    pub test_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub tcpproxy_dir: PathBuf,
    pub local_repository: LocalRepository,
    pub filtering: bool,
    pub filters: BTreeMap<String, String>,
    pub overrides: OverrideMap,
    pub artifacts: Vec<Artifact>,
    pub daemon: DaemonOption,
    pub java: String,
}

/// Canonical project directory, defaulting to the current directory.
pub fn resolve_project_dir(project: Option<&Path>) -> Result<PathBuf> {
    let dir = match project {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    if !dir.is_dir() {
        return Err(config::missing(dir.display().to_string()));
    }
    Ok(dunce::canonicalize(&dir)?)
}

impl RunSettings {
    pub fn resolve(project_dir: &Path, manifest: &Manifest, cli: &SettingsOverrides) -> Result<Self> {
        let path = |cli_value: &Option<PathBuf>, manifest_value: &Option<PathBuf>, default: &str| {
            let chosen = cli_value
                .clone()
                .or_else(|| manifest_value.clone())
                .unwrap_or_else(|| PathBuf::from(default));
            resolve_against(project_dir, &chosen)
        };

        let properties_source = match cli.properties_file.as_ref().or(manifest.path.as_ref()) {
            Some(file) => PropertySource::File(resolve_against(project_dir, file)),
            None => PropertySource::Directory(path(
                &cli.properties_dir,
                &manifest.properties_dir,
                DEFAULT_PROPERTIES_DIR,
            )),
        };

        let test_dir = cli
            .test_dir
            .as_ref()
            .or(manifest.test_dir.as_ref())
            .map(|dir| resolve_against(project_dir, dir));

        let local_repository = manifest
            .local_repository
            .as_ref()
            .map(|root| LocalRepository::new(resolve_against(project_dir, root)))
            .unwrap_or_else(LocalRepository::default_location);

        let mut overrides = manifest.overrides()?;
        overrides.extend(cli.defines.iter().map(|(k, v)| (k.clone(), Some(v.clone()))));

        let artifacts = manifest
            .artifacts
            .iter()
            .map(|artifact| Artifact {
                file: resolve_against(project_dir, &artifact.file),
                ..artifact.clone()
            })
            .collect();

        let mut daemon = manifest
            .daemon
            .as_ref()
            .map(DaemonOption::from)
            .unwrap_or_default();
        if cli.daemon {
            daemon.enabled = true;
        }
        if cli.daemon_period_ms.is_some() {
            daemon.period_ms = DaemonOption::effective_period(cli.daemon_period_ms);
        }

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            properties_source,
            test_dir,
            log_dir: path(&cli.log_dir, &manifest.log_dir, DEFAULT_LOG_DIR),
            staging_dir: path(&cli.staging_dir, &manifest.staging_dir, DEFAULT_STAGING_DIR),
            tcpproxy_dir: path(&None, &manifest.tcpproxy_dir, DEFAULT_TCPPROXY_DIR),
            local_repository,
            filtering: !cli.no_filtering && manifest.filtering.unwrap_or(true),
            filters: manifest.filter_values()?,
            overrides,
            artifacts,
            daemon,
            java: manifest.java.clone().unwrap_or_else(|| DEFAULT_JAVA.to_string()),
        })
    }

    /// The test script root, which has no default.
    pub fn require_test_dir(&self) -> Result<&Path> {
        self.test_dir
            .as_deref()
            .ok_or_else(|| config::incomplete("test_dir"))
    }

    /// Placeholder filter for the loader, when filtering is enabled.
    pub fn placeholder_filter(&self) -> Option<PlaceholderFilter> {
        self.filtering
            .then(|| PlaceholderFilter::new(self.filters.clone()))
    }
}
