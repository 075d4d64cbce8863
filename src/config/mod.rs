//! Grinder run configuration
//!
//! This module contains the resolution pipeline, leaves first:
//! - [`loader`]: locate and parse the single properties file
//! - [`merge`]: overlay overrides and derive classpath and agent argument
//! - [`validate`]: check the test script and log directory
//! - [`staging`]: write the configuration and script into the staging directory
//!
//! and the inputs feeding it:
//! - [`manifest`]: `grinder.yaml`, the build-tool surface
//! - [`settings`]: defaults, manifest and flags layered into [`RunSettings`]

pub mod artifact;
pub mod loader;
pub mod manifest;
pub mod merge;
pub mod overrides;
pub mod settings;
pub mod staging;
pub mod validate;

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

pub use artifact::{Artifact, LocalRepository};
pub use loader::PropertySource;
pub use manifest::Manifest;
pub use merge::ResolvedConfiguration;
pub use overrides::OverrideMap;
pub use settings::{DaemonOption, RunSettings, SettingsOverrides};
pub use staging::StagingLayout;
pub use validate::ValidatedConfiguration;

use crate::error::Result;

/// Outcome of a successful configuration run, ready for the launcher.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedRun {
    /// Properties file the configuration was loaded from
    pub source: PathBuf,
    pub configuration: ResolvedConfiguration,
    pub script: PathBuf,
    pub log_dir: PathBuf,
    pub layout: StagingLayout,
}

/// Load, merge, validate and stage. Nothing is written unless every earlier
/// stage succeeds.
pub fn configure(settings: &RunSettings) -> Result<PreparedRun> {
    let test_dir = settings.require_test_dir()?;

    let filter = settings.placeholder_filter();
    let loaded = loader::load(&settings.properties_source, filter.as_ref())?;
    info!(path = %loaded.path.display(), "grinder properties loaded");

    debug!(
        overrides = settings.overrides.len(),
        artifacts = settings.artifacts.len(),
        "merging configuration"
    );
    let resolved = merge::merge(
        &loaded.properties,
        &settings.overrides,
        &settings.artifacts,
        &settings.local_repository,
    );

    let validated = validate::validate(resolved, test_dir, &settings.log_dir)?;
    let layout = staging::stage(&validated, &settings.staging_dir)?;

    let ValidatedConfiguration {
        configuration,
        script_path,
        log_dir,
        ..
    } = validated;

    Ok(PreparedRun {
        source: loaded.path,
        configuration,
        script: script_path,
        log_dir,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrinderError;
    use crate::test_fixtures::{create_temp_dir, create_test_files};

    fn settings(root: &std::path::Path, manifest: &str) -> RunSettings {
        let manifest = Manifest::from_yaml(manifest).unwrap();
        RunSettings::resolve(root, &manifest, &SettingsOverrides::default()).unwrap()
    }

    #[test]
    fn test_configure_end_to_end() {
        let temp = create_temp_dir();
        create_test_files(
            &temp,
            &[
                (
                    "src/grinder/config/grinder.properties",
                    "grinder.script=smoke.py\ngrinder.threads=1\ngrinder.host=${host}\n",
                ),
                ("src/test/jython/smoke.py", "print 'smoke'\n"),
            ],
        );
        let settings = settings(
            temp.path(),
            "test_dir: src/test/jython\nlocal_repository: /m2\nfilters:\n  host: example.org\nproperties:\n  grinder.threads: 4\n  sonar.skip: true\nartifacts:\n  - {group: net.sourceforge.grinder, artifact: grinder-dcr-agent, version: '3.11', file: /jars/agent.jar}\n",
        );

        let run = configure(&settings).unwrap();

        assert_eq!(run.configuration.get("grinder.threads"), Some("4"));
        assert_eq!(run.configuration.get("grinder.host"), Some("example.org"));
        assert_eq!(run.configuration.get("sonar.skip"), None);
        assert_eq!(run.configuration.classpath(), Some("/jars/agent.jar"));
        assert!(
            run.configuration
                .jvm_arguments()
                .unwrap()
                .starts_with("-javaagent:/m2/net/sourceforge/grinder/grinder-dcr-agent/3.11/")
        );
        assert!(run.layout.properties_file.is_file());
        assert!(temp.path().join("target/grinder/config/smoke.py").is_file());
        assert!(temp.path().join("target/grinder/log_files").is_dir());
    }

    #[test]
    fn test_failure_before_staging_writes_nothing() {
        let temp = create_temp_dir();
        create_test_files(
            &temp,
            &[(
                "src/grinder/config/grinder.properties",
                "grinder.script=missing.py\n",
            )],
        );
        std::fs::create_dir_all(temp.path().join("tests")).unwrap();

        let err = configure(&settings(temp.path(), "test_dir: tests\n")).unwrap_err();
        assert!(matches!(err, GrinderError::ResourceNotFound { .. }));
        assert!(!temp.path().join("target/grinder/config").exists());
    }

    #[test]
    fn test_configure_requires_test_dir() {
        let temp = create_temp_dir();
        let err = configure(&settings(temp.path(), "")).unwrap_err();
        assert!(matches!(err, GrinderError::ConfigurationIncomplete { .. }));
    }
}
