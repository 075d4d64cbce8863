//! Error types and handling for grinderctl
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Properties file and manifest errors
//! - [`resource`]: Test script and log directory errors
//! - [`staging`]: Staging directory errors
//! - [`filter`]: Filter chain resolution errors
//! - [`usage`]: Command line usage errors
//! - [`launch`]: Downstream process errors

pub mod config;
pub mod filter;
pub mod launch;
pub mod resource;
pub mod staging;
pub mod usage;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for grinderctl operations
#[derive(Error, Diagnostic, Debug)]
pub enum GrinderError {
    // Configuration errors
    #[error("Configuration not found: {path}")]
    #[diagnostic(
        code(grinderctl::config::missing),
        help("Provide a grinder properties file or set 'path' in grinder.yaml")
    )]
    ConfigurationMissing { path: String },

    #[error("Ambiguous configuration in {dir}: found {candidates}")]
    #[diagnostic(
        code(grinderctl::config::ambiguous),
        help("Keep exactly one .properties file in the directory or pass --properties")
    )]
    ConfigurationAmbiguous { dir: String, candidates: String },

    #[error("Malformed configuration {path}: {reason}")]
    #[diagnostic(code(grinderctl::config::malformed))]
    ConfigurationMalformed { path: String, reason: String },

    #[error("Configuration is missing required key '{key}'")]
    #[diagnostic(code(grinderctl::config::incomplete))]
    ConfigurationIncomplete { key: String },

    // Resource errors
    #[error("Resource not found: {path}")]
    #[diagnostic(code(grinderctl::resource::not_found))]
    ResourceNotFound { path: String },

    #[error("Resource unavailable: {path}: {reason}")]
    #[diagnostic(code(grinderctl::resource::unavailable))]
    ResourceUnavailable { path: String, reason: String },

    // Staging errors
    #[error("Failed to stage {path}: {reason}")]
    #[diagnostic(code(grinderctl::staging::failed))]
    StagingFailed { path: String, reason: String },

    // Filter errors
    #[error("Class '{name}' not found.")]
    #[diagnostic(
        code(grinderctl::filter::class_not_found),
        help("Use NONE, ECHO or the name of a filter registered with the proxy")
    )]
    FilterClassNotFound { name: String },

    #[error("The class '{name}' does not implement the filter interface.")]
    #[diagnostic(code(grinderctl::filter::type_mismatch))]
    FilterTypeMismatch { name: String },

    #[error("Filter type '{name}' is already registered")]
    #[diagnostic(code(grinderctl::filter::duplicate))]
    DuplicateFilterType { name: String },

    // Usage errors
    #[error("{message}")]
    #[diagnostic(
        code(grinderctl::usage),
        help("Run 'grinderctl tcpproxy --help' for the accepted options")
    )]
    UsageError { message: String },

    // Launch errors
    #[error("Failed to launch {program}: {reason}")]
    #[diagnostic(code(grinderctl::launch::failed))]
    LaunchFailed { program: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(grinderctl::io_error))]
    IoError { message: String },
}

impl GrinderError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            GrinderError::UsageError { .. } => 2,
            _ => 1,
        }
    }

    /// Errors raised while resolving or staging the run configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GrinderError::ConfigurationMissing { .. }
                | GrinderError::ConfigurationAmbiguous { .. }
                | GrinderError::ConfigurationMalformed { .. }
                | GrinderError::ConfigurationIncomplete { .. }
                | GrinderError::ResourceNotFound { .. }
                | GrinderError::ResourceUnavailable { .. }
                | GrinderError::StagingFailed { .. }
        )
    }
}

impl From<std::io::Error> for GrinderError {
    fn from(err: std::io::Error) -> Self {
        GrinderError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for GrinderError {
    fn from(err: serde_yaml::Error) -> Self {
        GrinderError::ConfigurationMalformed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GrinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = GrinderError::FilterClassNotFound {
            name: "com.example.Missing".to_string(),
        };
        assert_eq!(err.to_string(), "Class 'com.example.Missing' not found.");
    }

    #[test]
    fn test_error_code() {
        let err = GrinderError::ConfigurationAmbiguous {
            dir: "src/grinder/config".to_string(),
            candidates: "a.properties, b.properties".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("grinderctl::config::ambiguous".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GrinderError = io_err.into();
        assert!(matches!(err, GrinderError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: GrinderError = parse_result.unwrap_err().into();
        assert!(matches!(err, GrinderError::ConfigurationMalformed { .. }));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(usage::invalid("bad").exit_code(), 2);
        assert_eq!(config::missing("x").exit_code(), 1);
        assert_eq!(filter::class_not_found("x").exit_code(), 1);
    }

    #[test]
    fn test_configuration_error_classification() {
        assert!(config::ambiguous("dir", ["a", "b"]).is_configuration_error());
        assert!(resource::not_found("script.py").is_configuration_error());
        assert!(staging::failed("dir", "disk full").is_configuration_error());
        assert!(!filter::type_mismatch("x").is_configuration_error());
        assert!(!usage::invalid("x").is_configuration_error());
    }

    test_error_contains!(
        test_incomplete_error,
        config::incomplete("grinder.script"),
        "grinder.script"
    );

    test_error_contains!(
        test_type_mismatch_error,
        filter::type_mismatch("net.grinder.tools.tcpproxy.ConnectionCache"),
        "ConnectionCache",
        "does not implement"
    );

    test_error_contains!(
        test_ambiguous_lists_candidates,
        config::ambiguous("conf", ["a.properties", "b.properties"]),
        "a.properties, b.properties"
    );

    test_error_contains!(
        test_unavailable_error,
        resource::unavailable("target/log", "permission denied"),
        "target/log",
        "permission denied"
    );
}
