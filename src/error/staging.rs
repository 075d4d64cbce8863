//! Staging errors

use super::GrinderError;

/// Creates a staging failure for the file or directory at `path`
pub fn failed(path: impl Into<String>, reason: impl Into<String>) -> GrinderError {
    GrinderError::StagingFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
