//! Test script and log directory errors

use super::GrinderError;

pub fn not_found(path: impl Into<String>) -> GrinderError {
    GrinderError::ResourceNotFound { path: path.into() }
}

pub fn unavailable(path: impl Into<String>, reason: impl Into<String>) -> GrinderError {
    GrinderError::ResourceUnavailable {
        path: path.into(),
        reason: reason.into(),
    }
}
