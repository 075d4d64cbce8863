//! Filter chain errors

use super::GrinderError;

pub fn class_not_found(name: impl Into<String>) -> GrinderError {
    GrinderError::FilterClassNotFound { name: name.into() }
}

pub fn type_mismatch(name: impl Into<String>) -> GrinderError {
    GrinderError::FilterTypeMismatch { name: name.into() }
}

pub fn duplicate(name: impl Into<String>) -> GrinderError {
    GrinderError::DuplicateFilterType { name: name.into() }
}
