//! Command line usage errors

use super::GrinderError;

/// Creates a usage error with the given message
pub fn invalid(message: impl Into<String>) -> GrinderError {
    GrinderError::UsageError {
        message: message.into(),
    }
}

/// Creates a usage error for an option that needs an argument
pub fn missing_argument(option: &str) -> GrinderError {
    invalid(format!("Option '{option}' requires an argument"))
}

/// Creates a usage error for an unrecognised option
pub fn unknown_option(option: &str) -> GrinderError {
    invalid(format!("Unrecognised option '{option}'"))
}

/// Creates a usage error for a malformed number
pub fn not_a_number(option: &str, value: &str) -> GrinderError {
    invalid(format!("Option '{option}' expects a number, got '{value}'"))
}
