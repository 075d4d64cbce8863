//! Downstream process launch errors

use super::GrinderError;

pub fn failed(program: impl Into<String>, reason: impl Into<String>) -> GrinderError {
    GrinderError::LaunchFailed {
        program: program.into(),
        reason: reason.into(),
    }
}
