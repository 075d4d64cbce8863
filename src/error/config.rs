//! Configuration errors

use super::GrinderError;

/// Creates a configuration missing error
pub fn missing(path: impl Into<String>) -> GrinderError {
    GrinderError::ConfigurationMissing { path: path.into() }
}

/// Creates an ambiguous configuration error listing every candidate
pub fn ambiguous<I, S>(dir: impl Into<String>, candidates: I) -> GrinderError
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates: Vec<String> = candidates
        .into_iter()
        .map(|c| c.as_ref().to_string())
        .collect();
    GrinderError::ConfigurationAmbiguous {
        dir: dir.into(),
        candidates: candidates.join(", "),
    }
}

/// Creates a malformed configuration error
pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> GrinderError {
    GrinderError::ConfigurationMalformed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an incomplete configuration error
pub fn incomplete(key: impl Into<String>) -> GrinderError {
    GrinderError::ConfigurationIncomplete { key: key.into() }
}
