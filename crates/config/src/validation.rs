use thiserror::Error;

/// A config failed schema-level validation. Carries the field path so the
/// user can locate the offending entry without reading the whole file.
#[derive(Debug, Error)]
#[error("invalid config at `{path}`: {reason}")]
pub struct ConfigValidationError {
    pub path: String,
    pub reason: String,
}

impl ConfigValidationError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
