/// Convenience result type used across stitchform.
pub type StitchResult<T> = Result<T, StitchError>;

/// Top-level error taxonomy for the fallible edges of the crate.
///
/// Parsing and layout never fail; only configuration and persistence do.
#[derive(thiserror::Error, Debug)]
pub enum StitchError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A snapshot store could not read or write a key.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Errors when serializing or deserializing snapshots and exports.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StitchError {
    /// Build a [`StitchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StitchError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`StitchError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StitchError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
