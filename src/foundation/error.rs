/// Convenience result type used across the timing engine.
pub type TimingResult<T> = Result<T, TimingError>;

/// Top-level error taxonomy for the boundaries that can genuinely fail.
///
/// Queries and edits on a [`Scene`](crate::Scene) never return these; they absorb bad
/// paths and malformed records as "no data" instead.
#[derive(thiserror::Error, Debug)]
pub enum TimingError {
    /// Structurally invalid scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Track data that could not be ingested at all.
    #[error("ingest error: {0}")]
    Ingest(String),

    /// Errors while evaluating scene state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing whole documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Invalid transport requests.
    #[error("transport error: {0}")]
    Transport(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimingError {
    /// Build a [`TimingError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TimingError::Ingest`] value.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// Build a [`TimingError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`TimingError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`TimingError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl From<serde_json::Error> for TimingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
