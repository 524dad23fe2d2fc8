/// Convenience result type used across the crate.
pub type WeaveResult<T> = Result<T, WeaveError>;

/// Top-level error taxonomy for synchronization, contribution and rendering.
///
/// No variant is fatal to a running session: the polling loop swallows
/// [`WeaveError::FetchFailed`] and the contribution flow turns
/// [`WeaveError::SubmissionFailed`] into a transient notice.
#[derive(thiserror::Error, Debug)]
pub enum WeaveError {
    /// Local text validation failed; never reaches the network.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// This client already used its whole contribution quota.
    #[error("quota exceeded: {used}/{limit} contributions used")]
    QuotaExceeded {
        /// Successful submissions recorded so far.
        used: u32,
        /// Configured maximum.
        limit: u32,
    },

    /// A snapshot fetch failed or returned a non-2xx status.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// The store rejected or failed a write.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// The administrative clear failed.
    #[error("reset failed: {0}")]
    ResetFailed(String),

    /// Surface allocation or rasterization errors.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid configuration or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Persisted storage or export IO.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WeaveError {
    /// Build a [`WeaveError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`WeaveError::FetchFailed`] value.
    pub fn fetch_failed(msg: impl Into<String>) -> Self {
        Self::FetchFailed(msg.into())
    }

    /// Build a [`WeaveError::SubmissionFailed`] value.
    pub fn submission_failed(msg: impl Into<String>) -> Self {
        Self::SubmissionFailed(msg.into())
    }

    /// Build a [`WeaveError::ResetFailed`] value.
    pub fn reset_failed(msg: impl Into<String>) -> Self {
        Self::ResetFailed(msg.into())
    }

    /// Build a [`WeaveError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WeaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WeaveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WeaveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
