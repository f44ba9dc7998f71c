/// Convenience result type used across thumbforge.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Top-level error taxonomy used by the compositing and encoding APIs.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// Missing, unreadable or invalid font asset. Always fatal for the image being processed.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// Violated invariant in caller-provided data (mismatched layer sizes, empty buffers, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unreadable source or watermark image. Callers usually skip and continue.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failure inside the lossy codec.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ThumbError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ThumbError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThumbError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ThumbError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Whether the batch driver may log this error and move on to the next image.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Asset(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
