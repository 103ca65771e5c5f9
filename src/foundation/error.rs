/// Convenience result type used across colorwipe.
pub type WipeResult<T> = Result<T, WipeError>;

/// Top-level error taxonomy used by transition APIs.
///
/// Only construction-time and configuration-time failures surface as errors. Per-frame and
/// per-cycle soft failures (zero-sized mask, missing audio timestamp) are reported as
/// `Option`/`bool` by the render paths instead.
#[derive(thiserror::Error, Debug)]
pub enum WipeError {
    /// Invalid user-provided settings or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// The blend effect program could not be loaded or does not expose the expected interface.
    #[error("effect error: {0}")]
    Effect(String),

    /// The host media service refused or failed to provide a mask clip.
    #[error("media error: {0}")]
    Media(String),

    /// Mask image bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing settings and asset lists.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WipeError {
    /// Build a [`WipeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WipeError::Effect`] value.
    pub fn effect(msg: impl Into<String>) -> Self {
        Self::Effect(msg.into())
    }

    /// Build a [`WipeError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`WipeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WipeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
