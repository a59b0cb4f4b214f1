/// Convenience result type used across Vitrine.
pub type VitrineResult<T> = Result<T, VitrineError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum VitrineError {
    /// Invalid user-provided page description or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// The document does not satisfy the structural contract (missing nodes, unpaired items).
    #[error("structure error: {0}")]
    Structure(String),

    /// Errors while building or sampling tweens and timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// An image referenced by the page could not be loaded.
    #[error("preload error: {0}")]
    Preload(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    /// Build a [`VitrineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VitrineError::Structure`] value.
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`VitrineError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`VitrineError::Preload`] value.
    pub fn preload(msg: impl Into<String>) -> Self {
        Self::Preload(msg.into())
    }

    /// Build a [`VitrineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
