/// Convenience result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The script document failed schema validation. Carries every collected
    /// message, not just the first offender.
    #[error("schema error: {}", .0.join("; "))]
    Schema(Vec<String>),

    /// One or more scenes reference layouts absent from the registry.
    /// Aggregated over the whole document before any frame is computed.
    #[error("layout error: {}", .0.join("; "))]
    Layout(Vec<String>),

    /// Invalid user-provided value outside the document itself (bad fps,
    /// empty registry, out-of-range frame request).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Build an [`EngineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`EngineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// One human-readable block, suitable for the diagnostic frame banner.
    pub fn formatted(&self) -> String {
        match self {
            Self::Schema(errors) => format!(
                "Invalid configuration file.\n{}\nPlease check the script document and retry.",
                errors.join("\n")
            ),
            Self::Layout(errors) => format!(
                "Layout validation errors:\n{}\nUse only layouts from the catalog.",
                errors.join("\n")
            ),
            other => other.to_string(),
        }
    }
}
