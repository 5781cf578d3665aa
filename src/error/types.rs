use thiserror::Error;

/// Unified result type for the canvas engine.
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Errors surfaced at the fallible edges of the engine.
///
/// Component edits never produce these: out-of-range requests are clamped and
/// unknown or locked targets are reported through `CommandOutcome` instead.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("device profile `{0}` not found")]
    DeviceNotFound(String),
    #[error("invalid device profile `{id}`: {reason}")]
    InvalidDevice { id: String, reason: String },
    #[error("device catalog is empty")]
    EmptyCatalog,
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
