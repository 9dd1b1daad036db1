//! Error types for the device liveness service

/// Errors that can occur in the device liveness service
#[derive(Debug, thiserror::Error)]
pub enum LivenessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),
}

/// Result type alias for device liveness operations
pub type Result<T> = std::result::Result<T, LivenessError>;
