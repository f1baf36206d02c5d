//! Failures raised by a download engine

use thiserror::Error;

/// Text carried by every cancellation failure
pub const CANCELLED_MESSAGE: &str = "Download cancelled by user";

/// Engine-level error
#[derive(Debug, Error)]
pub enum EngineError {
    /// The guarded progress callback saw the cancellation token
    #[error("Download cancelled by user")]
    Cancelled,

    #[error("yt-dlp not found. Please install yt-dlp")]
    NotFound,

    #[error("Failed to start yt-dlp: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{0}")]
    Failed(String),

    #[error("Failed to parse engine output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EngineError::Cancelled)
    }
}
