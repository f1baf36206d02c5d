//! Error handling for Audioloader

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a Start action is refused before any job is created
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Please enter a video or playlist URL")]
    EmptyUrl,

    #[error("Output folder does not exist or is not a directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("A download is already running")]
    JobAlreadyRunning,
}

impl LoaderError {
    /// Short dialog title for this error
    pub fn title(&self) -> &'static str {
        match self {
            LoaderError::EmptyUrl => "Missing URL",
            LoaderError::InvalidDirectory(_) => "Invalid output folder",
            LoaderError::JobAlreadyRunning => "Download in progress",
        }
    }
}
