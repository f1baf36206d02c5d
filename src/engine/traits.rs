use crate::downloader::EngineOptions;
use crate::engine::error::EngineError;
use crate::engine::models::{DownloadOutcome, MediaInfo};
use async_trait::async_trait;

/// Core trait for the external download capability
///
/// This trait isolates the worker from the concrete engine (yt-dlp, or a
/// stub in tests). The engine resolves single videos vs playlists, retries,
/// runs the post-processors and calls `options.report_progress` per tick.
#[async_trait]
pub trait DownloadEngine: Send + Sync {
    /// Returns a unique identifier for this engine (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Metadata-only lookup, nothing is written to disk
    async fn extract_info(&self, url: &str, options: &EngineOptions) -> Result<MediaInfo, EngineError>;

    /// Download (and post-process) everything `url` resolves to.
    ///
    /// Must abort and return the hook's error as soon as
    /// `options.report_progress` fails.
    async fn download(&self, url: &str, options: &EngineOptions) -> Result<DownloadOutcome, EngineError>;
}

/// Opens one engine session per job
pub trait EngineFactory: Send + Sync {
    fn open(&self) -> Result<Box<dyn DownloadEngine>, EngineError>;
}
