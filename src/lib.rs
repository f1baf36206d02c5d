//! Audioloader library

pub mod backend;
pub mod downloader;
pub mod engine;
pub mod gui;
pub mod utils;

// Re-export main types for easier use
pub use backend::{DownloadSession, DownloadWorker, JobFailure, ProgressEvent};
pub use downloader::{CancellationToken, DownloadRequest, EngineOptions};
pub use engine::{DownloadEngine, EngineError, EngineFactory, YtDlpEngine, YtDlpFactory};
pub use gui::{AudioloaderApp, Message};
pub use utils::{AppSettings, LoaderError, ToolStatus};
