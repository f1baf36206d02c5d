//! Job description and engine configuration

pub mod cancel;
pub mod options;
pub mod request;

// Re-export for convenience
pub use cancel::CancellationToken;
pub use options::{build, guard_progress, EngineOptions, PostProcessor, ProgressHook};
pub use request::{
    AudioCodec, AudioQuality, DownloadRequest, EngineTuning, SleepIntervals,
    DEFAULT_FILENAME_TEMPLATE,
};
