pub mod error;
pub mod models;
pub mod progress;
pub mod traits;
pub mod ytdlp;

pub use error::{EngineError, CANCELLED_MESSAGE};
pub use models::{DownloadOutcome, MediaInfo, PlaylistEntry};
pub use progress::{ProgressStatus, ProgressUpdate, RawProgress};
pub use traits::{DownloadEngine, EngineFactory};
pub use ytdlp::{YtDlpEngine, YtDlpFactory};
