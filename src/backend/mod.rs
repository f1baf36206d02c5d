pub mod events;
pub mod session;
pub mod worker;

pub use events::{
    event_channel, EventReceiver, EventSender, FailureKind, JobFailure, JobPhase, ProgressEvent,
};
pub use session::DownloadSession;
pub use worker::DownloadWorker;
