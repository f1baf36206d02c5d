//! Events flowing from the download worker to the UI

use crate::engine::{EngineError, ProgressUpdate, CANCELLED_MESSAGE};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::debug;

/// Lifecycle of a job as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobPhase {
    #[default]
    Idle,
    FetchingMetadata,
    Downloading,
    PostProcessing,
    Done,
    Error,
    Cancelled,
}

impl JobPhase {
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            JobPhase::FetchingMetadata | JobPhase::Downloading | JobPhase::PostProcessing
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Cancelled,
    Failed,
}

/// Payload of the terminal error event
#[derive(Debug, Clone, PartialEq)]
pub struct JobFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl JobFailure {
    pub fn cancelled() -> Self {
        Self {
            kind: FailureKind::Cancelled,
            message: CANCELLED_MESSAGE.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Failed,
            message: message.into(),
        }
    }

    /// The kind decides; the marker text is only a fallback for engines
    /// that report cancellation as a plain failure.
    pub fn is_cancelled(&self) -> bool {
        self.kind == FailureKind::Cancelled || self.message.contains(CANCELLED_MESSAGE)
    }
}

impl From<&EngineError> for JobFailure {
    fn from(err: &EngineError) -> Self {
        if err.is_cancelled() {
            Self::cancelled()
        } else {
            Self::failed(err.to_string())
        }
    }
}

/// Everything the worker reports, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Progress(ProgressUpdate),
    Log(String),
    Done(String),
    Error(JobFailure),
}

impl ProgressEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressEvent::Done(_) | ProgressEvent::Error(_))
    }
}

/// Create the application-wide event channel
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}

/// Producer half, cloned into each worker
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl EventSender {
    pub fn send(&self, event: ProgressEvent) {
        if let Err(e) = self.tx.send(event) {
            // Receiver is gone: the UI is shutting down.
            debug!("Dropping event, receiver closed: {:?}", e.0);
        }
    }

    pub fn log(&self, message: impl Into<String>) {
        self.send(ProgressEvent::Log(message.into()));
    }
}

/// Consumer half, owned by the UI poller
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<ProgressEvent>,
}

impl EventReceiver {
    /// Non-blocking pop
    pub fn try_next(&mut self) -> Option<ProgressEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Pop everything currently queued
    pub fn drain(&mut self) -> Vec<ProgressEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Await the next event (tests and headless callers)
    pub async fn recv(&mut self) -> Option<ProgressEvent> {
        self.rx.recv().await
    }
}
