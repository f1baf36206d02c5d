use super::events::{event_channel, EventReceiver, EventSender};
use super::worker::DownloadWorker;
use crate::downloader::{CancellationToken, DownloadRequest};
use crate::engine::EngineFactory;
use crate::utils::error::LoaderError;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Application context shared by the Start/Cancel actions.
///
/// Owns the producer side of the event channel, the cancellation token and
/// the handle of the job currently running. The consumer side is handed to
/// the UI poller at construction.
///
/// `active` is raised when a job is accepted and lowered by the worker
/// right before its terminal event, so a job counts as finished as soon as
/// the UI can observe that it finished.
pub struct DownloadSession {
    runtime: Handle,
    factory: Arc<dyn EngineFactory>,
    events: EventSender,
    token: CancellationToken,
    active: Arc<AtomicBool>,
    current_job: Option<JoinHandle<()>>,
}

impl DownloadSession {
    pub fn new(runtime: Handle, factory: Arc<dyn EngineFactory>) -> (Self, EventReceiver) {
        let (events, receiver) = event_channel();
        let session = Self {
            runtime,
            factory,
            events,
            token: CancellationToken::new(),
            active: Arc::new(AtomicBool::new(false)),
            current_job: None,
        };
        (session, receiver)
    }

    /// Check the request before any job is created
    pub fn validate(request: &DownloadRequest) -> Result<(), LoaderError> {
        if request.url.trim().is_empty() {
            return Err(LoaderError::EmptyUrl);
        }
        if !request.output_directory.is_dir() {
            return Err(LoaderError::InvalidDirectory(
                request.output_directory.clone(),
            ));
        }
        Ok(())
    }

    /// Spawn a worker for `request`.
    ///
    /// Invalid input or a running job rejects the request without touching
    /// the token or the channel.
    pub fn start(&mut self, mut request: DownloadRequest) -> Result<(), LoaderError> {
        Self::validate(&request)?;
        if self.is_busy() {
            return Err(LoaderError::JobAlreadyRunning);
        }

        request.url = request.url.trim().to_string();
        info!("Queueing download of {} into {:?}", request.url, request.output_directory);

        // Cleared here, not in the task: a cancel issued before the task is
        // first polled must still reach the job.
        self.token.clear();
        self.active.store(true, Ordering::Release);

        let worker = DownloadWorker::new(
            Arc::clone(&self.factory),
            self.events.clone(),
            self.token.clone(),
        )
        .with_active_flag(Arc::clone(&self.active));
        self.current_job = Some(self.runtime.spawn(worker.run(request)));
        Ok(())
    }

    /// Request cancellation of the running job; false when nothing is running
    pub fn cancel(&self) -> bool {
        if !self.is_busy() {
            return false;
        }
        info!("Cancellation requested");
        self.token.set();
        true
    }

    pub fn is_busy(&self) -> bool {
        self.active.load(Ordering::Acquire)
            && self
                .current_job
                .as_ref()
                .is_some_and(|job| !job.is_finished())
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Stop the running job, if any, and wait up to `grace` for it to end.
    ///
    /// The returned future owns everything it needs, so it can be handed to
    /// the UI executor.
    pub fn shutdown(&mut self, grace: Duration) -> impl Future<Output = ()> + Send + 'static {
        if self.is_busy() {
            self.token.set();
        }
        let job = self.current_job.take();
        let active = Arc::clone(&self.active);

        async move {
            let Some(job) = job else {
                return;
            };
            let abort = job.abort_handle();
            match tokio::time::timeout(grace, job).await {
                Ok(Ok(())) => info!("Download worker stopped"),
                Ok(Err(e)) => warn!("Download worker ended abnormally: {}", e),
                Err(_) => {
                    warn!("Download worker did not stop within {:?}, aborting", grace);
                    abort.abort();
                }
            }
            active.store(false, Ordering::Release);
        }
    }
}
