use super::events::{EventSender, JobFailure, JobPhase, ProgressEvent};
use crate::downloader::{self, CancellationToken, DownloadRequest};
use crate::engine::{EngineError, EngineFactory, ProgressStatus};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// Runs one job off the UI thread.
///
/// The worker has no return value: every outcome goes through the event
/// channel, terminated by exactly one `Done` or `Error`. The token is
/// read, never reset: whoever accepts the job clears it beforehand.
pub struct DownloadWorker {
    factory: Arc<dyn EngineFactory>,
    events: EventSender,
    token: CancellationToken,
    active: Option<Arc<AtomicBool>>,
}

impl DownloadWorker {
    pub fn new(factory: Arc<dyn EngineFactory>, events: EventSender, token: CancellationToken) -> Self {
        Self {
            factory,
            events,
            token,
            active: None,
        }
    }

    /// Flag lowered just before the terminal event is sent
    pub fn with_active_flag(mut self, active: Arc<AtomicBool>) -> Self {
        self.active = Some(active);
        self
    }

    pub async fn run(self, request: DownloadRequest) {
        let job_id = Uuid::new_v4();
        let span = info_span!("job", id = %job_id);

        async move {
            info!("Starting job for {}", request.url);

            let result = AssertUnwindSafe(self.execute(&request)).catch_unwind().await;

            let terminal = match result {
                Ok(Ok(summary)) => {
                    info!(phase = ?JobPhase::Done, "Job finished");
                    ProgressEvent::Done(summary)
                }
                Ok(Err(err)) => {
                    let failure = JobFailure::from(&err);
                    if failure.is_cancelled() {
                        info!(phase = ?JobPhase::Cancelled, "Job cancelled");
                    } else {
                        error!(phase = ?JobPhase::Error, "Job failed: {}", err);
                    }
                    ProgressEvent::Error(failure)
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    error!(phase = ?JobPhase::Error, "Job panicked: {}", message);
                    ProgressEvent::Error(JobFailure::failed(format!("Internal error: {}", message)))
                }
            };

            if let Some(active) = &self.active {
                active.store(false, Ordering::Release);
            }
            self.events.send(terminal);
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request: &DownloadRequest) -> Result<String, EngineError> {
        let engine = self.factory.open()?;
        debug!("Opened engine session: {}", engine.id());

        let progress_events = self.events.clone();
        let options = downloader::build(
            request,
            move |update| {
                if update.status == ProgressStatus::Finished {
                    debug!(phase = ?JobPhase::PostProcessing, "Item downloaded");
                }
                progress_events.send(ProgressEvent::Progress(update.clone()));
            },
            &self.token,
        );

        debug!(phase = ?JobPhase::FetchingMetadata);
        match engine.extract_info(&request.url, &options).await {
            Ok(info) => {
                if let Some(summary) = info.summary() {
                    self.events.log(summary);
                }
            }
            Err(e) => debug!("Metadata pre-fetch failed, continuing: {}", e),
        }

        debug!(phase = ?JobPhase::Downloading);
        let outcome = engine.download(&request.url, &options).await?;

        for skipped in &outcome.skipped {
            self.events.log(format!("Skipped: {}", skipped));
        }
        for file in &outcome.saved_files {
            self.events.log(format!("Saved: {}", file.display()));
        }

        Ok(outcome.summary(&request.output_directory))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
