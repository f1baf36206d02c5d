//! Stub engine shared by the integration tests; nothing here touches the network.
#![allow(dead_code)]

use async_trait::async_trait;
use audioloader::backend::{EventReceiver, ProgressEvent};
use audioloader::downloader::EngineOptions;
use audioloader::engine::{
    DownloadEngine, DownloadOutcome, EngineError, EngineFactory, MediaInfo, ProgressUpdate,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub engine does when asked to download
#[derive(Debug, Clone)]
pub enum Script {
    /// Report `ticks`, then succeed with the given outcome
    Succeed {
        ticks: Vec<ProgressUpdate>,
        saved: Vec<PathBuf>,
        skipped: Vec<String>,
    },
    /// Report one tick, then fail with this error text
    Fail(String),
    /// Keep reporting progress until the hook aborts
    UntilCancelled,
}

pub struct StubEngine {
    title: Option<String>,
    script: Script,
    seen: Arc<Mutex<Vec<EngineOptions>>>,
}

#[async_trait]
impl DownloadEngine for StubEngine {
    fn id(&self) -> &'static str {
        "stub"
    }

    async fn extract_info(&self, _url: &str, _options: &EngineOptions) -> Result<MediaInfo, EngineError> {
        match &self.title {
            Some(title) => Ok(MediaInfo {
                title: Some(title.clone()),
                kind: Some("video".into()),
                ..MediaInfo::default()
            }),
            None => Err(EngineError::Failed("metadata unavailable".into())),
        }
    }

    async fn download(&self, _url: &str, options: &EngineOptions) -> Result<DownloadOutcome, EngineError> {
        self.seen.lock().unwrap().push(options.clone());

        match &self.script {
            Script::Succeed {
                ticks,
                saved,
                skipped,
            } => {
                for tick in ticks {
                    options.report_progress(tick)?;
                    tokio::task::yield_now().await;
                }
                Ok(DownloadOutcome {
                    saved_files: saved.clone(),
                    skipped: skipped.clone(),
                })
            }
            Script::Fail(message) => {
                options.report_progress(&ProgressUpdate::downloading(10, Some(100)))?;
                Err(EngineError::Failed(message.clone()))
            }
            Script::UntilCancelled => {
                for i in 0..10_000u64 {
                    options.report_progress(&ProgressUpdate::downloading(i % 100, Some(100)))?;
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
                Err(EngineError::Failed("stub was never cancelled".into()))
            }
        }
    }
}

/// Factory handing out a fresh [`StubEngine`] per job and recording the options it saw
#[derive(Clone)]
pub struct StubFactory {
    pub title: Option<String>,
    pub script: Script,
    pub seen: Arc<Mutex<Vec<EngineOptions>>>,
}

impl StubFactory {
    pub fn new(script: Script) -> Self {
        Self {
            title: Some("Some Song".into()),
            script,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn without_metadata(mut self) -> Self {
        self.title = None;
        self
    }

    pub fn last_options(&self) -> Option<EngineOptions> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl EngineFactory for StubFactory {
    fn open(&self) -> Result<Box<dyn DownloadEngine>, EngineError> {
        Ok(Box::new(StubEngine {
            title: self.title.clone(),
            script: self.script.clone(),
            seen: Arc::clone(&self.seen),
        }))
    }
}

/// Await events until the terminal one, failing the test after a few seconds
pub async fn collect_until_terminal(rx: &mut EventReceiver) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    loop {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for job events")
            .expect("event channel closed");
        let terminal = event.is_terminal();
        events.push(event);
        if terminal {
            return events;
        }
    }
}
