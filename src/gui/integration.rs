//! Bridge between the download worker and the GUI
//!
//! [`EventBridge::poll`] runs on the UI thread at a fixed cadence. It drains
//! the event channel without blocking and folds every event into the
//! visible [`UiState`]. Polling an empty channel is a no-op, and no event
//! can make it panic.

use crate::backend::{EventReceiver, JobPhase, ProgressEvent};
use crate::engine::{ProgressStatus, ProgressUpdate};
use chrono::{DateTime, Local};

pub const STATUS_READY: &str = "Ready";
pub const STATUS_STARTING: &str = "Starting...";
pub const STATUS_DOWNLOADING: &str = "Downloading...";
pub const STATUS_PROCESSING: &str = "Processing audio...";
pub const STATUS_FINISHED: &str = "Finished.";
pub const STATUS_CANCELLING: &str = "Cancelling...";
pub const STATUS_CANCELLED: &str = "Cancelled.";
pub const STATUS_ERROR: &str = "Error.";

/// A transcript line with the local time it was appended
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub at: DateTime<Local>,
    pub text: String,
}

/// Dialog the shell should surface
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Success(String),
    Failure(String),
    Warning(String),
}

/// Everything the main view renders about the current job
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Progress indicator, `0.0..=1.0`
    pub progress: f32,
    pub percent_text: String,
    pub status: String,
    pub transcript: Vec<LogLine>,
    pub inputs_enabled: bool,
    pub cancel_enabled: bool,
    pub phase: JobPhase,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            percent_text: String::new(),
            status: STATUS_READY.to_string(),
            transcript: Vec::new(),
            inputs_enabled: true,
            cancel_enabled: false,
            phase: JobPhase::Idle,
        }
    }
}

impl UiState {
    pub fn log(&mut self, text: impl Into<String>) {
        self.transcript.push(LogLine {
            at: Local::now(),
            text: text.into(),
        });
    }

    /// Reset for a job the session just accepted
    pub fn begin_job(&mut self, url: &str) {
        self.progress = 0.0;
        self.percent_text = "0%".to_string();
        self.status = STATUS_STARTING.to_string();
        self.inputs_enabled = false;
        self.cancel_enabled = true;
        self.phase = JobPhase::FetchingMetadata;
        self.log(format!("Starting download: {}", url));
    }

    /// Cancel was pressed; the job ends when the worker reports it
    pub fn cancel_requested(&mut self) {
        self.status = STATUS_CANCELLING.to_string();
        self.cancel_enabled = false;
    }

    fn set_progress(&mut self, ratio: f32) {
        self.progress = ratio;
        self.percent_text = format!("{:.1}%", ratio * 100.0);
    }

    fn end_job(&mut self, phase: JobPhase, status: &str) {
        self.phase = phase;
        self.status = status.to_string();
        self.inputs_enabled = true;
        self.cancel_enabled = false;
    }

    fn apply_progress(&mut self, update: &ProgressUpdate) {
        match update.status {
            ProgressStatus::Downloading => {
                self.phase = JobPhase::Downloading;
                if !self.cancel_enabled && self.status == STATUS_CANCELLING {
                    return;
                }
                self.status = STATUS_DOWNLOADING.to_string();
                // Unknown or zero total: keep the last value
                if let Some(ratio) = update.ratio() {
                    self.set_progress(ratio);
                }
            }
            ProgressStatus::Finished => {
                self.phase = JobPhase::PostProcessing;
                self.set_progress(1.0);
                self.status = STATUS_PROCESSING.to_string();
                self.log("Download finished, post-processing...");
            }
        }
    }
}

/// Fold one event into `ui`, returning the dialog to show, if any
pub fn apply_event(ui: &mut UiState, event: ProgressEvent) -> Option<Notification> {
    match event {
        ProgressEvent::Progress(update) => {
            ui.apply_progress(&update);
            None
        }
        ProgressEvent::Log(text) => {
            ui.log(text);
            None
        }
        ProgressEvent::Done(message) => {
            ui.end_job(JobPhase::Done, STATUS_FINISHED);
            ui.log(message.clone());
            Some(Notification::Success(message))
        }
        ProgressEvent::Error(failure) if failure.is_cancelled() => {
            ui.end_job(JobPhase::Cancelled, STATUS_CANCELLED);
            ui.log("Download cancelled.");
            None
        }
        ProgressEvent::Error(failure) => {
            ui.end_job(JobPhase::Error, STATUS_ERROR);
            ui.log(format!("Error: {}", failure.message));
            ui.progress = 0.0;
            ui.percent_text = String::new();
            Some(Notification::Failure(failure.message))
        }
    }
}

/// UI-side consumer of the event channel
pub struct EventBridge {
    receiver: EventReceiver,
}

impl EventBridge {
    pub fn new(receiver: EventReceiver) -> Self {
        Self { receiver }
    }

    /// Drain every queued event into `ui`
    pub fn poll(&mut self, ui: &mut UiState) -> Vec<Notification> {
        let mut notifications = Vec::new();
        while let Some(event) = self.receiver.try_next() {
            if let Some(note) = apply_event(ui, event) {
                notifications.push(note);
            }
        }
        notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{event_channel, JobFailure};

    fn started() -> UiState {
        let mut ui = UiState::default();
        ui.begin_job("https://video/abc");
        ui
    }

    #[test]
    fn test_known_total_updates_indicator() {
        let mut ui = started();
        apply_event(
            &mut ui,
            ProgressEvent::Progress(ProgressUpdate::downloading(50, Some(100))),
        );
        assert_eq!(ui.progress, 0.5);
        assert_eq!(ui.percent_text, "50.0%");
        assert_eq!(ui.status, STATUS_DOWNLOADING);
    }

    #[test]
    fn test_unknown_or_zero_total_keeps_indicator() {
        let mut ui = started();
        apply_event(
            &mut ui,
            ProgressEvent::Progress(ProgressUpdate::downloading(30, Some(100))),
        );
        apply_event(
            &mut ui,
            ProgressEvent::Progress(ProgressUpdate::downloading(60, Some(0))),
        );
        assert_eq!(ui.progress, 0.3);
        apply_event(&mut ui, ProgressEvent::Progress(ProgressUpdate::downloading(90, None)));
        assert_eq!(ui.progress, 0.3);
        assert!(ui.progress.is_finite());
    }

    #[test]
    fn test_finished_forces_full_and_processing() {
        let mut ui = started();
        apply_event(&mut ui, ProgressEvent::Progress(ProgressUpdate::finished()));
        assert_eq!(ui.progress, 1.0);
        assert_eq!(ui.status, STATUS_PROCESSING);
        assert_eq!(ui.phase, JobPhase::PostProcessing);
    }

    #[test]
    fn test_log_appended_verbatim() {
        let mut ui = UiState::default();
        apply_event(&mut ui, ProgressEvent::Log("Title: Some Song".into()));
        assert_eq!(ui.transcript.last().unwrap().text, "Title: Some Song");
    }

    #[test]
    fn test_done_restores_controls_and_notifies() {
        let mut ui = started();
        let note = apply_event(&mut ui, ProgressEvent::Done("all good".into()));
        assert_eq!(note, Some(Notification::Success("all good".into())));
        assert_eq!(ui.status, STATUS_FINISHED);
        assert!(ui.inputs_enabled);
        assert!(!ui.cancel_enabled);
    }

    #[test]
    fn test_cancel_is_not_a_failure() {
        let mut ui = started();
        apply_event(
            &mut ui,
            ProgressEvent::Progress(ProgressUpdate::downloading(40, Some(100))),
        );
        ui.cancel_requested();
        let note = apply_event(&mut ui, ProgressEvent::Error(JobFailure::cancelled()));
        assert_eq!(note, None);
        assert_eq!(ui.status, STATUS_CANCELLED);
        assert_eq!(ui.phase, JobPhase::Cancelled);
        assert!(ui.inputs_enabled);
        assert!(!ui.cancel_enabled);
    }

    #[test]
    fn test_error_resets_indicator_and_notifies() {
        let mut ui = started();
        apply_event(
            &mut ui,
            ProgressEvent::Progress(ProgressUpdate::downloading(40, Some(100))),
        );
        let note = apply_event(
            &mut ui,
            ProgressEvent::Error(JobFailure::failed("Unsupported URL")),
        );
        assert_eq!(note, Some(Notification::Failure("Unsupported URL".into())));
        assert_eq!(ui.status, STATUS_ERROR);
        assert_eq!(ui.progress, 0.0);
        assert!(ui.inputs_enabled);
        assert!(!ui.cancel_enabled);
    }

    #[test]
    fn test_poll_on_empty_channel_is_noop() {
        let (_tx, rx) = event_channel();
        let mut bridge = EventBridge::new(rx);
        let mut ui = UiState::default();
        let before = ui.clone();
        assert!(bridge.poll(&mut ui).is_empty());
        assert!(bridge.poll(&mut ui).is_empty());
        assert_eq!(ui, before);
    }

    #[test]
    fn test_poll_drains_batch_in_order() {
        let (tx, rx) = event_channel();
        let mut bridge = EventBridge::new(rx);
        let mut ui = started();

        tx.log("first");
        tx.send(ProgressEvent::Progress(ProgressUpdate::downloading(10, Some(100))));
        tx.log("second");
        tx.send(ProgressEvent::Done("done".into()));

        let notes = bridge.poll(&mut ui);
        assert_eq!(notes.len(), 1);
        let texts: Vec<_> = ui.transcript.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Starting download: https://video/abc", "first", "second", "done"]
        );
        assert_eq!(ui.progress, 0.1);
    }
}
