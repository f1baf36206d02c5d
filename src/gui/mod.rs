//! GUI module

pub mod app;
pub mod clipboard;
pub mod components;
pub mod integration;
pub mod theme;
pub mod views;

// Re-export for convenience
pub use app::{AppFlags, AudioloaderApp, Message};
pub use integration::{apply_event, EventBridge, Notification, UiState};
