//! Utility modules for error handling, configuration and tool discovery

pub mod config;
pub mod error;
pub mod platform;
pub mod tools;

// Re-export for convenience
pub use config::AppSettings;
pub use error::LoaderError;
pub use tools::ToolStatus;
