//! GUI components

pub mod log_view;
pub mod options_panel;
pub mod progress_bar;
pub mod url_input;

// Re-export for convenience
pub use log_view::{log_scroll_id, log_view};
pub use options_panel::options_panel;
pub use progress_bar::progress_bar;
pub use url_input::{output_dir_input, url_input};
