//! Clipboard access

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Clipboard text with surrounding whitespace removed
pub fn get_clipboard_text() -> Result<String> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    let text = clipboard.get_text().context("Failed to read clipboard")?;
    Ok(text.trim().to_string())
}
