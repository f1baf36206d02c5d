//! What the user asked for, frozen at the moment a job starts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Filename pattern used when the user does not supply one
pub const DEFAULT_FILENAME_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Target codec for audio conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioCodec {
    #[default]
    Mp3,
    M4a,
    Opus,
}

impl AudioCodec {
    pub const ALL: [AudioCodec; 3] = [AudioCodec::Mp3, AudioCodec::M4a, AudioCodec::Opus];

    /// Value passed to `--audio-format`
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
            AudioCodec::M4a => "m4a",
            AudioCodec::Opus => "opus",
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Quality target for audio conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioQuality {
    /// Best VBR quality the encoder offers
    #[default]
    Best,
    High,
    Medium,
}

impl AudioQuality {
    pub const ALL: [AudioQuality; 3] = [AudioQuality::Best, AudioQuality::High, AudioQuality::Medium];

    /// Value passed to `--audio-quality`
    pub fn as_arg(&self) -> &'static str {
        match self {
            AudioQuality::Best => "0",
            AudioQuality::High => "192K",
            AudioQuality::Medium => "128K",
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AudioQuality::Best => "Best",
            AudioQuality::High => "192 kbps",
            AudioQuality::Medium => "128 kbps",
        })
    }
}

/// Randomized backoff bounds injected by safe mode, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepIntervals {
    /// Lower bound of the sleep before each item download
    pub min: f64,
    /// Upper bound of the sleep before each item download
    pub max: f64,
    /// Fixed sleep between metadata requests
    pub requests: f64,
}

impl SleepIntervals {
    /// Clamp to positive values with `min <= max`
    pub fn normalized(self) -> Self {
        let min = if self.min > 0.0 { self.min } else { 1.0 };
        let max = if self.max >= min { self.max } else { min };
        let requests = if self.requests > 0.0 { self.requests } else { 1.0 };
        Self { min, max, requests }
    }
}

impl Default for SleepIntervals {
    fn default() -> Self {
        Self {
            min: 5.0,
            max: 15.0,
            requests: 1.5,
        }
    }
}

/// Engine knobs that come from settings rather than from the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineTuning {
    pub retries: u32,
    pub fragment_retries: u32,
    pub safe_mode_sleep: SleepIntervals,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            retries: 10,
            fragment_retries: 10,
            safe_mode_sleep: SleepIntervals::default(),
        }
    }
}

/// A single download job as submitted by the Start action
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    pub url: String,
    pub output_directory: PathBuf,
    pub allow_playlist: bool,
    pub convert_to_audio: bool,
    pub audio_codec: AudioCodec,
    pub audio_quality: AudioQuality,
    pub embed_metadata: bool,
    pub embed_thumbnail: bool,
    pub filename_template: String,
    pub safe_mode: bool,
    pub tuning: EngineTuning,
}

impl DownloadRequest {
    /// Request with the application's default options
    pub fn new(url: impl Into<String>, output_directory: impl AsRef<Path>) -> Self {
        Self {
            url: url.into(),
            output_directory: output_directory.as_ref().to_path_buf(),
            allow_playlist: false,
            convert_to_audio: true,
            audio_codec: AudioCodec::default(),
            audio_quality: AudioQuality::default(),
            embed_metadata: true,
            embed_thumbnail: false,
            filename_template: DEFAULT_FILENAME_TEMPLATE.to_string(),
            safe_mode: true,
            tuning: EngineTuning::default(),
        }
    }

    /// Full output template: directory joined with the filename pattern
    pub fn output_template(&self) -> String {
        let template = if self.filename_template.trim().is_empty() {
            DEFAULT_FILENAME_TEMPLATE
        } else {
            self.filename_template.trim()
        };
        self.output_directory.join(template).to_string_lossy().into_owned()
    }
}
