//! Application configuration

use crate::downloader::{
    AudioCodec, AudioQuality, DownloadRequest, EngineTuning, SleepIntervals,
    DEFAULT_FILENAME_TEMPLATE,
};
use crate::utils::platform;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Application settings, remembered between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Download location
    pub download_location: PathBuf,

    pub allow_playlist: bool,
    pub convert_to_audio: bool,
    pub audio_codec: AudioCodec,
    pub audio_quality: AudioQuality,
    pub embed_metadata: bool,
    pub embed_thumbnail: bool,
    pub filename_template: String,

    /// Insert randomized delays between items
    pub safe_mode: bool,
    pub safe_mode_sleep: SleepIntervals,

    /// Retry attempts for whole items and for fragments
    pub retries: u32,
    pub fragment_retries: u32,

    /// Cadence of the UI event poller
    pub poll_interval_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        let tuning = EngineTuning::default();
        Self {
            download_location: platform::default_download_dir(),
            allow_playlist: false,
            convert_to_audio: true,
            audio_codec: AudioCodec::default(),
            audio_quality: AudioQuality::default(),
            embed_metadata: true,
            embed_thumbnail: false,
            filename_template: DEFAULT_FILENAME_TEMPLATE.to_string(),
            safe_mode: true,
            safe_mode_sleep: tuning.safe_mode_sleep,
            retries: tuning.retries,
            fragment_retries: tuning.fragment_retries,
            poll_interval_ms: 100,
        }
    }
}

impl AppSettings {
    /// Enforce sane minimums on values that may come from a hand-edited file
    pub fn sanitized(mut self) -> Self {
        self.retries = self.retries.max(1);
        self.fragment_retries = self.fragment_retries.max(1);
        self.poll_interval_ms = self.poll_interval_ms.max(16);
        self.safe_mode_sleep = self.safe_mode_sleep.normalized();
        if self.filename_template.trim().is_empty() {
            self.filename_template = DEFAULT_FILENAME_TEMPLATE.to_string();
        }
        self
    }

    pub fn tuning(&self) -> EngineTuning {
        EngineTuning {
            retries: self.retries,
            fragment_retries: self.fragment_retries,
            safe_mode_sleep: self.safe_mode_sleep,
        }
    }

    /// Turn off every option that needs ffmpeg
    pub fn without_ffmpeg(&mut self) {
        self.convert_to_audio = false;
        self.embed_metadata = false;
        self.embed_thumbnail = false;
    }

    /// Request for `url` using the current option toggles. Options that
    /// need ffmpeg stay off when `can_convert` is false.
    pub fn request_for(&self, url: &str, can_convert: bool) -> DownloadRequest {
        DownloadRequest {
            url: url.to_string(),
            output_directory: self.download_location.clone(),
            allow_playlist: self.allow_playlist,
            convert_to_audio: self.convert_to_audio && can_convert,
            audio_codec: self.audio_codec,
            audio_quality: self.audio_quality,
            embed_metadata: self.embed_metadata && can_convert,
            embed_thumbnail: self.embed_thumbnail && can_convert,
            filename_template: self.filename_template.clone(),
            safe_mode: self.safe_mode,
            tuning: self.tuning(),
        }
    }

    /// Load from `path`; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings.sanitized()
            }
            Err(e) => {
                warn!("Ignoring settings file {:?}: {:#}", path, e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).context("Malformed settings file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn load() -> Self {
        Self::load_from(&platform::settings_path())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&platform::settings_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::{build, CancellationToken};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppSettings::default();
        assert!(config.retries > 0);
        assert!(config.fragment_retries > 0);
        assert!(config.poll_interval_ms > 0);
        assert!(config.safe_mode);
        assert!(config.safe_mode_sleep.min <= config.safe_mode_sleep.max);
    }

    #[test]
    fn test_sanitized_enforces_minimums() {
        let config = AppSettings {
            retries: 0,
            fragment_retries: 0,
            poll_interval_ms: 0,
            filename_template: String::new(),
            ..AppSettings::default()
        }
        .sanitized();

        assert_eq!(config.retries, 1);
        assert_eq!(config.fragment_retries, 1);
        assert_eq!(config.poll_interval_ms, 16);
        assert_eq!(config.filename_template, DEFAULT_FILENAME_TEMPLATE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("settings.json");

        let settings = AppSettings {
            download_location: dir.path().to_path_buf(),
            allow_playlist: true,
            audio_codec: AudioCodec::Opus,
            safe_mode: false,
            ..AppSettings::default()
        };
        settings.save_to(&path).expect("save");

        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_keys() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"allow_playlist": true}"#).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert!(loaded.allow_playlist);
        assert_eq!(loaded.retries, AppSettings::default().retries);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_request_for_copies_toggles() {
        let settings = AppSettings {
            embed_thumbnail: true,
            retries: 3,
            ..AppSettings::default()
        };
        let request = settings.request_for("https://video/abc", true);
        assert_eq!(request.url, "https://video/abc");
        assert!(request.embed_thumbnail);
        assert!(request.embed_metadata);
        assert_eq!(request.tuning.retries, 3);
        assert_eq!(request.output_directory, settings.download_location);
    }

    #[test]
    fn test_request_without_ffmpeg_has_no_postprocessing() {
        let settings = AppSettings {
            convert_to_audio: true,
            embed_metadata: true,
            embed_thumbnail: true,
            ..AppSettings::default()
        };
        let request = settings.request_for("https://video/abc", false);
        assert!(!request.convert_to_audio);
        assert!(!request.embed_metadata);
        assert!(!request.embed_thumbnail);

        let options = build(&request, |_| {}, &CancellationToken::new());
        assert!(options.postprocessors.is_empty());

        // Stored toggles are left alone
        assert!(settings.embed_metadata);
    }

    #[test]
    fn test_without_ffmpeg_clears_dependent_toggles() {
        let mut settings = AppSettings {
            convert_to_audio: true,
            embed_metadata: true,
            embed_thumbnail: true,
            allow_playlist: true,
            ..AppSettings::default()
        };
        settings.without_ffmpeg();
        assert!(!settings.convert_to_audio);
        assert!(!settings.embed_metadata);
        assert!(!settings.embed_thumbnail);
        assert!(settings.allow_playlist);
    }
}
