//! Data returned by the engine

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Metadata recovered by the pre-fetch (single video or flat playlist)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// `playlist` for playlists, `video` or absent for single items
    #[serde(default, rename = "_type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub playlist_count: Option<u64>,
    #[serde(default)]
    pub entries: Vec<PlaylistEntry>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Entry of a flat playlist listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl MediaInfo {
    pub fn is_playlist(&self) -> bool {
        self.kind.as_deref() == Some("playlist")
    }

    /// Number of playlist entries, if this is a playlist
    pub fn entry_count(&self) -> Option<u64> {
        if !self.is_playlist() {
            return None;
        }
        Some(self.playlist_count.unwrap_or(self.entries.len() as u64))
    }

    /// Log line announcing what is about to be downloaded
    pub fn summary(&self) -> Option<String> {
        let title = self.title.as_deref()?.trim();
        if title.is_empty() {
            return None;
        }
        Some(match self.entry_count() {
            Some(count) => format!("Playlist: {} ({} entries)", title, count),
            None => format!("Title: {}", title),
        })
    }
}

/// Result of a completed download operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadOutcome {
    /// Final paths of the files written by the engine
    pub saved_files: Vec<PathBuf>,
    /// Errors for items the tolerant playlist mode skipped
    pub skipped: Vec<String>,
}

impl DownloadOutcome {
    /// Message carried by the terminal success event
    pub fn summary(&self, output_directory: &Path) -> String {
        let mut message = match self.saved_files.len() {
            0 => format!("Download complete. Files are in {}", output_directory.display()),
            1 => format!("Download complete: saved 1 file to {}", output_directory.display()),
            n => format!("Download complete: saved {} files to {}", n, output_directory.display()),
        };
        if !self.skipped.is_empty() {
            message.push_str(&format!(" ({} item(s) skipped)", self.skipped.len()));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_summary() {
        let info: MediaInfo =
            serde_json::from_str(r#"{"id":"abc","title":"Some Song","_type":"video"}"#).unwrap();
        assert!(!info.is_playlist());
        assert_eq!(info.summary().as_deref(), Some("Title: Some Song"));
    }

    #[test]
    fn test_playlist_summary_counts_entries() {
        let info: MediaInfo = serde_json::from_str(
            r#"{"title":"Mix","_type":"playlist","entries":[{"id":"a"},{"id":"b"},{"id":"c"}]}"#,
        )
        .unwrap();
        assert_eq!(info.entry_count(), Some(3));
        assert_eq!(info.summary().as_deref(), Some("Playlist: Mix (3 entries)"));
    }

    #[test]
    fn test_missing_title_has_no_summary() {
        let info: MediaInfo = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert!(info.summary().is_none());
    }

    #[test]
    fn test_outcome_summary() {
        let outcome = DownloadOutcome {
            saved_files: vec![PathBuf::from("/m/a.mp3"), PathBuf::from("/m/b.mp3")],
            skipped: vec!["Video unavailable".into()],
        };
        let text = outcome.summary(Path::new("/m"));
        assert!(text.contains("saved 2 files"));
        assert!(text.contains("1 item(s) skipped"));
    }
}
