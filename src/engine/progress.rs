//! Typed progress ticks
//!
//! The engine reports progress as loosely shaped dictionaries. They are
//! converted into [`ProgressUpdate`] right where they enter the program.

use serde::Deserialize;

/// Phase of the item currently being transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Downloading,
    /// Raw download of the item is complete, post-processing follows
    Finished,
}

/// One progress tick for the current item
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub status: ProgressStatus,
    pub downloaded_bytes: u64,
    /// `None` when the engine knows neither the exact nor the estimated size
    pub total_bytes: Option<u64>,
}

impl ProgressUpdate {
    pub fn downloading(downloaded_bytes: u64, total_bytes: Option<u64>) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            downloaded_bytes,
            total_bytes,
        }
    }

    pub fn finished() -> Self {
        Self {
            status: ProgressStatus::Finished,
            downloaded_bytes: 0,
            total_bytes: None,
        }
    }

    /// Fraction in `0.0..=1.0`, or `None` when the total is unknown or zero
    pub fn ratio(&self) -> Option<f32> {
        match self.total_bytes {
            Some(total) if total > 0 => {
                Some((self.downloaded_bytes as f64 / total as f64).clamp(0.0, 1.0) as f32)
            }
            _ => None,
        }
    }
}

/// Progress dictionary as emitted by the engine
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProgress {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub downloaded_bytes: Option<f64>,
    #[serde(default)]
    pub total_bytes: Option<f64>,
    #[serde(default)]
    pub total_bytes_estimate: Option<f64>,
}

impl RawProgress {
    /// Convert to a typed update; unknown statuses (e.g. `error`) are dropped
    pub fn into_update(self) -> Option<ProgressUpdate> {
        let status = match self.status.as_deref()? {
            "downloading" => ProgressStatus::Downloading,
            "finished" => ProgressStatus::Finished,
            _ => return None,
        };

        let total_bytes = self
            .total_bytes
            .or(self.total_bytes_estimate)
            .filter(|t| t.is_finite() && *t > 0.0)
            .map(|t| t as u64);
        let downloaded_bytes = self
            .downloaded_bytes
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(|d| d as u64)
            .unwrap_or(0);

        Some(ProgressUpdate {
            status,
            downloaded_bytes,
            total_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<ProgressUpdate> {
        serde_json::from_str::<RawProgress>(json)
            .expect("valid json")
            .into_update()
    }

    #[test]
    fn test_exact_total_preferred() {
        let update = parse(
            r#"{"status":"downloading","downloaded_bytes":50,"total_bytes":100,"total_bytes_estimate":120.0}"#,
        )
        .unwrap();
        assert_eq!(update.total_bytes, Some(100));
        assert_eq!(update.ratio(), Some(0.5));
    }

    #[test]
    fn test_estimate_used_when_total_missing() {
        let update =
            parse(r#"{"status":"downloading","downloaded_bytes":25,"total_bytes":null,"total_bytes_estimate":100.0}"#)
                .unwrap();
        assert_eq!(update.total_bytes, Some(100));
    }

    #[test]
    fn test_unknown_total_has_no_ratio() {
        let update = parse(r#"{"status":"downloading","downloaded_bytes":25}"#).unwrap();
        assert_eq!(update.total_bytes, None);
        assert_eq!(update.ratio(), None);

        let zero = ProgressUpdate::downloading(10, Some(0));
        assert_eq!(zero.ratio(), None);
    }

    #[test]
    fn test_finished_and_unknown_status() {
        let finished = parse(r#"{"status":"finished","downloaded_bytes":100,"total_bytes":100}"#).unwrap();
        assert_eq!(finished.status, ProgressStatus::Finished);
        assert!(parse(r#"{"status":"error"}"#).is_none());
        assert!(parse(r#"{}"#).is_none());
    }

    #[test]
    fn test_ratio_clamped() {
        let over = ProgressUpdate::downloading(150, Some(100));
        assert_eq!(over.ratio(), Some(1.0));
    }
}
