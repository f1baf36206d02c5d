//! Detection of the external tools the download engine drives
//!
//! Search order for every tool:
//! 1. Bundled next to the executable (or inside a macOS .app bundle)
//! 2. System PATH
//! 3. Common installation paths (Homebrew, python.org, ~/.local/bin)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Availability of the external tools, probed once at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolStatus {
    pub ytdlp: Option<PathBuf>,
    pub ffmpeg: Option<PathBuf>,
}

impl ToolStatus {
    /// Probe the system for yt-dlp and ffmpeg
    pub fn detect() -> Self {
        Self {
            ytdlp: find_ytdlp(),
            ffmpeg: find_ffmpeg(),
        }
    }

    /// Audio conversion and embedding post-processors all go through ffmpeg
    pub fn can_convert_audio(&self) -> bool {
        self.ffmpeg.is_some()
    }

    /// Human readable warnings for missing tools, empty when everything is present
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.ytdlp.is_none() {
            warnings.push(
                "yt-dlp was not found. Downloads will fail until it is installed \
                 (pip install yt-dlp, or brew install yt-dlp)."
                    .to_string(),
            );
        }
        if self.ffmpeg.is_none() {
            warnings.push(
                "ffmpeg was not found. Conversion to audio has been disabled; \
                 files are kept in their original audio format."
                    .to_string(),
            );
        }
        warnings
    }
}

/// Find yt-dlp binary
pub fn find_ytdlp() -> Option<PathBuf> {
    find_tool("yt-dlp")
}

/// Find ffmpeg binary
pub fn find_ffmpeg() -> Option<PathBuf> {
    find_tool("ffmpeg")
}

fn find_tool(name: &str) -> Option<PathBuf> {
    if let Some(bundled) = find_bundled(name) {
        info!("✓ Using bundled {}: {:?}", name, bundled);
        return Some(bundled);
    }

    if let Ok(system) = which::which(name) {
        info!("✓ Using system {}: {:?}", name, system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths(name) {
        info!("✓ Using {} from common path: {:?}", name, common);
        return Some(common);
    }

    warn!("✗ {} not found anywhere!", name);
    None
}

fn binary_name(name: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Find a tool shipped alongside the executable
fn find_bundled(name: &str) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;
    debug!("Current executable directory: {:?}", exe_dir);

    // Structure: Audioloader.app/Contents/MacOS/audioloader
    //                                    /Resources/bin/<tool>
    if exe_dir.ends_with("MacOS") {
        let contents_dir = exe_dir.parent()?;
        let bundled = contents_dir.join("Resources").join("bin").join(name);
        if is_executable(&bundled) {
            return Some(bundled);
        }
    }

    let adjacent = exe_dir.join(binary_name(name));
    if is_executable(&adjacent) {
        return Some(adjacent);
    }

    None
}

fn find_in_common_paths(name: &str) -> Option<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("/opt/homebrew/bin"),
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/bin"),
        PathBuf::from("/Library/Frameworks/Python.framework/Versions/Current/bin"),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("bin"));
    }

    candidates
        .into_iter()
        .map(|dir| dir.join(binary_name(name)))
        .find(|path| is_executable(path))
}

/// Check if a file exists and is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        match std::fs::metadata(path) {
            Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_does_not_panic() {
        // Tools may be absent in CI
        let status = ToolStatus::detect();
        println!("Detected tools: {:?}", status);
    }

    #[test]
    fn test_warnings_for_missing_tools() {
        let status = ToolStatus::default();
        let warnings = status.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("yt-dlp"));
        assert!(warnings[1].contains("ffmpeg"));
        assert!(!status.can_convert_audio());
    }

    #[test]
    fn test_no_warnings_when_everything_present() {
        let status = ToolStatus {
            ytdlp: Some(PathBuf::from("/usr/bin/yt-dlp")),
            ffmpeg: Some(PathBuf::from("/usr/bin/ffmpeg")),
        };
        assert!(status.warnings().is_empty());
        assert!(status.can_convert_audio());
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable() {
        let path = PathBuf::from("/bin/sh");
        if path.exists() {
            assert!(is_executable(&path));
        }
        assert!(!is_executable(Path::new("/definitely/not/here")));
    }
}
