//! Platform-specific utilities for Audioloader
//!
//! This module provides cross-platform abstractions for:
//! - Application directories (config, data)
//! - The default output folder

use std::path::PathBuf;

/// Returns the application data directory
/// - macOS: ~/Library/Application Support/Audioloader
/// - Windows: %APPDATA%\Audioloader
/// - Linux: ~/.local/share/audioloader
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_dir_name())
}

/// Returns the default download directory
/// - All platforms: ~/Downloads (falls back to the home directory)
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the configuration directory
/// - macOS: ~/Library/Application Support/Audioloader
/// - Windows: %APPDATA%\Audioloader
/// - Linux: ~/.config/audioloader
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app_dir_name())
    }

    #[cfg(not(target_os = "linux"))]
    {
        app_data_dir()
    }
}

/// Location of the persisted settings file
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn app_dir_name() -> &'static str {
    if cfg!(target_os = "linux") {
        "audioloader"
    } else {
        "Audioloader"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_data_dir_not_empty() {
        let dir = app_data_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_settings_path_is_json_in_config_dir() {
        let path = settings_path();
        assert!(path.starts_with(config_dir()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    }

    #[test]
    fn test_platform_specific_naming() {
        let data_dir = app_data_dir();
        if let Some(name) = data_dir.file_name() {
            let dir_name = name.to_str().unwrap_or("Audioloader");

            #[cfg(target_os = "linux")]
            assert_eq!(dir_name, "audioloader"); // lowercase on Linux

            #[cfg(not(target_os = "linux"))]
            assert_eq!(dir_name, "Audioloader");
        }
    }
}
