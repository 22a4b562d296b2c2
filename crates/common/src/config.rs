//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::Theme;

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where finished strips are written.
    pub output_dir: PathBuf,

    /// Directory holding the theme overlay images.
    pub assets_dir: PathBuf,

    /// Theme selected at startup and after a reset.
    pub theme: Theme,

    /// Camera and capture defaults.
    pub camera: CameraDefaults,

    /// Font used for the date stamp. When unset, well-known system
    /// monospace fonts are searched.
    pub stamp_font: Option<PathBuf>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default capture parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDefaults {
    /// Explicit capture device (e.g. "/dev/video2"). Auto-detected when unset.
    pub device: Option<String>,

    /// Preferred capture width.
    pub width: u32,

    /// Preferred capture height.
    pub height: u32,

    /// Countdown length before each shutter, in seconds.
    pub countdown_secs: u32,

    /// Countdown tick interval in milliseconds.
    pub tick_millis: u64,

    /// Show a live preview window while shooting.
    pub preview: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "chacha=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            assets_dir: PathBuf::from("assets"),
            theme: Theme::default(),
            camera: CameraDefaults::default(),
            stamp_font: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            device: None,
            width: 1920,
            height: 1080,
            countdown_secs: 3,
            tick_millis: 1000,
            preview: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("chacha-photobooth").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "chacha-config-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn defaults_match_booth_constants() {
        let config = AppConfig::default();
        assert_eq!(config.theme, Theme::Pink);
        assert!(config.camera.preview);
        assert_eq!(config.camera.width, 1920);
        assert_eq!(config.camera.height, 1080);
        assert_eq!(config.camera.countdown_secs, 3);
        assert_eq!(config.camera.tick_millis, 1000);
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.theme = Theme::Blue;
        config.camera.device = Some("/dev/video3".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_or_partial_files_fall_back() {
        let dir = scratch_dir("partial");
        std::fs::create_dir_all(&dir).unwrap();

        let broken = dir.join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert_eq!(AppConfig::load_from(&broken), AppConfig::default());

        let partial = dir.join("partial.json");
        std::fs::write(&partial, r#"{ "theme": "blue" }"#).unwrap();
        let loaded = AppConfig::load_from(&partial);
        assert_eq!(loaded.theme, Theme::Blue);
        assert_eq!(loaded.camera, CameraDefaults::default());

        let unknown_theme = dir.join("mauve.json");
        std::fs::write(&unknown_theme, r#"{ "theme": "mauve" }"#).unwrap();
        assert_eq!(AppConfig::load_from(&unknown_theme).theme, Theme::Pink);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
