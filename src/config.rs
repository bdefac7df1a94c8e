use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::paths;

/// Application configuration, loaded from config.toml.
///
/// Every section is `#[serde(default)]`, so the file and any of its fields
/// are optional. Preset durations are fixed and deliberately absent here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sound: SoundConfig,
    pub alert: AlertConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    /// WAV file to play on completion. A generated beep is used when unset.
    pub file: Option<PathBuf>,
    /// Playback volume, 0.0 to 1.0.
    pub volume: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Also raise a desktop notification.
    pub desktop: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Redraw interval in milliseconds.
    pub frame_rate_ms: u64,
    /// Tint the terminal background with the mode colour.
    pub terminal_tint: bool,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
            volume: 0.6,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate_ms: 100,
            terminal_tint: true,
        }
    }
}

impl DisplayConfig {
    /// Redraw interval, never below 10 ms.
    pub fn frame_rate(&self) -> Duration {
        Duration::from_millis(self.frame_rate_ms.max(10))
    }
}

/// Load the config from $XDG_CONFIG_HOME/tomatick/config.toml.
/// If the file doesn't exist, returns defaults.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&paths::config_file())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let cfg = AppConfig::default();
        assert!(cfg.sound.enabled);
        assert!(cfg.sound.file.is_none());
        assert!(!cfg.alert.desktop);
        assert_eq!(cfg.display.frame_rate(), Duration::from_millis(100));
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[sound]
volume = 0.2
"#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.sound.volume, 0.2);
        // Unspecified fields keep their defaults
        assert!(cfg.sound.enabled);
        assert!(cfg.display.terminal_tint);
    }

    #[test]
    fn frame_rate_has_a_floor() {
        let cfg = DisplayConfig {
            frame_rate_ms: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(cfg.frame_rate(), Duration::from_millis(10));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config_from(&tmp.path().join("config.toml")).unwrap();
        assert!(cfg.sound.enabled);
    }

    #[test]
    fn loads_file_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[sound]\nfile = \"/tmp/ding.wav\"\n\n[alert]\ndesktop = true\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.sound.file, Some(PathBuf::from("/tmp/ding.wav")));
        assert!(cfg.alert.desktop);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[sound\nvolume = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn roundtrip_toml() {
        let cfg = AppConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let loaded: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.display.frame_rate_ms, cfg.display.frame_rate_ms);
    }
}
