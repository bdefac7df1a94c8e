use std::path::PathBuf;
use std::sync::OnceLock;

/// XDG-compliant directory layout for tomatick.
///
///   Config:  $XDG_CONFIG_HOME/tomatick  (~/.config/tomatick)
///   Data:    $XDG_DATA_HOME/tomatick    (~/.local/share/tomatick)
///
/// Resolved once through `dirs` and cached.

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Root data directory: $XDG_DATA_HOME/tomatick
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tomatick")
    })
}

/// Root config directory: $XDG_CONFIG_HOME/tomatick
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tomatick")
    })
}

/// Config file path: <config_dir>/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Log file path: <data_dir>/tomatick.log
pub fn log_file() -> PathBuf {
    data_dir().join("tomatick.log")
}
