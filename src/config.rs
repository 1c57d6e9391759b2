use serde::Deserialize;
use std::path::PathBuf;

/// Default log filter directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoutConfig {
    pub log: LogConfig,
}

impl ScoutConfig {
    /// Parse a JSON configuration document; missing fields use defaults.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. "info" or "version_scout=debug"
    pub level: String,
    /// Write the log file as JSON lines
    pub json: bool,
    /// Log to [`log_path`] when no explicit `file` is given
    pub file_logging: bool,
    /// Log file path; enables file logging on its own
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            file_logging: false,
            file: None,
        }
    }
}

impl LogConfig {
    /// The file to log to, if any: `file`, else the default log path when
    /// `file_logging` is on.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file_path_or(log_path)
    }

    fn file_path_or(&self, default: impl FnOnce() -> PathBuf) -> Option<PathBuf> {
        match &self.file {
            Some(file) => Some(file.clone()),
            None if self.file_logging => Some(default()),
            None => None,
        }
    }
}

/// Data directory holding the default log file:
/// $XDG_DATA_HOME/version-scout, else ~/.local/share/version-scout,
/// else ./version-scout.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Default log file used when file logging is on without an explicit path.
pub fn log_path() -> PathBuf {
    data_dir().join("version-scout.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-scout")
}
