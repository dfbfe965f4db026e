use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TOAST_SECONDS: u64 = 5;

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,

    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub session_db: Option<PathBuf>,

    #[serde(default)]
    pub toast_seconds: Option<u64>,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api: Option<String>,
    pub log_level: Option<String>,
    pub session_db: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub log_level: String,
    pub session_db: Option<PathBuf>,
    pub toast_ttl: Duration,
}

impl Config {
    /// Layer CLI flags over the file over the defaults
    pub fn resolve(self, overrides: Overrides) -> Settings {
        let api = overrides
            .api
            .or(self.api_base_url)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let log_level = overrides
            .log_level
            .or(self.log_level)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let session_db = overrides
            .session_db
            .or(self.session_db)
            .or_else(session_db_path);
        let toast_seconds = self
            .toast_seconds
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TOAST_SECONDS);

        Settings {
            api_base_url: normalize_api_base(&api),
            log_level,
            session_db,
            toast_ttl: Duration::from_secs(toast_seconds),
        }
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content)
}

/// Malformed files fall back to defaults
pub fn parse(content: &str) -> Config {
    toml::from_str::<Config>(content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("STOCKDESK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("stockdesk").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("stockdesk").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "stockdesk", "stockdesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("stockdesk"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("stockdesk"));
    }
    directories::ProjectDirs::from("io", "stockdesk", "stockdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn session_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("session.sqlite3"))
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("stockdesk.log"))
}

/// Add `http://` when no scheme is given and drop trailing slashes
pub fn normalize_api_base(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
