use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the shared password.
pub const PASSWORD_ENV: &str = "MEALTIME_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Number of most recent meals feeding the statistics.
    #[serde(default = "default_window")]
    pub stats_window: usize,
    /// Number of rows shown by the history view.
    #[serde(default = "default_window")]
    pub history_limit: usize,
    /// When false, `end_meal` is accepted without a session token.
    #[serde(default)]
    pub end_requires_auth: bool,
    /// Lifetime of a session token, in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

fn default_log_file() -> String {
    Config::log_file_path().to_string_lossy().to_string()
}
fn default_password() -> String {
    "your-password".to_string()
}
fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_window() -> usize {
    30
}
fn default_session_ttl() -> u64 {
    12 * 60 * 60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            password: default_password(),
            listen: default_listen(),
            stats_window: default_window(),
            history_limit: default_window(),
            end_requires_auth: false,
            session_ttl_secs: default_session_ttl(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("mealtimelogger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".mealtimelogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("mealtimelogger.conf")
    }

    /// Return the default path of the meal log
    pub fn log_file_path() -> PathBuf {
        Self::config_dir().join("mealtime_log.csv")
    }

    /// Load configuration from file, or return defaults if not found.
    /// The password can be overridden with `MEALTIME_PASSWORD`.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        if let Ok(pw) = env::var(PASSWORD_ENV) {
            cfg.password = pw;
        }
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        if self.stats_window == 0 {
            return Err(AppError::Config("stats_window must be at least 1".into()));
        }
        if self.log_file.trim().is_empty() {
            return Err(AppError::Config("log_file must not be empty".into()));
        }
        Ok(())
    }

    /// Resolved log path (`~` expanded).
    pub fn log_path(&self) -> PathBuf {
        expand_tilde(&self.log_file)
    }

    /// Initialize configuration directory and file. Returns the log path
    /// recorded in the configuration.
    pub fn init_all(custom_log: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        let log_path = match custom_log {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::log_file_path(),
        };

        let config = Config {
            log_file: log_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(log_path)
    }
}
