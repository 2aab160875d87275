//! Runtime configuration read from the environment
//!
//! Environment:
//! - `SITE_DATA_DIR`: directory holding `events.json` and `music.json`
//!   (default `data`, relative paths resolve from the working directory)
//! - `SITE_BIND`: listen address (default `127.0.0.1:3000`)
//! - `ADMIN_PASSWORD`: admin password; when unset all writes are refused
//! - `SITE_LOG_JSON`: `true` for JSON log lines

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_DIR: &str = "data";

const EVENTS_FILE: &str = "events.json";
const MUSIC_FILE: &str = "music.json";

/// Server configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub admin_password: Option<String>,
    pub log_json: bool,
}

impl SiteConfig {
    /// Config with a custom data directory and defaults elsewhere
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            admin_password: None,
            log_json: false,
        }
    }

    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let data_dir = match lookup("SITE_DATA_DIR") {
            Some(dir) if Path::new(&dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => current_dir.join(dir),
            None => current_dir.join(DEFAULT_DATA_DIR),
        };

        let bind = lookup("SITE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        let admin_password = lookup("ADMIN_PASSWORD").filter(|p| !p.is_empty());

        let log_json = match lookup("SITE_LOG_JSON") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::InvalidFlag("SITE_LOG_JSON".to_string(), value))?,
            None => false,
        };

        Ok(Self {
            data_dir,
            bind_addr,
            admin_password,
            log_json,
        })
    }

    /// Get path to events.json
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(EVENTS_FILE)
    }

    /// Get path to music.json
    pub fn music_path(&self) -> PathBuf {
        self.data_dir.join(MUSIC_FILE)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBind(String),
    InvalidFlag(String, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBind(addr) => write!(f, "Invalid SITE_BIND address: {}", addr),
            ConfigError::InvalidFlag(key, value) => {
                write!(f, "Invalid boolean for {}: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND);
        assert!(config.data_dir.ends_with(DEFAULT_DATA_DIR));
        assert!(config.admin_password.is_none());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("SITE_DATA_DIR", "/srv/site"),
            ("SITE_BIND", "0.0.0.0:8080"),
            ("ADMIN_PASSWORD", "secret"),
            ("SITE_LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.events_path(), PathBuf::from("/srv/site/events.json"));
        assert_eq!(config.music_path(), PathBuf::from("/srv/site/music.json"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.admin_password.as_deref(), Some("secret"));
        assert!(config.log_json);
    }

    #[test]
    fn test_empty_password_counts_as_unset() {
        let config = SiteConfig::from_lookup(lookup(&[("ADMIN_PASSWORD", "")])).unwrap();
        assert!(config.admin_password.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            SiteConfig::from_lookup(lookup(&[("SITE_BIND", "nowhere")])).unwrap_err(),
            ConfigError::InvalidBind("nowhere".to_string())
        );
        assert!(matches!(
            SiteConfig::from_lookup(lookup(&[("SITE_LOG_JSON", "maybe")])),
            Err(ConfigError::InvalidFlag(_, _))
        ));
    }
}
