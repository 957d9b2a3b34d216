//! Server configuration parsed from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 600;
pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR `{0}`")]
    BindAddr(String),
    #[error("invalid {key} `{value}`")]
    Number { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
    /// Embedded catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    pub reply_delay: Duration,
    pub session_capacity: usize,
}

impl SiteConfig {
    /// Build config from the process environment, after loading `.env` if present.
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0:3000`
    /// - `ALLOWED_ORIGINS`: comma separated CORS origins
    /// - `STATIC_DIR`: default `static`
    /// - `CATALOG_PATH`: JSON catalog replacing the embedded one
    /// - `CHAT_REPLY_DELAY_MS`: default 600
    /// - `SESSION_CAPACITY`: default 10000
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_addr))?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        let static_dir = lookup("STATIC_DIR")
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
            .into();

        let catalog_path = lookup("CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let reply_delay_ms = parse_number(&lookup, "CHAT_REPLY_DELAY_MS", DEFAULT_REPLY_DELAY_MS)?;
        let session_capacity =
            parse_number(&lookup, "SESSION_CAPACITY", DEFAULT_SESSION_CAPACITY)?;

        Ok(Self {
            bind_addr,
            allowed_origins,
            static_dir,
            catalog_path,
            reply_delay: Duration::from_millis(reply_delay_ms),
            session_capacity,
        })
    }
}

fn parse_number<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Number { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SiteConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.reply_delay, Duration::from_millis(600));
        assert_eq!(config.session_capacity, 10_000);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("ALLOWED_ORIGINS", " https://diamonddlube.com , ,"),
            ("CATALOG_PATH", "/etc/site/catalog.json"),
            ("CHAT_REPLY_DELAY_MS", "0"),
            ("SESSION_CAPACITY", "50"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.allowed_origins, vec!["https://diamonddlube.com"]);
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/site/catalog.json"))
        );
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.session_capacity, 50);
    }

    #[test]
    fn test_blank_catalog_path_means_embedded() {
        assert_eq!(config(&[("CATALOG_PATH", " ")]).unwrap().catalog_path, None);
    }

    #[test]
    fn test_invalid_bind_addr() {
        assert!(matches!(
            config(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::BindAddr(_))
        ));
    }

    #[test]
    fn test_invalid_number() {
        let err = config(&[("CHAT_REPLY_DELAY_MS", "soon")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid CHAT_REPLY_DELAY_MS `soon`");
    }
}
