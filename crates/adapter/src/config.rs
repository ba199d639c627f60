//! Client configuration from environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::types::POLL_TIMEOUT_MS;

pub const SERVER_URI_ENV: &str = "SERVER_URI";
pub const PRETTY_WALLS_ENV: &str = "GRID_PRETTY_WALLS";
pub const POLL_MS_ENV: &str = "GRID_POLL_MS";
pub const LOG_PATH_ENV: &str = "GRID_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Please set the {SERVER_URI_ENV} environment variable.")]
    MissingServerUri,
    #[error("Invalid {SERVER_URI_ENV} {value:?}: {reason}")]
    InvalidServerUri { value: String, reason: String },
    #[error("Invalid {SERVER_URI_ENV} {0:?}. It should start with 'ws://'.")]
    UnsupportedScheme(String),
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_uri: Url,
    pub pretty_walls: bool,
    /// Bounded wait for each network read and each key read.
    pub poll_timeout: Duration,
    pub log_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load `.env` from the working directory, then read the environment.
    ///
    /// Variables already set in the process environment take precedence over
    /// the file. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Same as [`ClientConfig::load`] with an explicit env file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let _ = dotenvy::from_path(path);
        Self::from_env()
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_uri = lookup(SERVER_URI_ENV)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingServerUri)?;
        let server_uri = parse_server_uri(&raw_uri)?;

        let pretty_walls = lookup(PRETTY_WALLS_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let poll_ms = lookup(POLL_MS_ENV)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(POLL_TIMEOUT_MS);

        let log_path = lookup(LOG_PATH_ENV)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Ok(Self {
            server_uri,
            pretty_walls,
            poll_timeout: Duration::from_millis(poll_ms),
            log_path,
        })
    }
}

/// Validate a plaintext WebSocket endpoint.
pub fn parse_server_uri(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidServerUri {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "ws" {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidServerUri {
            value: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn uses_defaults_when_only_uri_is_set() {
        let cfg = config_from(&[("SERVER_URI", "ws://127.0.0.1:8765")]).unwrap();
        assert_eq!(cfg.server_uri.as_str(), "ws://127.0.0.1:8765/");
        assert!(!cfg.pretty_walls);
        assert_eq!(cfg.poll_timeout, Duration::from_millis(POLL_TIMEOUT_MS));
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn reads_optional_settings() {
        let cfg = config_from(&[
            ("SERVER_URI", "ws://game.example:9000/play"),
            ("GRID_PRETTY_WALLS", "TRUE"),
            ("GRID_POLL_MS", "20"),
            ("GRID_LOG_PATH", "/tmp/grid.log"),
        ])
        .unwrap();
        assert!(cfg.pretty_walls);
        assert_eq!(cfg.poll_timeout, Duration::from_millis(20));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/grid.log")));
    }

    #[test]
    fn bad_poll_values_fall_back_to_default() {
        for bad in ["0", "-5", "soon"] {
            let cfg = config_from(&[("SERVER_URI", "ws://h:1"), ("GRID_POLL_MS", bad)]).unwrap();
            assert_eq!(cfg.poll_timeout, Duration::from_millis(POLL_TIMEOUT_MS));
        }
    }

    #[test]
    fn missing_uri_is_reported() {
        assert_eq!(config_from(&[]), Err(ConfigError::MissingServerUri));
        assert_eq!(
            config_from(&[("SERVER_URI", "   ")]),
            Err(ConfigError::MissingServerUri)
        );
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn env_file_fills_gaps_but_environment_wins() {
        let path = std::env::temp_dir().join(format!("tui-grid-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "SERVER_URI=ws://from-file:1\nGRID_POLL_MS=30\nGRID_PRETTY_WALLS=true\n",
        )
        .unwrap();
        std::env::set_var(SERVER_URI_ENV, "ws://from-env:2");
        std::env::remove_var(POLL_MS_ENV);
        std::env::remove_var(PRETTY_WALLS_ENV);

        let cfg = ClientConfig::load_from(&path);

        std::env::remove_var(SERVER_URI_ENV);
        std::env::remove_var(POLL_MS_ENV);
        std::env::remove_var(PRETTY_WALLS_ENV);
        let _ = std::fs::remove_file(&path);

        let cfg = cfg.unwrap();
        assert_eq!(cfg.server_uri.host_str(), Some("from-env"));
        assert_eq!(cfg.poll_timeout, Duration::from_millis(30));
        assert!(cfg.pretty_walls);
    }

    #[test]
    fn uri_must_be_plain_websocket() {
        assert_eq!(
            parse_server_uri("wss://secure.example"),
            Err(ConfigError::UnsupportedScheme("wss://secure.example".to_string()))
        );
        assert_eq!(
            parse_server_uri("http://example.com"),
            Err(ConfigError::UnsupportedScheme("http://example.com".to_string()))
        );
        assert!(matches!(
            parse_server_uri("localhost:8765"),
            Err(ConfigError::UnsupportedScheme(_)) | Err(ConfigError::InvalidServerUri { .. })
        ));
        assert!(matches!(
            parse_server_uri("not a uri"),
            Err(ConfigError::InvalidServerUri { .. })
        ));
    }
}
