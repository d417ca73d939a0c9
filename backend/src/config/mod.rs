//! Central module for application-wide configuration settings.
//!
//! Settings come from the process environment (optionally seeded from a
//! `.env` file by the binary): listen address, remote API base URL, where the
//! session is persisted, and the log format.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub bind_addr: SocketAddr,
    pub api_base_url: String,
    /// `None` keeps the session in memory only.
    pub storage_path: Option<PathBuf>,
    pub log_json: bool,
    pub api_timeout: Duration,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("CONSOLE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| invalid("CONSOLE_BIND", &bind_raw, e))?;

        let api_base_url =
            get("CONSOLE_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(invalid(
                "CONSOLE_API_BASE_URL",
                &api_base_url,
                "expected an http(s) URL",
            ));
        }

        let storage_path = get("CONSOLE_STORAGE_PATH").map(PathBuf::from);

        let log_json = match get("CONSOLE_LOG_JSON") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid("CONSOLE_LOG_JSON", &raw, "expected true/false/1/0")
            })?,
            None => false,
        };

        let api_timeout = match get("CONSOLE_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| invalid("CONSOLE_API_TIMEOUT_SECS", &raw, e))?;
                if secs == 0 {
                    return Err(invalid("CONSOLE_API_TIMEOUT_SECS", &raw, "must be positive"));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            api_base_url,
            storage_path,
            log_json,
            api_timeout,
        })
    }

    /// Joins `path` onto the API base URL with exactly one slash between.
    pub fn api_url(&self, path: &str) -> String {
        let trimmed_base = self.api_base_url.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        format!("{}/{}", trimmed_base, trimmed_path)
    }

    pub fn login_url(&self) -> String {
        self.api_url("login")
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_path: None,
            log_json: false,
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        }
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ConsoleConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConsoleConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).expect("config");
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert!(cfg.storage_path.is_none());
        assert!(!cfg.log_json);
        assert_eq!(cfg.api_timeout, Duration::from_secs(DEFAULT_API_TIMEOUT_SECS));
    }

    #[test]
    fn values_are_read() {
        let cfg = config(&[
            ("CONSOLE_BIND", "0.0.0.0:8080"),
            ("CONSOLE_API_BASE_URL", "https://api.example.com/v1/"),
            ("CONSOLE_STORAGE_PATH", "/var/lib/console/session.json"),
            ("CONSOLE_LOG_JSON", "true"),
            ("CONSOLE_API_TIMEOUT_SECS", "3"),
        ])
        .expect("config");
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(
            cfg.storage_path.as_deref(),
            Some(std::path::Path::new("/var/lib/console/session.json"))
        );
        assert!(cfg.log_json);
        assert_eq!(cfg.api_timeout, Duration::from_secs(3));
        assert_eq!(cfg.login_url(), "https://api.example.com/v1/login");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[("CONSOLE_STORAGE_PATH", "  "), ("CONSOLE_BIND", "")]).expect("config");
        assert!(cfg.storage_path.is_none());
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND);
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let err = config(&[("CONSOLE_BIND", "localhost")]).expect_err("invalid");
        assert!(err.to_string().contains("CONSOLE_BIND"), "got: {err}");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        assert!(config(&[("CONSOLE_API_BASE_URL", "ftp://x")]).is_err());
    }

    #[test]
    fn bad_bool_and_zero_timeout_are_rejected() {
        assert!(config(&[("CONSOLE_LOG_JSON", "maybe")]).is_err());
        assert!(config(&[("CONSOLE_API_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn api_url_joins_with_single_slash() {
        let cfg = ConsoleConfig {
            api_base_url: "http://h/api/".to_string(),
            ..ConsoleConfig::default()
        };
        assert_eq!(cfg.api_url("/login"), "http://h/api/login");
        assert_eq!(cfg.api_url("branches"), "http://h/api/branches");
    }
}
