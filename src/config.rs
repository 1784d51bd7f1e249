//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Snapshot Feed ===
    /// Endpoint returning the full multi-symbol book snapshot.
    #[serde(default = "default_book_url")]
    pub book_url: String,

    /// Milliseconds between poll attempts.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Display ===
    /// Symbol selected before the first snapshot arrives.
    #[serde(default = "default_symbol")]
    pub default_symbol: String,

    /// How long a notification stays on screen, in milliseconds.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,

    // === Observability ===
    /// Log sink used while the terminal UI owns stdout.
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Port for the Prometheus scrape listener. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_book_url() -> String {
    "http://127.0.0.1:4000/book".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_http_timeout_ms() -> u64 {
    2000
}

fn default_symbol() -> String {
    "XRP/USD".to_string()
}

fn default_notice_ttl_ms() -> u64 {
    3000
}

fn default_log_file() -> String {
    "l2book.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            book_url: default_book_url(),
            poll_interval_ms: default_poll_interval_ms(),
            http_timeout_ms: default_http_timeout_ms(),
            default_symbol: default_symbol(),
            notice_ttl_ms: default_notice_ttl_ms(),
            log_file: default_log_file(),
            rust_log: default_log_level(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.book_url)
            .map_err(|e| format!("BOOK_URL is not a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("BOOK_URL must be http or https, got {}", url.scheme()));
        }

        if self.poll_interval_ms == 0 {
            return Err("POLL_INTERVAL_MS must be greater than 0".to_string());
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.default_symbol.trim().is_empty() {
            return Err("DEFAULT_SYMBOL must not be empty".to_string());
        }

        Ok(())
    }

    /// Poll period as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Request timeout as a `Duration`.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// Notification lifetime as a `Duration`.
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.book_url, "http://127.0.0.1:4000/book");
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.http_timeout(), Duration::from_secs(2));
        assert_eq!(config.default_symbol, "XRP/USD");
        assert!(config.metrics_port.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unparseable_url() {
        let config = Config {
            book_url: "not a url".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let config = Config {
            book_url: "ws://127.0.0.1:4000/book".to_string(),
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.contains("http or https"));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let config = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_ms: 0,
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.contains("HTTP_TIMEOUT_MS"));
    }

    #[test]
    fn validate_rejects_blank_default_symbol() {
        let config = Config {
            default_symbol: "  ".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}
