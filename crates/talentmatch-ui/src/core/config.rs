//! Log stream client configuration.
//!
//! # Design
//! - Defaults mirror the backend contract: `/api/logs/stream`, 500 records, 5 s reconnect.
//! - Verbose mode is derived from the page host; pages may override through JSON and
//!   a developer may force it through a LocalStorage flag.
//! - Resolution is pure so the precedence rules are testable without a browser.

use serde::Deserialize;

use crate::core::buffer::DEFAULT_CAPACITY;

/// Default log stream endpoint path.
pub const DEFAULT_ENDPOINT: &str = "/api/logs/stream";
/// Fixed delay between a stream error and the reconnect attempt.
pub const DEFAULT_RECONNECT_DELAY_MS: u32 = 5_000;
/// LocalStorage key that forces verbose mode on or off.
pub const VERBOSE_STORAGE_KEY: &str = "talentmatch.logger.verbose";

/// Injected configuration for the log stream client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Endpoint path or absolute URL of the SSE stream.
    pub endpoint: String,
    /// Scrollback capacity shared by the buffer and the panel.
    pub capacity: usize,
    /// Delay before reconnecting after a stream error.
    pub reconnect_delay_ms: u32,
    /// Auto-connect and mirror to the console.
    pub verbose: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            capacity: DEFAULT_CAPACITY,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            verbose: false,
        }
    }
}

impl LoggerConfig {
    /// Defaults with verbose mode enabled for development hosts.
    #[must_use]
    pub fn for_host(hostname: &str) -> Self {
        Self {
            verbose: is_development_host(hostname),
            ..Self::default()
        }
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence, lowest first: host detection, page overrides, LocalStorage flag.
    #[must_use]
    pub fn resolve(
        hostname: &str,
        overrides: &LoggerOverrides,
        stored_verbose: Option<&str>,
    ) -> Self {
        let mut config = Self::for_host(hostname);
        if let Some(endpoint) = overrides
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            config.endpoint = endpoint.to_string();
        }
        if let Some(capacity) = overrides.capacity {
            config.capacity = capacity.max(1);
        }
        if let Some(delay) = overrides.reconnect_delay_ms {
            config.reconnect_delay_ms = delay;
        }
        if let Some(verbose) = overrides.verbose {
            config.verbose = verbose;
        }
        if let Some(verbose) = stored_verbose.and_then(parse_flag) {
            config.verbose = verbose;
        }
        config
    }
}

/// Partial configuration injected by the page (`data-logger-config` JSON).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerOverrides {
    /// Endpoint override.
    pub endpoint: Option<String>,
    /// Capacity override.
    pub capacity: Option<usize>,
    /// Reconnect delay override.
    pub reconnect_delay_ms: Option<u32>,
    /// Verbose override.
    pub verbose: Option<bool>,
}

impl LoggerOverrides {
    /// Parse the page-provided JSON blob.
    ///
    /// # Errors
    /// Returns the serde error when the blob is not valid JSON or a field has the wrong type.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }
}

/// Loopback and development host names that enable verbose mode.
#[must_use]
pub fn is_development_host(hostname: &str) -> bool {
    let host = hostname.trim().to_ascii_lowercase();
    matches!(host.as_str(), "localhost" | "127.0.0.1" | "::1" | "[::1]")
        || host.ends_with(".localhost")
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().trim_matches('"').to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Some(true),
        "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let config = LoggerConfig::default();
        assert_eq!(config.endpoint, "/api/logs/stream");
        assert_eq!(config.capacity, 500);
        assert_eq!(config.reconnect_delay_ms, 5_000);
        assert!(!config.verbose);
    }

    #[test]
    fn verbose_only_on_development_hosts() {
        assert!(LoggerConfig::for_host("localhost").verbose);
        assert!(LoggerConfig::for_host("127.0.0.1").verbose);
        assert!(LoggerConfig::for_host("[::1]").verbose);
        assert!(LoggerConfig::for_host("talentmatch.localhost").verbose);
        assert!(!LoggerConfig::for_host("talentmatch.example.com").verbose);
        assert!(!LoggerConfig::for_host("localhost.example.com").verbose);
    }

    #[test]
    fn overrides_apply_over_host_detection() {
        let overrides =
            LoggerOverrides::parse(r#"{"endpoint":"/logs","capacity":0,"verbose":true}"#).unwrap();
        let config = LoggerConfig::resolve("app.example.com", &overrides, None);
        assert_eq!(config.endpoint, "/logs");
        assert_eq!(config.capacity, 1);
        assert_eq!(config.reconnect_delay_ms, DEFAULT_RECONNECT_DELAY_MS);
        assert!(config.verbose);
    }

    #[test]
    fn storage_flag_wins_last() {
        let overrides = LoggerOverrides {
            verbose: Some(true),
            ..LoggerOverrides::default()
        };
        assert!(!LoggerConfig::resolve("localhost", &overrides, Some("false")).verbose);
        let none = LoggerOverrides::default();
        assert!(LoggerConfig::resolve("example.com", &none, Some("\"true\"")).verbose);
        assert!(LoggerConfig::resolve("localhost", &none, Some("maybe")).verbose);
    }

    #[test]
    fn blank_endpoint_override_is_ignored() {
        let overrides = LoggerOverrides {
            endpoint: Some("  ".to_string()),
            ..LoggerOverrides::default()
        };
        assert_eq!(
            LoggerConfig::resolve("localhost", &overrides, None).endpoint,
            DEFAULT_ENDPOINT
        );
    }

    #[test]
    fn override_parsing_rejects_garbage() {
        assert!(LoggerOverrides::parse("{nope").is_err());
        assert_eq!(LoggerOverrides::parse("").unwrap(), LoggerOverrides::default());
        let parsed = LoggerOverrides::parse(r#"{"reconnectDelayMs":250}"#).unwrap();
        assert_eq!(parsed.reconnect_delay_ms, Some(250));
    }
}
