//! Service configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT};

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human readable, one event per line
    Pretty,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    /// Parse a format name, falling back to `Pretty` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Process-wide configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address to bind
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Largest uploaded file part accepted, in bytes
    pub max_upload_bytes: usize,

    /// Largest request body accepted, in bytes
    pub max_body_bytes: usize,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Values that are missing or fail to parse keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            max_body_bytes: lookup("MAX_BODY_BYTES")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            log_format: lookup("LOG_FORMAT")
                .map(|s| LogFormat::from_name(&s))
                .unwrap_or(defaults.log_format),
        }
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.max_body_bytes, 16 * 1024 * 1024);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("LOG_FORMAT", "JSON"),
        ]));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("MAX_BODY_BYTES", "-5"),
            ("LOG_FORMAT", "xml"),
        ]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_body_bytes, 16 * 1024 * 1024);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
