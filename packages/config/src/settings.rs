// ABOUTME: Typed service configuration loaded from environment variables
// ABOUTME: Validates ports, endpoint URLs and timeouts; treats template values as unset

use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid URL for {key}: {value}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("Invalid timeout for {key}: {value}")]
    InvalidTimeout { key: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// An outbound HTTP endpoint the service may call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base URL without a trailing slash
    pub url: String,
    pub timeout: Duration,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let url = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

/// The AI generation webhook plus its shared secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationEndpoint {
    pub endpoint: Endpoint,
    pub secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    /// `None` when unset or left at a placeholder; ingestion then synthesizes
    pub generation: Option<GenerationEndpoint>,
    /// `None` when unset or left at a placeholder
    pub lending_api: Option<Endpoint>,
    pub generation_timeout: Duration,
    pub persist_timeout: Duration,
}

/// Returns true for blank values and values still holding template text
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m))
}

impl Config {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port_str = lookup(LENDFLOW_API_PORT)
            .or_else(|| lookup(PORT))
            .unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_str.trim().parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            lookup(LENDFLOW_CORS_ORIGIN).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let generation_timeout = parse_timeout(
            &lookup,
            LENDFLOW_GENERATION_TIMEOUT_SECS,
            DEFAULT_GENERATION_TIMEOUT_SECS,
        )?;
        let persist_timeout = parse_timeout(
            &lookup,
            LENDFLOW_PERSIST_TIMEOUT_SECS,
            DEFAULT_PERSIST_TIMEOUT_SECS,
        )?;

        let generation = parse_url(&lookup, LENDFLOW_GENERATION_URL)?.map(|url| {
            let secret = lookup(LENDFLOW_GENERATION_SECRET).filter(|s| !is_placeholder(s));
            if secret.is_none() {
                warn!("{} not set - generation requests will be unauthenticated", LENDFLOW_GENERATION_SECRET);
            }
            GenerationEndpoint {
                endpoint: Endpoint::new(url, generation_timeout),
                secret,
            }
        });

        let lending_api = parse_url(&lookup, LENDFLOW_LENDING_API_URL)?
            .map(|url| Endpoint::new(url, persist_timeout));

        Ok(Config {
            port,
            cors_origin,
            generation,
            lending_api,
            generation_timeout,
            persist_timeout,
        })
    }
}

fn parse_timeout<F>(lookup: &F, key: &'static str, default: u64) -> ConfigResult<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(Duration::from_secs(default)),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::InvalidTimeout { key, value }),
        },
    }
}

fn parse_url<F>(lookup: &F, key: &'static str) -> ConfigResult<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        warn!("{} not set - falling back to local synthesis", key);
        return Ok(None);
    };

    if is_placeholder(&value) {
        warn!("{} holds a placeholder value - falling back to local synthesis", key);
        return Ok(None);
    }

    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(value.trim().to_string())),
        _ => Err(ConfigError::InvalidUrl { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ConfigResult<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
        assert!(config.generation.is_none());
        assert!(config.lending_api.is_none());
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(config.persist_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_legacy_port_fallback() {
        let config = config_from(&[(PORT, "8080")]).unwrap();
        assert_eq!(config.port, 8080);

        let config = config_from(&[(PORT, "8080"), (LENDFLOW_API_PORT, "9090")]).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_port_zero() {
        let result = config_from(&[(LENDFLOW_API_PORT, "0")]);
        assert!(matches!(result.unwrap_err(), ConfigError::PortOutOfRange(0)));
    }

    #[rstest]
    #[case("-1")]
    #[case("65536")]
    #[case("1.5")]
    #[case("not-a-number")]
    fn test_invalid_port_formats(#[case] port_str: &str) {
        let result = config_from(&[(LENDFLOW_API_PORT, port_str)]);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidPort(_)));
    }

    #[test]
    fn test_endpoints_configured() {
        let config = config_from(&[
            (LENDFLOW_GENERATION_URL, "https://hooks.lendflow.io/generate"),
            (LENDFLOW_GENERATION_SECRET, "s3cret"),
            (LENDFLOW_LENDING_API_URL, "https://api.lendflow.io/v1/"),
            (LENDFLOW_PERSIST_TIMEOUT_SECS, "5"),
        ])
        .unwrap();

        let generation = config.generation.unwrap();
        assert_eq!(generation.endpoint.url, "https://hooks.lendflow.io/generate");
        assert_eq!(generation.endpoint.timeout, Duration::from_secs(30));
        assert_eq!(generation.secret.as_deref(), Some("s3cret"));

        let lending = config.lending_api.unwrap();
        assert_eq!(lending.url, "https://api.lendflow.io/v1");
        assert_eq!(lending.timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case("")]
    #[case("https://your-n8n-instance/webhook")]
    #[case("https://api.example.com")]
    fn test_placeholder_urls_are_unset(#[case] value: &str) {
        let config = config_from(&[
            (LENDFLOW_GENERATION_URL, value),
            (LENDFLOW_LENDING_API_URL, value),
        ])
        .unwrap();
        assert!(config.generation.is_none());
        assert!(config.lending_api.is_none());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = config_from(&[(LENDFLOW_LENDING_API_URL, "ftp://files.lendflow.io")]);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl { .. }));

        let result = config_from(&[(LENDFLOW_GENERATION_URL, "not a url")]);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl { .. }));
    }

    #[rstest]
    #[case("0")]
    #[case("abc")]
    fn test_invalid_timeout(#[case] value: &str) {
        let result = config_from(&[(LENDFLOW_GENERATION_TIMEOUT_SECS, value)]);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::PortOutOfRange(0);
        assert_eq!(error.to_string(), "Port 0 is out of valid range (1-65535)");
    }
}
