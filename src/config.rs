// config.rs
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:8000/chat";
pub const DEFAULT_AGENT_NAME: &str = "real_estate_agent";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} is not an http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a positive number of seconds: {value}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the HTML host listens.
    pub addr: SocketAddr,
    /// One-shot property search endpoint.
    pub search_url: Url,
    /// Agent whose state the host renders.
    pub agent_name: String,
    pub search_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or blank variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str, default: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let var = "PROPERTY_FINDER_ADDR";
        let value = get(var, DEFAULT_ADDR);
        let addr = value
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr { var, value })?;

        let var = "PROPERTY_SEARCH_URL";
        let value = get(var, DEFAULT_SEARCH_URL);
        let search_url = match Url::parse(&value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => url,
            _ => return Err(ConfigError::InvalidUrl { var, value }),
        };

        let agent_name = get("PROPERTY_AGENT_NAME", DEFAULT_AGENT_NAME);

        let var = "PROPERTY_SEARCH_TIMEOUT_SECS";
        let value = get(var, &DEFAULT_TIMEOUT_SECS.to_string());
        let secs = match value.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => return Err(ConfigError::InvalidTimeout { var, value }),
        };

        Ok(Config {
            addr,
            search_url,
            agent_name,
            search_timeout: Duration::from_secs(secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.search_url.as_str(), DEFAULT_SEARCH_URL);
        assert_eq!(config.agent_name, "real_estate_agent");
        assert_eq!(config.search_timeout, Duration::from_secs(120));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("PROPERTY_FINDER_ADDR", "0.0.0.0:8080"),
            ("PROPERTY_SEARCH_URL", "https://agent.example.com/chat"),
            ("PROPERTY_AGENT_NAME", "realtor"),
            ("PROPERTY_SEARCH_TIMEOUT_SECS", " 15 "),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.search_url.host_str(), Some("agent.example.com"));
        assert_eq!(config.agent_name, "realtor");
        assert_eq!(config.search_timeout, Duration::from_secs(15));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("PROPERTY_FINDER_ADDR", "localhost")]),
            Err(ConfigError::InvalidAddr { .. })
        ));
        assert!(matches!(
            config_from(&[("PROPERTY_SEARCH_URL", "ftp://example.com/x")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            config_from(&[("PROPERTY_SEARCH_URL", "not a url")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            config_from(&[("PROPERTY_SEARCH_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }
}
