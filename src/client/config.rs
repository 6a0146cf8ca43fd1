//! Client configuration.

use serde::{Deserialize, Serialize};

/// Transport settings for a [`RestClient`](super::RestClient).
///
/// Every field has a default, so partial JSON documents are accepted by
/// [`from_json`](Self::from_json).
///
/// # Examples
///
/// ```
/// use simple_rest_client::client::ClientConfig;
///
/// let config = ClientConfig {
///     request_timeout_ms: Some(5_000),
///     ..Default::default()
/// };
/// assert!(!config.accept_invalid_certs);
///
/// let config = ClientConfig::from_json(r#"{"connect_timeout_ms": 250}"#).unwrap();
/// assert_eq!(config.connect_timeout_ms, Some(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Timeout for the whole exchange, in milliseconds. `None` keeps the transport default.
    pub request_timeout_ms: Option<u64>,

    /// Timeout for establishing the connection, in milliseconds.
    pub connect_timeout_ms: Option<u64>,

    /// Accept any server certificate and host name.
    ///
    /// Only meant for tests against self-signed endpoints. Affects clients built from
    /// this config and nothing else.
    pub accept_invalid_certs: bool,

    /// Proxy used for all schemes. Empty means no proxy.
    pub proxy_url: String,

    /// Value of the `User-Agent` header. Empty sends none.
    pub user_agent: String,

    /// Emit per-request debug logs.
    pub enable_logging: bool,
}

impl ClientConfig {
    /// Default configuration with certificate verification disabled.
    pub fn insecure() -> Self {
        ClientConfig {
            accept_invalid_certs: true,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: None,
            connect_timeout_ms: None,
            accept_invalid_certs: false,
            proxy_url: String::new(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            enable_logging: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, None);
        assert!(!config.accept_invalid_certs);
        assert!(config.enable_logging);
        assert!(config.user_agent.starts_with("simple-rest-client/"));
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ClientConfig::from_json("{}").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_insecure() {
        let config = ClientConfig::insecure();
        assert!(config.accept_invalid_certs);
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }

    #[test]
    fn test_invalid_json() {
        assert!(ClientConfig::from_json(r#"{"request_timeout_ms": "soon"}"#).is_err());
    }
}
