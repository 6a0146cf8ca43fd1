//! Main REST client implementation.
//!
//! Provides [`RestClient`] and the [`request_to`] / [`request_to_url`] entry points.
//!
//! # Examples
//!
//! ## Simple GET request
//!
//! ```no_run
//! use simple_rest_client::request_to;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let body = request_to("http://example.com/api/data")?
//!         .accept("text/xml")
//!         .get()?
//!         .as_string(&[200])?;
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```
//!
//! ## Client with its own configuration and readers
//!
//! ```no_run
//! use simple_rest_client::{ClientConfig, JsonEntityReader, ReaderRegistry, RestClient};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let readers = Arc::new(ReaderRegistry::with_defaults());
//!     readers.register("json", JsonEntityReader::new());
//!
//!     let client = RestClient::with_config(ClientConfig {
//!         request_timeout_ms: Some(2_000),
//!         ..Default::default()
//!     })?
//!     .with_readers(readers);
//!
//!     let status = client.request_to("http://example.com/api/data")?.head()?.status_code();
//!     println!("Status: {}", status);
//!     Ok(())
//! }
//! ```

use super::{config::ClientConfig, utils::parse_url, RequestBuilder, Response};
use crate::entity::ReaderRegistry;
use crate::error::{RestError, Result};
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use url::Url;

static DEFAULT_CLIENT: OnceLock<RestClient> = OnceLock::new();

/// Start a request to `url` with the shared default client.
///
/// # Errors
///
/// Returns [`RestError::InvalidUrl`] if `url` is not an absolute `http`/`https` URL.
pub fn request_to(url: &str) -> Result<RequestBuilder> {
    parse_url(url).map(request_to_url)
}

/// Start a request to an already parsed `url` with the shared default client.
///
/// The default client is created on first execution, so transport setup errors
/// surface from the executing call as [`RestError::RequestFailed`].
pub fn request_to_url(url: Url) -> RequestBuilder {
    RequestBuilder::new(None, url)
}

pub(crate) fn default_client() -> Result<RestClient> {
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client.clone());
    }
    let client = RestClient::new()?;
    Ok(DEFAULT_CLIENT.get_or_init(|| client).clone())
}

/// A blocking REST client.
///
/// Cloning is cheap: the transport, the configuration and the reader registry are
/// shared between clones.
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::blocking::Client,
    config: Arc<ClientConfig>,
    readers: Arc<ReaderRegistry>,
}

impl RestClient {
    /// Create a client with the default configuration and the global reader registry.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with a custom configuration and the global reader registry.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::RequestFailed`] if the proxy URL is invalid or the
    /// transport cannot be initialized.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().http1_title_case_headers();

        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        if !config.user_agent.is_empty() {
            builder = builder.user_agent(config.user_agent.as_str());
        }
        if !config.proxy_url.is_empty() {
            builder = builder.proxy(reqwest::Proxy::all(&config.proxy_url)?);
        }
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for this client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(RestClient {
            client,
            config: Arc::new(config),
            readers: ReaderRegistry::global(),
        })
    }

    /// Use `readers` instead of the global registry for responses of this client.
    pub fn with_readers(mut self, readers: Arc<ReaderRegistry>) -> Self {
        self.readers = readers;
        self
    }

    /// Start a request to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidUrl`] if `url` is not an absolute `http`/`https` URL.
    pub fn request_to(&self, url: &str) -> Result<RequestBuilder> {
        parse_url(url).map(|url| self.request_to_url(url))
    }

    /// Start a request to an already parsed `url`.
    pub fn request_to_url(&self, url: Url) -> RequestBuilder {
        RequestBuilder::new(Some(self.clone()), url)
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the reader registry used by this client's responses
    pub fn readers(&self) -> &Arc<ReaderRegistry> {
        &self.readers
    }

    /// Send one request and wait for the response head.
    pub(crate) fn execute(
        &self,
        method: Method,
        url: Url,
        headers: &[(String, String)],
        body: Option<Bytes>,
    ) -> Result<Response> {
        let header_map = to_header_map(headers)?;

        if self.config.enable_logging {
            tracing::debug!(%method, %url, headers = header_map.len(), "sending request");
        }

        let mut req_builder = self.client.request(method.clone(), url).headers(header_map);

        if let Some(body) = body {
            if method == Method::POST || method == Method::PUT {
                req_builder = req_builder.body(body);
            }
        }

        let response = req_builder.send()?;

        if self.config.enable_logging {
            tracing::debug!(
                %method,
                url = %response.url(),
                status = response.status().as_u16(),
                "received response head"
            );
        }

        Ok(Response::new(response, Arc::clone(&self.readers)))
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.config)
            .field("readers", &self.readers)
            .finish()
    }
}

/// Convert stored headers in order; a later entry overwrites an earlier one whose name
/// differs only in case.
fn to_header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut header_map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(RestError::request_failed)?;
        let value = HeaderValue::from_str(value).map_err(RestError::request_failed)?;
        header_map.insert(name, value);
    }
    Ok(header_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RestClient::new().unwrap();
        assert_eq!(client.config(), &ClientConfig::default());
        assert!(Arc::ptr_eq(client.readers(), &ReaderRegistry::global()));
    }

    #[test]
    fn test_client_with_readers() {
        let readers = Arc::new(ReaderRegistry::new());
        let client = RestClient::new().unwrap().with_readers(Arc::clone(&readers));
        assert!(Arc::ptr_eq(client.readers(), &readers));
    }

    #[test]
    fn test_insecure_client_creation() {
        let client = RestClient::with_config(ClientConfig::insecure()).unwrap();
        assert!(client.config().accept_invalid_certs);
    }

    #[test]
    fn test_invalid_proxy_fails() {
        let config = ClientConfig {
            proxy_url: "http://[::1".to_string(),
            ..Default::default()
        };
        assert!(matches!(RestClient::with_config(config), Err(RestError::RequestFailed { .. })));
    }

    #[test]
    fn test_request_to_invalid_url() {
        assert!(matches!(request_to("not_a_url"), Err(RestError::InvalidUrl { .. })));
    }

    #[test]
    fn test_to_header_map() {
        let headers = vec![
            ("Accept".to_string(), "text/xml".to_string()),
            ("X-Custom".to_string(), "1".to_string()),
        ];
        let map = to_header_map(&headers).unwrap();
        assert_eq!(map.get("accept").unwrap(), "text/xml");
        assert_eq!(map.get("x-custom").unwrap(), "1");
    }

    #[test]
    fn test_to_header_map_later_case_variant_wins() {
        let headers = vec![
            ("content-type".to_string(), "text/xml".to_string()),
            ("Content-Type".to_string(), "text/plain".to_string()),
        ];
        let map = to_header_map(&headers).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn test_to_header_map_rejects_invalid_name() {
        let headers = vec![("Bad Header".to_string(), "x".to_string())];
        assert!(matches!(to_header_map(&headers), Err(RestError::RequestFailed { .. })));
    }
}
