//! Fluent request builder.
//!
//! A [`RequestBuilder`] collects headers for one request and is consumed by the
//! method call that sends it (`get`, `head`, `delete`, `post`, `put`).
//!
//! # Headers
//!
//! Header names are stored exactly as given and compared case-sensitively: setting
//! `Accept` twice keeps the last value, while `Accept` and `accept` are two entries.
//! Headers are sent in the order they were last set, and since header names are
//! case-insensitive on the wire, the later of two case variants wins. HTTP/1 header
//! names are written in title case.
//!
//! # Request Bodies
//!
//! `post` and `put` take a writer closure that streams the body into a sink. The sink
//! is owned by the builder for the duration of the call; when the writer returns an
//! error nothing is sent.
//!
//! ```no_run
//! use std::io::Write;
//! use simple_rest_client::request_to;
//!
//! # fn main() -> simple_rest_client::Result<()> {
//! let created = request_to("http://localhost:8080/my/resource")?
//!     .basic_auth("user", "secret")
//!     .content_type("text/plain")
//!     .post(|sink| sink.write_all(b"test"))?
//!     .as_string(&[])?;
//! # Ok(())
//! # }
//! ```

use super::fetch::{default_client, RestClient};
use super::Response;
use crate::error::{RestError, Result};
use crate::protocol::{
    constants::{headers, media_types},
    format_basic_auth,
};
use bytes::{BufMut, Bytes, BytesMut};
use http::Method;
use std::io::{self, Write};
use url::Url;

/// Builder for one HTTP request.
#[must_use = "a request is only sent by get, head, delete, post or put"]
#[derive(Debug)]
pub struct RequestBuilder {
    client: Option<RestClient>,
    url: Url,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    pub(crate) fn new(client: Option<RestClient>, url: Url) -> Self {
        RequestBuilder {
            client,
            url,
            headers: Vec::new(),
        }
    }

    /// Set `Authorization: Basic <base64(username:password)>`.
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        self.auth(format_basic_auth(username, password))
    }

    /// Set the `Authorization` header verbatim.
    pub fn auth(self, token: impl Into<String>) -> Self {
        self.add_header(headers::AUTHORIZATION, token)
    }

    /// Set `Accept: application/json`.
    pub fn accept_json(self) -> Self {
        self.accept(media_types::APPLICATION_JSON)
    }

    /// Set the `Accept` header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.add_header(headers::ACCEPT, content_type)
    }

    /// Set `Content-Type: application/json`.
    pub fn send_json(self) -> Self {
        self.content_type(media_types::APPLICATION_JSON)
    }

    /// Set the `Content-Type` header.
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.add_header(headers::CONTENT_TYPE, content_type)
    }

    /// Set an arbitrary header, replacing an earlier value under exactly the same name.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| *existing != name);
        self.headers.push((name, value.into()));
        self
    }

    /// The value stored under exactly `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// All stored headers as `(name, value)` pairs, in the order they were last set.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send a GET request.
    pub fn get(self) -> Result<Response> {
        self.execute(Method::GET, None)
    }

    /// Send a HEAD request.
    pub fn head(self) -> Result<Response> {
        self.execute(Method::HEAD, None)
    }

    /// Send a DELETE request.
    pub fn delete(self) -> Result<Response> {
        self.execute(Method::DELETE, None)
    }

    /// Send a POST request whose body is produced by `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::RequestFailed`] if `writer` fails, in which case nothing is
    /// sent, or if the exchange fails.
    pub fn post<F>(self, writer: F) -> Result<Response>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let body = write_body(writer)?;
        self.execute(Method::POST, Some(body))
    }

    /// Send a PUT request whose body is produced by `writer`; see [`post`](Self::post).
    pub fn put<F>(self, writer: F) -> Result<Response>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let body = write_body(writer)?;
        self.execute(Method::PUT, Some(body))
    }

    fn execute(self, method: Method, body: Option<Bytes>) -> Result<Response> {
        let client = match self.client {
            Some(client) => client,
            None => default_client()?,
        };
        client.execute(method, self.url, &self.headers, body)
    }
}

/// Run `writer` against a fresh sink and return what it wrote.
fn write_body<F>(writer: F) -> Result<Bytes>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut sink = BytesMut::new().writer();
    writer(&mut sink).map_err(RestError::request_failed)?;
    sink.flush()?;
    let body = sink.into_inner().freeze();
    tracing::trace!(bytes = body.len(), "request body written");
    Ok(body)
}
