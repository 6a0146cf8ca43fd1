//! Response handle and body accessors.
//!
//! The status line and headers are available as soon as the request returns. The
//! body is a forward-only stream, so every body accessor takes the [`Response`] by
//! value: each response can be read once, in one shape.
//!
//! | Accessor | Result |
//! |----------|--------|
//! | [`Response::as_input_stream`] | [`Body`], a buffered reader over the body |
//! | [`Response::as_string`] | text with normalized line endings |
//! | [`Response::as_bytes`] | the raw body |
//! | [`Response::as_entity`] | `Some(T)` from the first supporting entity reader, or `None` |
//!
//! Each accessor first checks the status code against the accepted codes given by the
//! caller, or `200, 201, 204` when the list is empty, and fails with
//! [`RestError::InvalidStatus`] otherwise.

use super::utils::{accepted_codes, content_type_or_wildcard, is_valid_status, join_lines};
use crate::entity::{downcast_entity, ReaderRegistry, TargetType};
use crate::error::{RestError, Result};
use crate::protocol::constants::{headers, COPY_BUFFER_SIZE};
use bytes::{Bytes, BytesMut};
use hyper::ext::ReasonPhrase;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::sync::Arc;
use url::Url;

/// A received response whose body has not been read yet.
pub struct Response {
    inner: reqwest::blocking::Response,
    readers: Arc<ReaderRegistry>,
}

impl Response {
    pub(crate) fn new(inner: reqwest::blocking::Response, readers: Arc<ReaderRegistry>) -> Self {
        Response { inner, readers }
    }

    /// The HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// The reason phrase sent by the server.
    ///
    /// Falls back to the canonical phrase for the status code when the server sent the
    /// standard one or none at all, and to `"Unknown"` for non-standard codes.
    pub fn message(&self) -> &str {
        self.inner
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
            .or_else(|| self.inner.status().canonical_reason())
            .unwrap_or("Unknown")
    }

    /// The final URL, after redirects.
    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    /// A response header value, if present and valid text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|value| value.to_str().ok())
    }

    /// The `Content-Type` header, `*/*` when absent.
    pub fn content_type(&self) -> &str {
        content_type_or_wildcard(self.header(headers::CONTENT_TYPE))
    }

    /// Check if the status code equals any of `codes`.
    pub fn has_valid_response_code(&self, codes: &[u16]) -> bool {
        is_valid_status(self.status_code(), codes)
    }

    /// Open the body as a buffered stream.
    pub fn as_input_stream(self, codes: &[u16]) -> Result<Body> {
        self.validate_response_code(codes)?;
        Ok(self.into_body())
    }

    /// Read the body as text.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD. Lines are rejoined with the platform line
    /// separator, so `\r\n` and `\r` endings are normalized and a trailing line ending
    /// is dropped.
    pub fn as_string(self, codes: &[u16]) -> Result<String> {
        let bytes = self.as_bytes(codes)?;
        Ok(join_lines(&String::from_utf8_lossy(&bytes)))
    }

    /// Read the whole body into memory.
    pub fn as_bytes(self, codes: &[u16]) -> Result<Bytes> {
        self.validate_response_code(codes)?;
        let mut body = self.into_body();
        let mut out = BytesMut::new();
        let mut buffer = [0u8; COPY_BUFFER_SIZE];

        loop {
            match body.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => out.extend_from_slice(&buffer[..read]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(out.freeze())
    }

    /// Read the body into `T` with this response's reader registry.
    ///
    /// Returns `Ok(None)` when no registered reader supports `T` with the response's
    /// content type.
    ///
    /// # Errors
    ///
    /// [`RestError::InvalidStatus`] for an unaccepted status; whatever the chosen
    /// reader reports, typically [`RestError::ParseFailed`].
    pub fn as_entity<T>(self, codes: &[u16]) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let readers = Arc::clone(&self.readers);
        self.as_entity_with(&readers, codes)
    }

    /// Read the body into `T` with an explicit reader registry; see
    /// [`as_entity`](Self::as_entity).
    pub fn as_entity_with<T>(self, readers: &ReaderRegistry, codes: &[u16]) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.validate_response_code(codes)?;

        let target = TargetType::of::<T>();
        let content_type = self.content_type().to_string();

        let Some((id, reader)) = readers.find(&target, &content_type) else {
            tracing::trace!(target_type = target.name(), %content_type, "no entity reader supports response");
            return Ok(None);
        };
        tracing::trace!(reader = %id, target_type = target.name(), %content_type, "reading entity");

        let mut body = self.into_body();
        let entity = reader.read(&target, &content_type, &mut body)?;
        downcast_entity(entity, &target, &content_type).map(Some)
    }

    fn validate_response_code(&self, codes: &[u16]) -> Result<()> {
        if self.has_valid_response_code(accepted_codes(codes)) {
            Ok(())
        } else {
            Err(RestError::InvalidStatus {
                code: self.status_code(),
                message: self.message().to_string(),
            })
        }
    }

    fn into_body(self) -> Body {
        Body {
            reader: BufReader::new(self.inner),
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status_code())
            .field("url", &self.url().as_str())
            .field("content_type", &self.content_type())
            .finish()
    }
}

/// Buffered reader over a response body.
///
/// Dropping it releases the underlying connection.
pub struct Body {
    reader: BufReader<reqwest::blocking::Response>,
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for Body {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("buffered", &self.reader.buffer().len())
            .finish()
    }
}
