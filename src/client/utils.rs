//! Utility functions for the REST client.
//!
//! This module provides helpers for:
//! - URL validation for request targets
//! - Status code acceptance checks
//! - Content-type fallback
//! - Rejoining body text with the platform line separator

use crate::error::{RestError, Result};
use crate::protocol::{
    constants::{media_types, DEFAULT_VALID_CODES, LINE_SEPARATOR},
    split_lines,
};
use url::Url;

/// Parse a request target.
///
/// The URL must be absolute and use the `http` or `https` scheme.
///
/// # Examples
///
/// ```
/// use simple_rest_client::client::parse_url;
///
/// assert!(parse_url("http://localhost:8080/my/resource").is_ok());
/// assert!(parse_url("not_a_url").is_err());
/// ```
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|err| RestError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(RestError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// The codes to validate against: `codes`, or `200, 201, 204` when empty.
pub fn accepted_codes(codes: &[u16]) -> &[u16] {
    if codes.is_empty() {
        &DEFAULT_VALID_CODES
    } else {
        codes
    }
}

/// Check if `status` is one of `codes`.
///
/// No defaults are applied: an empty list accepts nothing.
pub fn is_valid_status(status: u16, codes: &[u16]) -> bool {
    codes.contains(&status)
}

/// Content type to negotiate with, `*/*` when the server sent none.
pub fn content_type_or_wildcard(content_type: Option<&str>) -> &str {
    content_type.unwrap_or(media_types::WILDCARD)
}

/// Split `text` into lines and join them with the platform line separator.
///
/// Line endings are normalized and a trailing line ending is dropped.
pub fn join_lines(text: &str) -> String {
    split_lines(text).join(LINE_SEPARATOR)
}
