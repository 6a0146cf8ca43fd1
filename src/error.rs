//! Error types for the REST client.
//!
//! Every fallible operation in this crate returns [`Result`], an alias over
//! [`RestError`]. Failures are surfaced to the caller immediately: there is no retry
//! and no logging-and-continue. The one soft miss is
//! [`Response::as_entity`](crate::Response::as_entity), which yields `None` when no
//! registered reader supports the response.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`RestError::InvalidUrl`] | `request_to` with a malformed or non-HTTP URL |
//! | [`RestError::RequestFailed`] | connect, header, body write, head or body read failures |
//! | [`RestError::InvalidStatus`] | body accessors when the status is not accepted |
//! | [`RestError::ParseFailed`] | an entity reader that could not deserialize the body |
//! | [`RestError::NoAvailablePort`] | the free port search ran out of retries |

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed underlying cause carried by wrapping variants.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, RestError>;

/// Errors raised by the REST client.
#[derive(Error, Debug)]
pub enum RestError {
    /// The target URL is not a valid absolute `http`/`https` URL.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The exchange failed in the transport or while moving bytes.
    #[error("request failed: {source}")]
    RequestFailed {
        /// Underlying transport or I/O error.
        #[source]
        source: BoxError,
    },

    /// The server answered with a status code outside the accepted set.
    #[error("server returned {code} {message}")]
    InvalidStatus {
        /// Actual status code.
        code: u16,
        /// Reason phrase for the status.
        message: String,
    },

    /// A matching entity reader failed to deserialize the body.
    #[error("failed to read {target} from '{content_type}': {source}")]
    ParseFailed {
        /// Name of the requested target type.
        target: &'static str,
        /// Content type of the body.
        content_type: String,
        /// Error reported by the binding engine.
        #[source]
        source: BoxError,
    },

    /// No free port range was found within the retry limit.
    #[error("unable to find an available port range within retry limit {retries}")]
    NoAvailablePort {
        /// The retry limit that was exhausted.
        retries: usize,
    },

    /// Probing for a free port failed with an unexpected I/O error.
    #[error("unable to find available port: {source}")]
    PortSearch {
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },
}

impl RestError {
    /// Wrap any transport level error as [`RestError::RequestFailed`].
    pub fn request_failed<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        RestError::RequestFailed {
            source: source.into(),
        }
    }

    /// Build a [`RestError::ParseFailed`] for the given target and content type.
    pub fn parse_failed<E>(target: &'static str, content_type: &str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        RestError::ParseFailed {
            target,
            content_type: content_type.to_string(),
            source: source.into(),
        }
    }

    /// True if this error reports an unaccepted response status.
    pub fn is_invalid_status(&self) -> bool {
        matches!(self, RestError::InvalidStatus { .. })
    }

    /// Status code carried by [`RestError::InvalidStatus`], if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::InvalidStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        RestError::request_failed(err)
    }
}

impl From<std::io::Error> for RestError {
    fn from(err: std::io::Error) -> Self {
        RestError::request_failed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_display() {
        let err = RestError::InvalidStatus {
            code: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "server returned 404 Not Found");
        assert!(err.is_invalid_status());
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_io_error_maps_to_request_failed() {
        let err: RestError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, RestError::RequestFailed { .. }));
        assert_eq!(err.status_code(), None);
        assert!(StdError::source(&err).is_some());
    }
}
