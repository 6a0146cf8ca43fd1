//! Literal header names, media types and status defaults.

/// Header names set by the request builder.
pub mod headers {
    /// `Authorization`
    pub const AUTHORIZATION: &str = "Authorization";
    /// `Accept`
    pub const ACCEPT: &str = "Accept";
    /// `Content-Type`
    pub const CONTENT_TYPE: &str = "Content-Type";
}

/// Media types with special meaning to the client.
pub mod media_types {
    /// `application/json`
    pub const APPLICATION_JSON: &str = "application/json";
    /// Reported as the content type when the server sends none.
    pub const WILDCARD: &str = "*/*";
}

/// Status codes accepted by body accessors when the caller passes none.
pub const DEFAULT_VALID_CODES: [u16; 3] = [200, 201, 204];

/// Buffer size of the chunked copy used by `Response::as_bytes`.
pub const COPY_BUFFER_SIZE: usize = 8192;

/// Separator used to rejoin lines in `Response::as_string`.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Separator used to rejoin lines in `Response::as_string`.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";
