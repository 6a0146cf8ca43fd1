//! Header value formatting and body text helpers.
//!
//! # Examples
//!
//! ```
//! use simple_rest_client::protocol::{format_basic_auth, media_type_essence, split_lines};
//!
//! // Authorization header values
//! assert_eq!(format_basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
//!
//! // Media types without parameters
//! assert_eq!(media_type_essence("Application/JSON; charset=utf-8"), "application/json");
//!
//! // Line splitting
//! assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Format a `Basic` authorization value.
///
/// The credentials are joined as `user:pass` and encoded with the standard,
/// padded base64 alphabet.
///
/// # Examples
///
/// ```
/// use simple_rest_client::protocol::format_basic_auth;
///
/// assert_eq!(format_basic_auth("Aladdin", "open sesame"), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
/// ```
pub fn format_basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

/// Strip parameters from a media type and lowercase it.
///
/// `"text/html; charset=UTF-8"` becomes `"text/html"`.
pub fn media_type_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Split text into lines.
///
/// A line ends at `\n`, `\r` or `\r\n`. The terminators are not part of the
/// returned lines, and a terminator at the very end does not produce an empty
/// trailing line.
///
/// # Examples
///
/// ```
/// use simple_rest_client::protocol::split_lines;
///
/// assert_eq!(split_lines("one\rtwo\r\n"), vec!["one", "two"]);
/// assert_eq!(split_lines("one\n\nthree"), vec!["one", "", "three"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => {
                lines.push(&text[start..pos]);
                pos += 1;
                start = pos;
            }
            b'\r' => {
                lines.push(&text[start..pos]);
                pos += 1;
                if bytes.get(pos) == Some(&b'\n') {
                    pos += 1;
                }
                start = pos;
            }
            _ => pos += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_basic_auth() {
        assert_eq!(format_basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_format_basic_auth_empty_password() {
        assert_eq!(format_basic_auth("user", ""), "Basic dXNlcjo=");
    }

    #[test]
    fn test_format_basic_auth_colon_in_password() {
        // only the first colon separates user from password on the server side
        assert_eq!(format_basic_auth("a", "b:c"), "Basic YTpiOmM=");
    }

    #[test]
    fn test_media_type_essence() {
        assert_eq!(media_type_essence("text/xml"), "text/xml");
        assert_eq!(media_type_essence(" Text/XML ;charset=utf-8"), "text/xml");
        assert_eq!(media_type_essence(""), "");
    }

    #[test]
    fn test_split_lines_mixed_terminators() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_lines_trailing_terminator() {
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_split_lines_no_terminator() {
        assert_eq!(split_lines("<response>Some content</response>"), vec!["<response>Some content</response>"]);
    }

    #[test]
    fn test_split_lines_multibyte() {
        assert_eq!(split_lines("grüße\nwelt"), vec!["grüße", "welt"]);
    }
}
