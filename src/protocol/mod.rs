//! Protocol constants and header value helpers.
//!
//! Header names are kept as plain strings in their canonical casing because
//! request headers are stored case-sensitively (see [`RequestBuilder`]).
//!
//! [`RequestBuilder`]: crate::RequestBuilder

pub mod constants;
mod headers;

pub use headers::{format_basic_auth, media_type_essence, split_lines};
