#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Simple REST Client
//!
//! A small, blocking, fluent HTTP client for talking to REST APIs, with content-type
//! based deserialization through pluggable entity readers.
//!
//! ## Overview
//!
//! A request goes through four steps:
//!
//! 1. **Target** - `request_to(url)` binds a builder to an absolute `http`/`https` URL
//! 2. **Headers** - fluent calls add auth, `Accept`, `Content-Type` and custom headers
//! 3. **Send** - `get`, `head`, `delete`, `post` or `put` performs the exchange
//! 4. **Read** - the response body is read once, as a stream, text, bytes or a typed entity
//!
//! ## Key Features
//!
//! - **Fluent builder**: Basic auth, bearer tokens, content negotiation
//! - **Status validation**: Body accessors accept `200`, `201`, `204` unless told otherwise
//! - **Single-use bodies**: Accessors consume the response, a second read does not compile
//! - **Entity readers**: First-match dispatch on target type and content type
//! - **XML out of the box**: Any `serde::Deserialize` type can be read from `*/xml` bodies
//! - **Scoped TLS override**: Certificate checks can be disabled per client, never globally
//!
//! ## Client Usage
//!
//! ```no_run
//! use serde::Deserialize;
//! use simple_rest_client::request_to;
//!
//! #[derive(Deserialize)]
//! struct CustomEntity {
//!     body: String,
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let entity: Option<CustomEntity> = request_to("http://localhost:8080/my/resource")?
//!         .accept("text/xml")
//!         .get()?
//!         .as_entity(&[])?;
//!
//!     match entity {
//!         Some(entity) => println!("Body: {}", entity.body),
//!         None => println!("No reader for this content type"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Entity Readers
//!
//! ```
//! use simple_rest_client::{JsonEntityReader, ReaderRegistry, RestClient};
//! use std::sync::Arc;
//!
//! let readers = Arc::new(ReaderRegistry::with_defaults());
//! readers.register("json", JsonEntityReader::new());
//!
//! let client = RestClient::new().unwrap().with_readers(readers);
//! assert_eq!(client.readers().ids(), vec!["xml", "json"]);
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - Request builder, response, client configuration
//! - **[entity]** - Entity reader trait, registry, XML and JSON readers
//! - **[error]** - Error types and result handling
//! - **[protocol]** - Header names, media types and header value helpers
//! - **[ports]** - Free TCP port search for tests

pub mod client;
pub mod entity;
pub mod error;
pub mod ports;
pub mod protocol;

pub use client::{request_to, request_to_url, Body, ClientConfig, RequestBuilder, Response, RestClient};
pub use entity::{EntityReader, JsonEntityReader, ReaderRegistry, TargetType, XmlEntityReader};
pub use error::{RestError, Result};
