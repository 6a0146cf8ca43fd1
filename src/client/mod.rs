//! Blocking REST client.
//!
//! This module provides the fluent request API:
//!
//! - **Entry points** that bind a builder to a target URL
//! - **Request building** with auth, content negotiation and custom headers
//! - **Response handling** with status validation and body materialization
//! - **Typed entities** resolved through the [entity readers](crate::entity)
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch    - RestClient, request_to, request execution
//! ├── request  - RequestBuilder
//! ├── response - Response and Body
//! ├── config   - Client configuration
//! └── utils    - Utility functions
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RestClient`] | Configured blocking client |
//! | [`RequestBuilder`] | Fluent request definition, consumed when sent |
//! | [`Response`] | Status, headers and single-use body accessors |
//! | [`Body`] | Buffered body stream |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use simple_rest_client::client::{ClientConfig, RestClient};
//!
//! // Default configuration
//! let client = RestClient::new().unwrap();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     connect_timeout_ms: Some(500),
//!     ..Default::default()
//! };
//! let client = RestClient::with_config(config).unwrap();
//! ```
//!
//! ## Building Requests
//!
//! ```
//! use simple_rest_client::request_to;
//!
//! let request = request_to("http://localhost/resource")
//!     .unwrap()
//!     .basic_auth("user", "pass")
//!     .accept_json();
//! assert_eq!(request.header("Authorization"), Some("Basic dXNlcjpwYXNz"));
//! ```
//!
//! ## Utility Functions
//!
//! ```
//! use simple_rest_client::client::{accepted_codes, is_valid_status};
//!
//! assert!(is_valid_status(201, accepted_codes(&[])));
//! assert!(!is_valid_status(404, accepted_codes(&[])));
//! ```

mod config;
mod fetch;
mod request;
mod response;
mod utils;

pub use config::ClientConfig;
pub use fetch::{request_to, request_to_url, RestClient};
pub use request::RequestBuilder;
pub use response::{Body, Response};
pub use utils::*;
