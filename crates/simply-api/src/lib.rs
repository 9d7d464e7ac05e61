//! A thin convenience layer over an HTTP client.
//!
//! [`SimplyApi`] resolves relative URLs against a base endpoint, encodes query
//! params, and runs bodies through an optional [`Serializer`](serializer::Serializer)
//! before delegating GET/POST/PUT/DELETE calls to an injected [`HttpClient`](http::HttpClient).

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod log;
pub mod options;
pub mod query;
pub mod serializer;

pub use api::{ApiCall, Reply, SimplyApi};
pub use config::ApiConfig;
pub use errors::ApiError;
pub use options::{RequestOptions, ResponseType};

pub use serde;
pub use serde_json;
pub use tracing;
