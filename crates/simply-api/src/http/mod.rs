//! The HTTP client capability the facade delegates to.
//!
//! [`HttpClient`] is the only seam between the facade and the network. The
//! crate ships a `reqwest` implementation for native targets and a `gloo-net`
//! one for the browser, but any type implementing the trait can be injected.

#[cfg(target_arch = "wasm32")]
mod gloo;
#[cfg(all(not(target_arch = "wasm32"), feature = "reqwest-client"))]
mod reqwest_client;

use std::fmt;

use bytes::Bytes;
use serde_json::Value;

use crate::errors::TransportError;
use crate::options::{ApiHeaders, ResponseType};
use crate::query::QueryParams;

#[cfg(target_arch = "wasm32")]
pub use gloo::GlooClient;
#[cfg(all(not(target_arch = "wasm32"), feature = "reqwest-client"))]
pub use reqwest_client::ReqwestClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything besides the URL and body that the client needs for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub params: Option<QueryParams>,
    pub headers: ApiHeaders,
    pub response_type: ResponseType,
}

/// A fully prepared request: final URL, serialized body and config.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub config: RequestConfig,
}

/// A response body, shaped by the requested [`ResponseType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Bytes(Bytes),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Issues HTTP requests on behalf of the facade.
///
/// Implementations own everything about the transport: connections, status
/// handling, retries, timeouts and cancellation. Futures are not required to
/// be `Send` so browser clients can implement the trait.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    /// The error type returned for a failed request.
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get(&self, url: &str, config: &RequestConfig) -> Result<ResponseBody, Self::Error>;

    async fn post(
        &self,
        url: &str,
        body: &Value,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error>;

    async fn put(
        &self,
        url: &str,
        body: &Value,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error>;

    async fn delete(&self, url: &str, config: &RequestConfig)
    -> Result<ResponseBody, Self::Error>;
}

/// Maps a response status to a [`TransportError`] for the bundled clients.
pub(crate) fn check_status(status: u16, url: &str) -> Result<(), TransportError> {
    match status {
        200..=299 => Ok(()),
        400 => Err(TransportError::BadRequest(format!("Bad request to {}", url))),
        401 => Err(TransportError::UnauthorizedAccess),
        403 => Err(TransportError::ForbiddenAccess),
        404 => Err(TransportError::NotFound(format!("{} not found", url))),
        500..=599 => Err(TransportError::InternalServerError(status)),
        status => Err(TransportError::UnexpectedStatusCode(status)),
    }
}

/// Decodes a JSON body the way browsers do: an empty body reads as `null`.
pub(crate) fn parse_json(bytes: &[u8]) -> Result<Value, TransportError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| TransportError::ParseError(Box::new(e)))
}
