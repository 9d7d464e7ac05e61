//! Shared error types for the simply-api crates.
#[cfg(not(target_arch = "wasm32"))]
pub use color_eyre::Report;

/// A type-erased error that keeps the original value reachable through downcasting.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced by [`SimplyApi`](crate::api::SimplyApi) calls.
///
/// Failures coming from the injected HTTP client or serializer are boxed but
/// otherwise untouched, so callers can downcast to the collaborator's own type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP client error: {0}")]
    Http(#[source] BoxError),
    #[error("Serialize error: {0}")]
    Serialize(#[source] BoxError),
    #[error("Deserialize error: {0}")]
    Deserialize(#[source] BoxError),
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Query params must serialize to an object, got {0}")]
    Params(&'static str),
}

impl ApiError {
    /// Returns the HTTP client's error if it is of type `E`.
    pub fn http_source<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            ApiError::Http(source) => source.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Returns the serializer's error if it is of type `E`.
    pub fn serializer_source<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            ApiError::Serialize(source) | ApiError::Deserialize(source) => {
                source.downcast_ref::<E>()
            }
            _ => None,
        }
    }
}

/// Errors produced by the bundled HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error ({0})")]
    InternalServerError(u16),
    #[error("Unauthorized Access")]
    UnauthorizedAccess,
    #[error("Forbidden Access")]
    ForbiddenAccess,
    #[error("Network error: {0}")]
    NetworkError(#[source] BoxError),
    #[error("Parse error: {0}")]
    ParseError(#[source] BoxError),
    #[error("Unexpected response status code: {0}")]
    UnexpectedStatusCode(u16),
}

/// Errors produced by the bundled serializers.
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Two keys rename to `{0}`")]
    KeyCollision(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_downcasts_original_error() {
        let err = ApiError::Http(Box::new(TransportError::NotFound("users".to_string())));

        let source = err.http_source::<TransportError>();
        assert!(matches!(source, Some(TransportError::NotFound(url)) if url == "users"));
        assert!(err.serializer_source::<TransportError>().is_none());
    }

    #[test]
    fn test_serializer_source_covers_both_directions() {
        let bad = serde_json::from_str::<u8>("nope").unwrap_err();
        let err = ApiError::Deserialize(Box::new(SerializerError::Json(bad)));

        assert!(err.serializer_source::<SerializerError>().is_some());
        assert!(err.http_source::<SerializerError>().is_none());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TransportError::UnexpectedStatusCode(418).to_string(),
            "Unexpected response status code: 418"
        );
        assert_eq!(
            ApiError::Params("array").to_string(),
            "Query params must serialize to an object, got array"
        );
    }
}
