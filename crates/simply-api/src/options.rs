//! Per-call request options.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How the HTTP client should read the response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    #[default]
    Json,
    Text,
    ArrayBuffer,
    Blob,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Json => "json",
            ResponseType::Text => "text",
            ResponseType::ArrayBuffer => "arraybuffer",
            ResponseType::Blob => "blob",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiHeaders(HashMap<String, String>);

impl ApiHeaders {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    pub fn delete(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApiHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ApiHeaders> for gloo_net::http::Headers {
    fn from(val: ApiHeaders) -> Self {
        let headers = gloo_net::http::Headers::new();
        for (key, value) in val.0 {
            headers.set(&key, &value);
        }
        headers
    }
}

/// Names the type a response body should be deserialized into.
///
/// Carries no data; its presence on [`RequestOptions`] is what asks the
/// configured serializer to produce a `T`.
pub struct DeserializeTo<T>(PhantomData<fn() -> T>);

impl<T> DeserializeTo<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T> Default for DeserializeTo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DeserializeTo<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DeserializeTo<T> {}

impl<T> fmt::Debug for DeserializeTo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeserializeTo({})", self.type_name())
    }
}

/// Options accepted by every facade call.
///
/// `RequestOptions::new()` is the default: JSON response, no headers, no
/// query params and no deserialization target.
///
/// # Example
/// ```
/// use simply_api::options::{RequestOptions, ResponseType};
///
/// let options = RequestOptions::new()
///     .with_header("accept-language", "en")
///     .with_param("page", 2)
///     .deserialize_to::<Vec<String>>();
///
/// assert_eq!(options.response_type, ResponseType::Json);
/// assert!(options.deserialize_to.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RequestOptions<T = Value> {
    pub headers: ApiHeaders,
    pub params: Option<Map<String, Value>>,
    pub response_type: ResponseType,
    pub deserialize_to: Option<DeserializeTo<T>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Default for RequestOptions<T> {
    fn default() -> Self {
        Self {
            headers: ApiHeaders::new(),
            params: None,
            response_type: ResponseType::Json,
            deserialize_to: None,
        }
    }
}

impl<T> RequestOptions<T> {
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: ApiHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single query parameter, creating the params map if needed.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Requests deserialization of the response into `U`.
    pub fn deserialize_to<U>(self) -> RequestOptions<U> {
        RequestOptions {
            headers: self.headers,
            params: self.params,
            response_type: self.response_type,
            deserialize_to: Some(DeserializeTo::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = RequestOptions::new();
        assert_eq!(options.response_type, ResponseType::Json);
        assert!(options.headers.is_empty());
        assert!(options.params.is_none());
        assert!(options.deserialize_to.is_none());
    }

    #[test]
    fn test_with_param_builds_map() {
        let options = RequestOptions::new().with_param("a", 1).with_param("b", "x");
        let params = options.params.unwrap();
        assert_eq!(params.get("a"), Some(&json!(1)));
        assert_eq!(params.get("b"), Some(&json!("x")));
    }

    #[test]
    fn test_deserialize_to_keeps_other_fields() {
        let options = RequestOptions::new()
            .with_header("x-id", "7")
            .with_response_type(ResponseType::Text)
            .deserialize_to::<u32>();

        assert_eq!(options.headers.get("x-id"), Some("7"));
        assert_eq!(options.response_type, ResponseType::Text);
        assert_eq!(options.deserialize_to.unwrap().type_name(), "u32");
    }

    #[test]
    fn test_response_type_serde() {
        let serialized = serde_json::to_string(&ResponseType::ArrayBuffer).unwrap();
        assert_eq!(serialized, "\"arraybuffer\"");

        let deserialized: ResponseType = serde_json::from_str("\"blob\"").unwrap();
        assert_eq!(deserialized, ResponseType::Blob);
    }

    #[test]
    fn test_headers_from_iter() {
        let headers: ApiHeaders = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("b"), Some("2"));
    }
}
