//! The facade: URL resolution, param encoding and (de)serialization around an
//! injected [`HttpClient`].

use std::future::IntoFuture;

use futures::future::LocalBoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::http::{HttpClient, HttpMethod, HttpRequest, RequestConfig, ResponseBody};
use crate::log;
use crate::options::{DeserializeTo, RequestOptions};
use crate::query::QueryParams;
use crate::serializer::{JsonSerializer, Serializer};

type ApiResult<T> = Result<T, ApiError>;

static NULL_BODY: Value = Value::Null;

/// The outcome of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The serializer built a `T` from the response body.
    Typed(T),
    /// The body exactly as the HTTP client returned it. Produced whenever no
    /// serializer is configured or no deserialization target was requested.
    Raw(ResponseBody),
}

impl<T> Reply<T> {
    pub fn typed(self) -> Option<T> {
        match self {
            Reply::Typed(value) => Some(value),
            Reply::Raw(_) => None,
        }
    }

    pub fn raw(self) -> Option<ResponseBody> {
        match self {
            Reply::Typed(_) => None,
            Reply::Raw(body) => Some(body),
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Reply::Typed(_))
    }
}

/// Convenience layer over an [`HttpClient`].
///
/// Relative URLs are prefixed with the configured endpoint, params are turned
/// into query strings, and bodies go through the optional serializer on the
/// way out and back in.
///
/// # Example
/// ```
/// use simply_api::SimplyApi;
/// use simply_api::http::{HttpClient, RequestConfig, ResponseBody};
/// use simply_api::errors::TransportError;
/// use serde_json::Value;
///
/// struct Offline;
///
/// #[async_trait::async_trait(?Send)]
/// impl HttpClient for Offline {
///     type Error = TransportError;
///     async fn get(&self, url: &str, _: &RequestConfig) -> Result<ResponseBody, Self::Error> {
///         Err(TransportError::NotFound(url.to_string()))
///     }
///     async fn post(
///         &self,
///         url: &str,
///         _: &Value,
///         _: &RequestConfig,
///     ) -> Result<ResponseBody, Self::Error> {
///         Err(TransportError::NotFound(url.to_string()))
///     }
///     async fn put(
///         &self,
///         url: &str,
///         _: &Value,
///         _: &RequestConfig,
///     ) -> Result<ResponseBody, Self::Error> {
///         Err(TransportError::NotFound(url.to_string()))
///     }
///     async fn delete(&self, url: &str, _: &RequestConfig) -> Result<ResponseBody, Self::Error> {
///         Err(TransportError::NotFound(url.to_string()))
///     }
/// }
///
/// let api = SimplyApi::new(Offline).with_endpoint("https://api.example.com/");
/// assert_eq!(api.build_url("users"), "https://api.example.com/users");
/// assert_eq!(api.build_url("http://other.host/x"), "http://other.host/x");
/// ```
pub struct SimplyApi<C, S = JsonSerializer> {
    client: C,
    endpoint: Option<String>,
    serializer: Option<S>,
}

impl<C: HttpClient> SimplyApi<C> {
    /// Creates a facade with no endpoint and no serializer.
    pub fn new(client: C) -> Self {
        Self {
            client,
            endpoint: None,
            serializer: None,
        }
    }

    pub fn from_config(client: C, config: ApiConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint,
            serializer: None,
        }
    }
}

impl<C, S> SimplyApi<C, S>
where
    C: HttpClient,
    S: Serializer,
{
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_serializer<S2: Serializer>(self, serializer: S2) -> SimplyApi<C, S2> {
        SimplyApi {
            client: self.client,
            endpoint: self.endpoint,
            serializer: Some(serializer),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn serializer(&self) -> Option<&S> {
        self.serializer.as_ref()
    }

    /// Resolves `url` against the configured endpoint.
    ///
    /// URLs starting with `http` and calls without an endpoint are returned
    /// unchanged. Otherwise the endpoint and `url` are concatenated as-is, so
    /// slashes are the caller's business.
    pub fn build_url(&self, url: &str) -> String {
        match self.endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() && !url.starts_with("http") => {
                format!("{endpoint}{url}")
            }
            _ => url.to_string(),
        }
    }

    pub fn get(&self, url: &str) -> ApiResult<ApiCall<'_, C, S, Value>> {
        self.get_with(url, RequestOptions::new())
    }

    pub fn get_with<T>(
        &self,
        url: &str,
        options: RequestOptions<T>,
    ) -> ApiResult<ApiCall<'_, C, S, T>> {
        self.prepare(HttpMethod::Get, url, None, options)
    }

    pub fn post<B>(&self, url: &str, body: &B) -> ApiResult<ApiCall<'_, C, S, Value>>
    where
        B: Serialize + ?Sized,
    {
        self.post_with(url, body, RequestOptions::new())
    }

    pub fn post_with<B, T>(
        &self,
        url: &str,
        body: &B,
        options: RequestOptions<T>,
    ) -> ApiResult<ApiCall<'_, C, S, T>>
    where
        B: Serialize + ?Sized,
    {
        let body = self.serialize_body(body)?;
        self.prepare(HttpMethod::Post, url, Some(body), options)
    }

    pub fn put<B>(&self, url: &str, body: &B) -> ApiResult<ApiCall<'_, C, S, Value>>
    where
        B: Serialize + ?Sized,
    {
        self.put_with(url, body, RequestOptions::new())
    }

    pub fn put_with<B, T>(
        &self,
        url: &str,
        body: &B,
        options: RequestOptions<T>,
    ) -> ApiResult<ApiCall<'_, C, S, T>>
    where
        B: Serialize + ?Sized,
    {
        let body = self.serialize_body(body)?;
        self.prepare(HttpMethod::Put, url, Some(body), options)
    }

    pub fn delete(&self, url: &str) -> ApiResult<ApiCall<'_, C, S, Value>> {
        self.delete_with(url, RequestOptions::new())
    }

    pub fn delete_with<T>(
        &self,
        url: &str,
        options: RequestOptions<T>,
    ) -> ApiResult<ApiCall<'_, C, S, T>> {
        self.prepare(HttpMethod::Delete, url, None, options)
    }

    fn prepare<T>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
        options: RequestOptions<T>,
    ) -> ApiResult<ApiCall<'_, C, S, T>> {
        let params = self.encode_params(options.params)?;
        let request = HttpRequest {
            method,
            url: self.build_url(url),
            body,
            config: RequestConfig {
                params,
                headers: options.headers,
                response_type: options.response_type,
            },
        };

        Ok(ApiCall {
            api: self,
            request,
            target: options.deserialize_to,
        })
    }

    fn encode_params(&self, params: Option<Map<String, Value>>) -> ApiResult<Option<QueryParams>> {
        let Some(params) = params else {
            return Ok(None);
        };
        let params = self.try_serialize(Value::Object(params))?;
        QueryParams::from_value(params).map(Some)
    }

    fn serialize_body<B>(&self, body: &B) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.try_serialize(serde_json::to_value(body)?)
    }

    fn try_serialize(&self, data: Value) -> ApiResult<Value> {
        match &self.serializer {
            Some(serializer) => serializer
                .serialize(data)
                .map_err(|e| ApiError::Serialize(Box::new(e))),
            None => Ok(data),
        }
    }

    fn try_deserialize<T>(
        &self,
        body: ResponseBody,
        target: Option<DeserializeTo<T>>,
    ) -> ApiResult<Reply<T>>
    where
        T: DeserializeOwned,
    {
        match (&self.serializer, target) {
            (Some(serializer), Some(target)) => {
                log::trace!(type_name = target.type_name(), "deserializing response");
                serializer
                    .deserialize(body, target)
                    .map(Reply::Typed)
                    .map_err(|e| ApiError::Deserialize(Box::new(e)))
            }
            _ => Ok(Reply::Raw(body)),
        }
    }
}

/// A prepared call that has not touched the network yet.
///
/// Nothing is sent until [`send`](ApiCall::send) is called or the call is
/// awaited. Every `send` issues a fresh request.
pub struct ApiCall<'a, C, S, T> {
    api: &'a SimplyApi<C, S>,
    request: HttpRequest,
    target: Option<DeserializeTo<T>>,
}

impl<'a, C, S, T> ApiCall<'a, C, S, T>
where
    C: HttpClient,
    S: Serializer,
    T: DeserializeOwned,
{
    /// The request that each `send` hands to the HTTP client.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub async fn send(&self) -> ApiResult<Reply<T>> {
        let request = &self.request;
        let client = &self.api.client;
        let config = &request.config;
        let body = request.body.as_ref().unwrap_or(&NULL_BODY);
        let query = config
            .params
            .as_ref()
            .map(QueryParams::to_query_string)
            .unwrap_or_default();

        log::debug!(
            method = %request.method,
            url = %request.url,
            query = %query,
            response_type = %config.response_type,
            "sending request"
        );

        let result = match request.method {
            HttpMethod::Get => client.get(&request.url, config).await,
            HttpMethod::Post => client.post(&request.url, body, config).await,
            HttpMethod::Put => client.put(&request.url, body, config).await,
            HttpMethod::Delete => client.delete(&request.url, config).await,
        }
        .map_err(|e| ApiError::Http(Box::new(e)))?;

        self.api.try_deserialize(result, self.target)
    }
}

impl<'a, C, S, T> IntoFuture for ApiCall<'a, C, S, T>
where
    C: HttpClient + 'a,
    S: Serializer + 'a,
    T: DeserializeOwned + 'a,
{
    type Output = ApiResult<Reply<T>>;
    type IntoFuture = LocalBoxFuture<'a, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.send().await })
    }
}
