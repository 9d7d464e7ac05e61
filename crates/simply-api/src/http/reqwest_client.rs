use serde_json::Value;

use super::{HttpClient, RequestConfig, ResponseBody, check_status, parse_json};
use crate::errors::TransportError;
use crate::options::ResponseType;

/// [`HttpClient`] backed by `reqwest`, for native targets.
///
/// Non-2xx responses are turned into [`TransportError`]s; connection pooling,
/// TLS and timeouts are whatever the wrapped `reqwest::Client` is configured with.
///
/// # Example
/// ```no_run
/// use simply_api::SimplyApi;
/// use simply_api::http::ReqwestClient;
///
/// let api = SimplyApi::new(ReqwestClient::new()).with_endpoint("https://api.example.com/");
/// assert_eq!(api.build_url("users"), "https://api.example.com/users");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new client with reqwest's default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        config: &RequestConfig,
    ) -> reqwest::RequestBuilder {
        let mut request = self.client.request(method, url);

        if let Some(params) = &config.params {
            request = request.query(params.as_pairs());
        }
        for (key, value) in config.headers.iter() {
            request = request.header(key, value);
        }

        request
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
        response_type: ResponseType,
    ) -> Result<ResponseBody, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::NetworkError(Box::new(e)))?;

        check_status(response.status().as_u16(), url)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::NetworkError(Box::new(e)))?;

        match response_type {
            ResponseType::Json => parse_json(&bytes).map(ResponseBody::Json),
            ResponseType::Text => Ok(ResponseBody::Text(
                String::from_utf8_lossy(&bytes).into_owned(),
            )),
            ResponseType::ArrayBuffer | ResponseType::Blob => Ok(ResponseBody::Bytes(bytes)),
        }
    }

    fn with_body(request: reqwest::RequestBuilder, body: &Value) -> reqwest::RequestBuilder {
        if body.is_null() {
            request
        } else {
            request.json(body)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestClient {
    type Error = TransportError;

    async fn get(&self, url: &str, config: &RequestConfig) -> Result<ResponseBody, Self::Error> {
        let request = self.request(reqwest::Method::GET, url, config);
        self.send(request, url, config.response_type).await
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error> {
        let request = Self::with_body(self.request(reqwest::Method::POST, url, config), body);
        self.send(request, url, config.response_type).await
    }

    async fn put(
        &self,
        url: &str,
        body: &Value,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error> {
        let request = Self::with_body(self.request(reqwest::Method::PUT, url, config), body);
        self.send(request, url, config.response_type).await
    }

    async fn delete(
        &self,
        url: &str,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error> {
        let request = self.request(reqwest::Method::DELETE, url, config);
        self.send(request, url, config.response_type).await
    }
}
