use gloo_net::http::{Method, RequestBuilder, Response};
use serde_json::Value;

use super::{HttpClient, RequestConfig, ResponseBody, check_status, parse_json};
use crate::errors::TransportError;
use crate::options::ResponseType;

/// [`HttpClient`] backed by the browser's `fetch` through `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooClient;

impl GlooClient {
    pub fn new() -> Self {
        Self
    }

    fn request(method: Method, url: &str, config: &RequestConfig) -> RequestBuilder {
        let mut request = RequestBuilder::new(url).method(method);

        if let Some(params) = &config.params {
            request = request.query(params.iter());
        }

        request.headers(config.headers.clone().into())
    }

    async fn send(
        request: RequestBuilder,
        body: Option<&Value>,
        url: &str,
        response_type: ResponseType,
    ) -> Result<ResponseBody, TransportError> {
        let response = match body {
            Some(body) if !body.is_null() => request
                .json(body)
                .map_err(|e| TransportError::ParseError(Box::new(e)))?
                .send()
                .await,
            _ => request.send().await,
        }
        .map_err(|e| TransportError::NetworkError(Box::new(e)))?;

        check_status(response.status(), url)?;
        read_body(response, response_type).await
    }
}

async fn read_body(
    response: Response,
    response_type: ResponseType,
) -> Result<ResponseBody, TransportError> {
    let bytes = response
        .binary()
        .await
        .map_err(|e| TransportError::NetworkError(Box::new(e)))?;

    match response_type {
        ResponseType::Json => parse_json(&bytes).map(ResponseBody::Json),
        ResponseType::Text => Ok(ResponseBody::Text(
            String::from_utf8_lossy(&bytes).into_owned(),
        )),
        ResponseType::ArrayBuffer | ResponseType::Blob => Ok(ResponseBody::Bytes(bytes.into())),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for GlooClient {
    type Error = TransportError;

    async fn get(&self, url: &str, config: &RequestConfig) -> Result<ResponseBody, Self::Error> {
        Self::send(Self::request(Method::GET, url, config), None, url, config.response_type).await
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error> {
        let request = Self::request(Method::POST, url, config);
        Self::send(request, Some(body), url, config.response_type).await
    }

    async fn put(
        &self,
        url: &str,
        body: &Value,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error> {
        let request = Self::request(Method::PUT, url, config);
        Self::send(request, Some(body), url, config.response_type).await
    }

    async fn delete(
        &self,
        url: &str,
        config: &RequestConfig,
    ) -> Result<ResponseBody, Self::Error> {
        let request = Self::request(Method::DELETE, url, config);
        Self::send(request, None, url, config.response_type).await
    }
}
