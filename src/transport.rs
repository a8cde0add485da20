//! HTTP transport used by the gateway client

use crate::{Result, VposError};
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Request body accepted by [`Transport::post`]
#[derive(Debug, Clone)]
pub enum Payload {
    /// Serialized to JSON before sending
    Json(serde_json::Value),
    /// Sent verbatim
    Bytes(Vec<u8>),
    /// Sent verbatim
    Text(String),
    /// Empty body
    Empty,
}

impl Payload {
    /// Build a JSON payload from any serializable value
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Json(value) => Ok(serde_json::to_vec(&value)?),
            Self::Bytes(bytes) => Ok(bytes),
            Self::Text(text) => Ok(text.into_bytes()),
            Self::Empty => Ok(Vec::new()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Self::Text(text) => text.clone(),
            Self::Empty => String::new(),
        }
    }
}

/// Successful POST outcome
#[derive(Debug, Clone)]
pub struct PostResponse {
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

/// Minimal HTTP surface the gateway client needs
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET; only a `200 OK` response is a success
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Vec<u8>>;

    /// Issue a JSON POST; any 2xx response is a success
    async fn post(&self, url: &str, headers: HeaderMap, payload: Payload) -> Result<PostResponse>;
}

/// [`Transport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given connect and total timeouts
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| VposError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| VposError::transport("GET", url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| VposError::transport("GET", url, e))?;

        if status != reqwest::StatusCode::OK {
            return Err(VposError::UnexpectedStatus {
                method: "GET",
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
                params: None,
            });
        }

        Ok(body.to_vec())
    }

    async fn post(&self, url: &str, headers: HeaderMap, payload: Payload) -> Result<PostResponse> {
        let params = payload.describe();

        let mut request_headers = HeaderMap::new();
        request_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        request_headers.extend(headers);

        let response = self
            .client
            .post(url)
            .headers(request_headers)
            .body(payload.into_bytes()?)
            .send()
            .await
            .map_err(|e| VposError::transport("POST", url, e))?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| VposError::transport("POST", url, e))?;

        if !status.is_success() {
            return Err(VposError::UnexpectedStatus {
                method: "POST",
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
                params: Some(params),
            });
        }

        Ok(PostResponse {
            body: body.to_vec(),
            headers: response_headers,
        })
    }
}
