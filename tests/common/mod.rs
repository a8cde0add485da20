//! Shared helpers for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use http::HeaderMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use vpos::{Environment, Payload, PostResponse, Result, Transport, VposConfig, VposError};

pub const POS_ID: i64 = 100;
pub const TOKEN: &str = "test-token";
pub const PAYMENT_CALLBACK: &str = "https://merchant.example/payments";
pub const REFUND_CALLBACK: &str = "https://merchant.example/refunds";

/// Install a test-friendly tracing subscriber once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn test_config(base_url: impl Into<String>) -> VposConfig {
    VposConfig::new(
        POS_ID,
        TOKEN,
        PAYMENT_CALLBACK,
        REFUND_CALLBACK,
        "supervisor-card",
        Environment::Sandbox,
    )
    .with_base_url(base_url)
}

/// A request seen by [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

/// In-memory transport that records requests and replays canned responses
#[derive(Default)]
pub struct RecordingTransport {
    pub calls: Mutex<Vec<Recorded>>,
    gets: Mutex<VecDeque<Result<Vec<u8>>>>,
    posts: Mutex<VecDeque<Result<PostResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_get(&self, response: Result<Vec<u8>>) {
        self.gets.lock().unwrap().push_back(response);
    }

    pub fn push_post(&self, response: Result<PostResponse>) {
        self.posts.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(Recorded {
            method: "GET",
            url: url.to_string(),
            headers,
            body: None,
        });
        self.gets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(VposError::invalid_response("no canned GET response")))
    }

    async fn post(&self, url: &str, headers: HeaderMap, payload: Payload) -> Result<PostResponse> {
        let body = match payload {
            Payload::Json(value) => Some(value),
            _ => None,
        };
        self.calls.lock().unwrap().push(Recorded {
            method: "POST",
            url: url.to_string(),
            headers,
            body,
        });
        self.posts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(VposError::invalid_response("no canned POST response")))
    }
}
