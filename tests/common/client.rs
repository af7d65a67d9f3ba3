//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint. When request formats
//! change, update only this file.

use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 5;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Invokes a component with named input slots.
    pub async fn solve(&self, path: &str, inputs: Value) -> Response {
        self.client
            .post(format!("{}/solve", self.base_url))
            .json(&json!({"path": path, "inputs": inputs}))
            .send()
            .await
            .expect("solve request failed")
    }

    /// Sends a raw solve body, for malformed-request tests.
    pub async fn solve_raw(&self, body: Value) -> Response {
        self.client
            .post(format!("{}/solve", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("solve request failed")
    }

    /// Fetches the discovery manifest.
    pub async fn components(&self) -> Response {
        self.client
            .get(format!("{}/components", self.base_url))
            .send()
            .await
            .expect("components request failed")
    }

    pub async fn help(&self) -> Response {
        self.client
            .get(format!("{}/help", self.base_url))
            .send()
            .await
            .expect("help request failed")
    }

    pub async fn home(&self) -> Response {
        self.client
            .get(&self.base_url)
            .send()
            .await
            .expect("home request failed")
    }
}
