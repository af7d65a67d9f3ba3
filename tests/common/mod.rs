//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer};
//! use reqwest::StatusCode;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_solve() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.solve("/createpoint", json!({"X": [1.0]})).await;
//!     assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
//! }
//! ```

mod client;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use server::TestServer;
