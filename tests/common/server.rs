//! Test server lifecycle management
//!
//! Spawns an isolated server with the built-in component registry on a
//! random port. When dropped, the server gracefully shuts down.

use std::sync::Arc;
use std::time::Duration;

use hops_server::components::default_registry;
use hops_server::server::server::make_app;
use hops_server::server::{RequestsLoggingLevel, ServerConfig};
use tokio::net::TcpListener;

const SERVER_READY_TIMEOUT_MS: u64 = 2000;

/// Test server instance with its own registry
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if registration fails, the port cannot be bound, or the server
    /// does not become ready within the timeout.
    pub async fn spawn() -> Self {
        let registry = Arc::new(default_registry().expect("Failed to build component registry"));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
        };

        let app = make_app(config, registry);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home route
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        while start.elapsed() < timeout {
            if let Ok(response) = client.get(&self.base_url).send().await {
                if response.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        panic!("Server did not become ready within {:?}", timeout);
    }
}
