use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};
use crate::dispatch::{dispatch, SolveRequest, WireError};
use crate::error::DispatchError;
use crate::registry::{Manifest, Registry};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub components: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: state.version.clone(),
        components: state.registry.len(),
    };
    Json(stats)
}

async fn help() -> &'static str {
    "Typed geometry components over HTTP. \
     GET /components for the manifest, POST /solve to invoke one."
}

async fn get_components(State(registry): State<SharedRegistry>) -> Json<Manifest> {
    Json(registry.manifest())
}

async fn post_solve(
    State(registry): State<SharedRegistry>,
    Json(request): Json<SolveRequest>,
) -> Response {
    match dispatch(&registry, &request) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &DispatchError) -> Response {
    let status = match err {
        DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
        DispatchError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(WireError::from(err))).into_response()
}

pub fn make_app(config: ServerConfig, registry: Arc<Registry>) -> Router {
    let state = ServerState {
        config,
        start_time: Instant::now(),
        registry,
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
    };

    Router::new()
        .route("/", get(home))
        .route("/help", get(help))
        .route("/components", get(get_components))
        .route("/solve", post(post_solve))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

pub async fn run_server(
    registry: Arc<Registry>,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
    };
    let app = make_app(config, registry);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::default_registry;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value as JsonValue};
    use tower::ServiceExt;

    fn test_app() -> Router {
        make_app(
            ServerConfig {
                requests_logging_level: RequestsLoggingLevel::None,
                ..Default::default()
            },
            Arc::new(default_registry().unwrap()),
        )
    }

    async fn body_json(response: Response) -> JsonValue {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn solve_request(body: JsonValue) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/solve")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn home_reports_component_count() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["components"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn solve_known_component() {
        let response = test_app()
            .oneshot(solve_request(json!({
                "path": "/createpoint",
                "inputs": {"X": [1.0], "Y": [2.0], "Z": [3.0]}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"outputs": {"Point": [{"x": 1.0, "y": 2.0, "z": 3.0}]}})
        );
    }

    #[tokio::test]
    async fn unknown_path_is_client_addressable() {
        let response = test_app()
            .oneshot(solve_request(json!({"path": "/doesNotExist", "inputs": {}})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "NotFoundError");
    }

    #[tokio::test]
    async fn validation_failure_is_unprocessable() {
        let response = test_app()
            .oneshot(solve_request(json!({"path": "/createpoint", "inputs": {}})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "ValidationError");
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn components_manifest_is_served() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/components")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let components = body["components"].as_array().unwrap();
        assert!(components.iter().any(|c| c["path"] == "/createpoint"));
    }
}
