use axum::extract::FromRef;

use crate::registry::Registry;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type SharedRegistry = Arc<Registry>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub registry: SharedRegistry,
    pub version: String,
}

impl FromRef<ServerState> for SharedRegistry {
    fn from_ref(input: &ServerState) -> Self {
        input.registry.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
