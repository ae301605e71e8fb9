use std::sync::Arc;

use partlens_core::session::SessionStore;
use partlens_gateway::ModelGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Model gateway, or `None` when the provider is not configured.
    /// Handlers map the `None` case to a 503.
    pub gateway: Option<Arc<dyn ModelGateway>>,
    /// In-memory chat session store.
    pub sessions: Arc<SessionStore>,
}
