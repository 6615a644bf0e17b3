//! Route table and server loop.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    AppState, complete_set, finish_session, health, progress_summary, start_session,
};

/// Builds the full router. CORS is wide open, matching the service this
/// fronts: browser clients on arbitrary origins.
pub fn create_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/start", post(start_session))
        .route("/{id}/complete-set", post(complete_set))
        .route("/{id}/finish", post(finish_session));

    let api = Router::new()
        .route("/health", get(health))
        .route("/progress/summary", get(progress_summary))
        .nest("/workout/session", session_routes);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Binds and serves until the process exits.
pub async fn serve(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let router = create_router(state);

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
