//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit)
//! - Build the upstream client from configuration
//! - Bind server to listener and shut down gracefully

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::relay::{upload_report, UpstreamClient};

/// Path the browser posts uploads to.
pub const UPLOAD_ROUTE: &str = "/api/reports/upload";

/// Liveness endpoint.
pub const HEALTH_ROUTE: &str = "/health";

/// Application state injected into handlers.
///
/// Built once from the configuration and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    pub use_mocks: bool,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Result<Self, ServerError> {
        Ok(Self {
            use_mocks: config.use_mocks,
            upstream: UpstreamClient::new(config)?,
        })
    }
}

/// Error type for server startup and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("server IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the upload relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(&config)?;
        let router = build_router(&config, state);
        Ok(Self { router, config })
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            use_mocks = self.config.use_mocks,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &RelayConfig, state: AppState) -> Router {
    Router::new()
        .route(UPLOAD_ROUTE, post(upload_report))
        .route(HEALTH_ROUTE, get(health))
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &axum::http::Request<axum::body::Body>| {
                        let request_id = crate::http::request::request_id(request.headers());
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id,
                        )
                    },
                ))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
        )
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub mocks: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mocks: state.use_mocks,
    })
}
