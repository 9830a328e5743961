//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all resolution handler
//! - Wire up middleware (tracing, request timeout)
//! - Serve until the listener closes or shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::error::EngineError;
use crate::routing::{ResolutionOutcome, RouteDispatcher};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RouteDispatcher>,
}

/// Body answered for every resolution request.
#[derive(Debug, Serialize)]
struct ResolutionResponse<'a> {
    /// The original request path, unaltered by resolution.
    path: &'a str,
    #[serde(flatten)]
    outcome: ResolutionOutcome,
}

/// HTTP server for the permalink gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig) -> Self {
        let dispatcher = Arc::new(RouteDispatcher::from_config(config));
        Self::with_dispatcher(config, dispatcher)
    }

    /// Create a server around an existing dispatcher.
    pub fn with_dispatcher(config: &GatewayConfig, dispatcher: Arc<RouteDispatcher>) -> Self {
        let state = AppState { dispatcher };
        let router = Router::new()
            .route("/{*path}", get(resolve_handler))
            .route("/", get(resolve_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");
        axum::serve(listener, self.router).await
    }
}

/// Resolve the request path and answer with the outcome.
async fn resolve_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    match state.dispatcher.dispatch(path).await {
        Ok(outcome) => {
            let status = match outcome {
                ResolutionOutcome::NoMatch => StatusCode::NOT_FOUND,
                _ => StatusCode::OK,
            };
            tracing::info!(path = %path, outcome = ?outcome, "Path resolved");
            (status, Json(ResolutionResponse { path, outcome })).into_response()
        }
        Err(EngineError::StructureUnavailable(reason)) => {
            tracing::error!(path = %path, reason = %reason, "Resolution unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "path": path,
                    "error": "permalink structure unavailable",
                })),
            )
                .into_response()
        }
    }
}
