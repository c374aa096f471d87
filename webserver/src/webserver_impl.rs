//! Main webserver implementation
//!
//! Wires the deal lookup into an axum router with CORS for the browser
//! client and serves it until Ctrl+C.

use std::net::SocketAddr;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use orchestrator::DealLookup;
use shared::{logging, process_info, ProcessId};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::{get_status, health_check, submit_location};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// HTTP front end over any `DealLookup`
pub struct WebServer<L> {
    state: WebServerState<L>,
    bind_address: SocketAddr,
    allowed_origin: HeaderValue,
}

impl<L> WebServer<L>
where
    L: DealLookup + 'static,
{
    pub fn new(lookup: L, bind_address: SocketAddr, allowed_origin: &str) -> WebServerResult<Self> {
        let allowed_origin = HeaderValue::from_str(allowed_origin).map_err(|_| WebServerError::InvalidOrigin {
            origin: allowed_origin.to_string(),
        })?;

        Ok(Self {
            state: WebServerState::new(lookup),
            bind_address,
            allowed_origin,
        })
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(self.allowed_origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/submit_location", post(submit_location::<L>))
            .route("/api/status", get(get_status::<L>))
            .route("/health", get(health_check))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors)
                    .into_inner(),
            )
            .with_state(self.state.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartupFailed {
                address: self.bind_address.to_string(),
                message: e.to_string(),
            })?;

        process_info!(ProcessId::current(), "🌐 Web server listening on http://{}", self.bind_address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        Err(err) => logging::log_error(ProcessId::current(), "Signal handling", &err),
    }
}
