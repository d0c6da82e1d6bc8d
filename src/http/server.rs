//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the transfer and health handlers
//! - Wire up middleware (timeout, body limit, request id, tracing)
//! - Serve on a bound listener until the shutdown signal fires

use axum::{
    middleware::map_response,
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::health::health_handler;
use crate::http::response::structure_timeout;
use crate::http::transfer::transfer_handler;
use crate::transfer::TransferService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TransferService>,
}

impl AppState {
    pub fn new(service: TransferService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// HTTP server for the transfer service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request deadline sits on each route so a transfer that runs out
    /// of time still answers with a `{success, error, code}` body.
    #[allow(deprecated)]
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let request_secs = config.timeouts.request_secs;
        let deadline = Duration::from_secs(request_secs);

        Router::new()
            .route(
                "/transfer",
                post(transfer_handler)
                    .layer(TimeoutLayer::new(deadline))
                    .layer(map_response(move |response: Response| async move {
                        structure_timeout(response, request_secs)
                    })),
            )
            .route("/health", get(health_handler).layer(TimeoutLayer::new(deadline)))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
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

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
