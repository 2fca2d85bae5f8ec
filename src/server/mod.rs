//! HTTP front end
//!
//! Thin axum layer over the explanation core:
//! - `POST /api/explain` one level, optional validation
//! - `POST /api/explain/batch` every (or selected) level, unvalidated
//! - `GET /health` liveness
//! - `GET /` the bundled index page

mod handlers;
mod types;


pub use types::{BatchRequest, ErrorBody, ExplainRequest};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use miette::Diagnostic;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerSettings;
use crate::core::explain::GenerationController;

#[derive(Debug, Error, Diagnostic)]
pub enum ServerError {
    #[error("failed to bind {addr}")]
    #[diagnostic(
        code(explainthis::server::bind),
        help("is another process already listening on this port?")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server terminated unexpectedly")]
    #[diagnostic(code(explainthis::server::serve))]
    Serve(#[source] std::io::Error),
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<GenerationController>,
}

impl AppState {
    pub fn new(controller: Arc<GenerationController>) -> Self {
        Self { controller }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/api/explain", post(handlers::explain))
        .route("/api/explain/batch", post(handlers::explain_batch))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(
    settings: &ServerSettings,
    controller: Arc<GenerationController>,
) -> Result<(), ServerError> {
    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(
        address = %addr,
        model = controller.provider().model(),
        "ExplainThis server listening on http://{}",
        addr
    );

    axum::serve(listener, router(AppState::new(controller)))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("ExplainThis server shutting down");
        })
        .await
        .map_err(ServerError::Serve)
}
