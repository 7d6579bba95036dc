//! The `http` module is the CRUD surface of the backend.
//!
//! Routine request/response handling over authors and articles, served by
//! axum. Nothing in here touches the real-time core: finished-article
//! notifications originate inside the store's write path, so these handlers
//! stay plain persistence glue.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::router;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::store::BlogStore;

/// Shared state for the HTTP handlers. `ws_port` only feeds the demo page,
/// which needs to know where the feed listener lives.
#[derive(Clone)]
pub struct AppState {
    pub store: BlogStore,
    pub ws_port: u16,
}

pub async fn start_http_server(addr: String, state: AppState) {
    let listener = TcpListener::bind(addr.clone()).await.expect("Can't bind");

    info!("HTTP server listening on http://{addr}");

    if let Err(e) = axum::serve(listener, router(state)).await {
        error!("HTTP server error: {e}");
    }
}

#[cfg(test)]
mod tests;
