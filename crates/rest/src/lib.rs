//! REST surface for Keyport
//!
//! Exposes the keybase delete and update operations over HTTP:
//!
//! - `DELETE /keys/{name}` with body `{"password": "..."}`
//! - `PUT /keys/{name}` with body `{"new_password": "...", "old_password": "..."}`
//!
//! Status mapping: unknown name is 404, wrong password is 401, a body
//! that fails to parse is 400, anything else is 500. Error bodies carry
//! the plain-text error message.

pub mod error;
pub mod handlers;

pub use error::RestError;
pub use handlers::{AppState, DeleteKeyBody, UpdateKeyBody};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::delete;
use axum::Router;
use tracing::info;

/// Build the key management router over the given state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/keys/:name",
            delete(handlers::delete_key).put(handlers::update_key),
        )
        .with_state(state)
}

/// Bind and serve the router until the task is cancelled
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "serving key management API");
    axum::serve(listener, router(state)).await
}
