//! HTTP/WebSocket adapter: serves the form state to a browser-rendered page.

pub mod routes;
pub mod session;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::SignupConfig;
use crate::error::ServerError;

pub use routes::{AppState, ClientAction, WsMessage, cors_layer, signup_routes};
pub use session::SignupSession;

/// Bind the configured address and serve until the process stops.
pub async fn serve(config: &SignupConfig) -> Result<(), ServerError> {
    let session = Arc::new(SignupSession::new());
    let app = signup_routes(Arc::clone(&session)).layer(cors_layer(config.cors_origin.clone()));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!(%addr, session_id = %session.id(), "Sign-up server started");

    axum::serve(listener, app).await?;
    Ok(())
}
