//! REST endpoints and the WebSocket feed for the sign-up form.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use super::session::SignupSession;
use crate::error::FlowError;
use crate::flow::AdvanceOutcome;
use crate::form::{FieldName, SubmitOutcome};
use crate::notify::Toast;
use crate::view::FormView;

/// Shared state for the sign-up routes.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SignupSession>,
}

/// Messages sent to WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Current render state (sent on connect and after every change).
    FormSync { view: FormView },
    /// A transient notification.
    Toast { toast: Toast },
    /// Reply to a client-initiated submit.
    Submitted { outcome: SubmitOutcome },
    /// Reply to a client action that did not apply.
    Error { message: String },
}

/// Actions a WebSocket client may send.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientAction {
    SetField { field: FieldName, value: String },
    Advance,
    Retreat,
    Submit,
}

#[derive(Debug, Deserialize)]
struct SetFieldBody {
    value: String,
}

#[derive(Debug, Serialize)]
struct AdvanceResponse {
    #[serde(flatten)]
    outcome: AdvanceOutcome,
    view: FormView,
}

impl IntoResponse for FlowError {
    fn into_response(self) -> Response {
        let status = match self {
            FlowError::UnknownField(_) => StatusCode::NOT_FOUND,
            FlowError::InvalidTransition { .. } | FlowError::SubmitOutsideCredentials { .. } => {
                StatusCode::CONFLICT
            }
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// CORS for a page served from elsewhere. `None` allows any origin.
pub fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}

/// Build the sign-up router.
pub fn signup_routes(session: Arc<SignupSession>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/api/signup", get(get_view))
        .route("/api/signup/fields/{name}", put(set_field))
        .route("/api/signup/advance", post(advance))
        .route("/api/signup/retreat", post(retreat))
        .route("/api/signup/submit", post(submit))
        .with_state(AppState { session })
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "signup-form"
    }))
}

// ── REST Endpoints ──────────────────────────────────────────────────────

async fn get_view(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.view().await)
}

async fn set_field(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<SetFieldBody>,
) -> Result<Json<FormView>, FlowError> {
    let field: FieldName = name.parse()?;
    Ok(Json(state.session.set_field(field, body.value).await))
}

async fn advance(State(state): State<AppState>) -> Result<Json<AdvanceResponse>, FlowError> {
    let (outcome, view) = state.session.advance().await?;
    Ok(Json(AdvanceResponse { outcome, view }))
}

async fn retreat(State(state): State<AppState>) -> Result<Json<FormView>, FlowError> {
    Ok(Json(state.session.retreat().await?))
}

async fn submit(State(state): State<AppState>) -> Result<Response, FlowError> {
    let outcome = state.session.submit().await?;
    let status = match outcome {
        SubmitOutcome::Completed(_) => StatusCode::OK,
        SubmitOutcome::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    Ok((status, Json(outcome)).into_response())
}

// ── WebSocket ───────────────────────────────────────────────────────────

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    info!("WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, state.session))
}

async fn send_json(socket: &mut WebSocket, msg: &WsMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            warn!(error = %e, "Failed to serialize WS message");
            true
        }
    }
}

async fn handle_socket(mut socket: WebSocket, session: Arc<SignupSession>) {
    info!(session_id = %session.id(), "WebSocket client connected");

    // Subscribe before the initial sync so no change slips between them.
    let mut views = session.subscribe_views();
    let mut toasts = session.subscribe_toasts();

    let sync = WsMessage::FormSync {
        view: session.view().await,
    };
    if !send_json(&mut socket, &sync).await {
        warn!("Failed to send initial sync, client disconnected");
        return;
    }

    loop {
        tokio::select! {
            result = views.recv() => {
                let msg = match result {
                    Ok(view) => WsMessage::FormSync { view },
                    Err(RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind view broadcast");
                        WsMessage::FormSync { view: session.view().await }
                    }
                    Err(RecvError::Closed) => break,
                };
                if !send_json(&mut socket, &msg).await {
                    debug!("Client disconnected during send");
                    break;
                }
            }

            result = toasts.recv() => {
                match result {
                    Ok(toast) => {
                        if !send_json(&mut socket, &WsMessage::Toast { toast }).await {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind toast broadcast");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_client_message(&text, &session).await {
                            if !send_json(&mut socket, &reply).await {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("WebSocket connection closed");
}

/// Apply a client action. View changes go out through the broadcast; only
/// submit results and errors are replied to directly.
async fn handle_client_message(text: &str, session: &SignupSession) -> Option<WsMessage> {
    let action = match serde_json::from_str::<ClientAction>(text) {
        Ok(action) => action,
        Err(e) => {
            debug!(error = %e, "Unrecognized WS message from client");
            return Some(WsMessage::Error {
                message: format!("unrecognized message: {e}"),
            });
        }
    };

    let result = match action {
        ClientAction::SetField { field, value } => {
            session.set_field(field, value).await;
            Ok(None)
        }
        ClientAction::Advance => session.advance().await.map(|_| None),
        ClientAction::Retreat => session.retreat().await.map(|_| None),
        ClientAction::Submit => session
            .submit()
            .await
            .map(|outcome| Some(WsMessage::Submitted { outcome })),
    };

    result.unwrap_or_else(|e| {
        debug!(error = %e, "WS action rejected");
        Some(WsMessage::Error {
            message: e.to_string(),
        })
    })
}
