//! HTTP surface
//!
//! # Endpoints
//!
//! - POST /chat - Advance the caller's interview
//! - GET / - Liveness text
//!
//! Every `/chat` response body is `{"response": "..."}`. Failures carry the
//! generic failure text with a status code chosen by the error class:
//! 400 for an unusable request, 502 when a collaborator failed, 500 otherwise.

use crate::interview::SessionTracker;
use crate::secrets::scrub_secrets;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sdk::errors::{EngineError, ErrorClass, SisuuErrorExt};
use sdk::types::{ChatRequest, ChatResponse};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Liveness text served on `GET /`
pub const LIVENESS_MESSAGE: &str = "Sisuu web bot is live.";

/// State shared across handlers
#[derive(Clone)]
struct ServerState {
    tracker: Arc<SessionTracker>,
}

/// Build the application router
///
/// An empty `cors_origins` allows any origin.
pub fn router(tracker: Arc<SessionTracker>, cors_origins: &[String]) -> Result<Router, EngineError> {
    let state = ServerState { tracker };

    Ok(Router::new()
        .route("/chat", post(chat_handler))
        .route("/", get(index_handler))
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// CORS policy for the given origins; empty allows any origin
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, EngineError> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| EngineError::Config(format!("Invalid CORS origin '{}': {}", origin, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), EngineError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| EngineError::Network(format!("Server error: {}", e)))?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Map an error class to the HTTP status returned with the failure text
pub fn status_for(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::Validation => StatusCode::BAD_REQUEST,
        ErrorClass::Collaborator => StatusCode::BAD_GATEWAY,
        ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure_response(error: &EngineError) -> Response {
    (status_for(error.class()), Json(ChatResponse::failure())).into_response()
}

async fn chat_handler(
    State(state): State<ServerState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = EngineError::Validation(rejection.body_text());
            tracing::warn!(error = %error, "Rejected chat request");
            return failure_response(&error);
        }
    };

    match state.tracker.advance(&request.user_id, request.message).await {
        Ok(reply) => Json(ChatResponse::new(reply.text())).into_response(),
        Err(error) => {
            tracing::error!(
                user_id = %request.user_id,
                error = %scrub_secrets(&error.to_string()),
                hint = error.user_hint(),
                "Error in /chat"
            );
            failure_response(&error)
        }
    }
}

async fn index_handler() -> &'static str {
    LIVENESS_MESSAGE
}
