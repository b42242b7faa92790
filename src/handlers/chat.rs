use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::services::chat;
use crate::state::AppState;

static INDEX_HTML: &str = include_str!("../../web/index.html");
static WIDGET_JS: &str = include_str!("../../web/widget.js");

const TROUBLE_REPLY: &str = "Sorry, I'm having trouble right now. Please try again in a moment.";

pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Script tag embed for tenant sites, tenant chosen by `data-client`.
pub async fn widget_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        WIDGET_JS,
    )
}

// POST /chat
#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "malformed chat request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ChatResponse {
                    reply: chat::EMPTY_MESSAGE_REPLY.to_string(),
                }),
            )
                .into_response();
        }
    };
    let message = req.message.unwrap_or_default();

    match chat::handle_message(&state, &message, req.client.as_deref()).await {
        Ok(reply) => Json(ChatResponse { reply }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "chat processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse {
                    reply: TROUBLE_REPLY.to_string(),
                }),
            )
                .into_response()
        }
    }
}
