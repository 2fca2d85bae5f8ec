use std::collections::BTreeMap;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::types::{BatchRequest, ErrorBody, ExplainRequest};
use super::AppState;
use crate::core::explain::{ExplainResponse, FailureKind, GenerationResult, Level};

const PREVIEW_CHARS: usize = 50;

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

fn status_for(result: &GenerationResult) -> StatusCode {
    match result.failure {
        None => StatusCode::OK,
        Some(FailureKind::InvalidInput) => StatusCode::BAD_REQUEST,
        Some(FailureKind::ProviderFailure) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
}

pub(super) async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

pub(super) async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "version": crate::VERSION }))
}

pub(super) async fn explain(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Response {
    tracing::info!(
        level = %request.complexity,
        validate = request.validate,
        text = %preview(&request.text),
        "explain request received"
    );

    let result = state
        .controller
        .explain(&request.text, &request.complexity, request.validate, None)
        .await;

    let status = status_for(&result);
    if status != StatusCode::OK {
        tracing::warn!(
            status = status.as_u16(),
            error = result.error_message.as_deref().unwrap_or_default(),
            "explain request failed"
        );
    }

    (status, Json(ExplainResponse::from(result))).into_response()
}

pub(super) async fn explain_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Response {
    tracing::info!(
        levels = ?request.levels,
        text = %preview(&request.text),
        "batch request received"
    );

    if request.text.trim().is_empty() {
        return bad_request("Text cannot be empty");
    }

    let levels = match &request.levels {
        Some(codes) => {
            let parsed: Result<Vec<Level>, _> = codes.iter().map(|c| c.parse()).collect();
            match parsed {
                Ok(levels) if levels.is_empty() => return bad_request("No levels requested"),
                Ok(levels) => Some(levels),
                Err(e) => return bad_request(e.to_string()),
            }
        }
        None => None,
    };

    let results = state
        .controller
        .explain_batch(&request.text, levels.as_deref())
        .await;

    let body: BTreeMap<String, ExplainResponse> = results
        .into_iter()
        .map(|(level, result)| (level.code().to_string(), ExplainResponse::from(result)))
        .collect();

    Json(body).into_response()
}
