//! Audio artifact retrieval handlers.

use crate::AppState;
use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use hotline_store::StoreError;
use std::sync::Arc;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => ApiError::NotFound(format!("audio not found: {}", name)),
            StoreError::InvalidName(name) => {
                ApiError::BadRequest(format!("invalid audio name: {}", name))
            }
            StoreError::Io(e) => ApiError::InternalServerError(format!("store read failed: {}", e)),
        }
    }
}

/// Handler for `GET /audio/{filename}`.
///
/// Serves a synthesized artifact for provider playback. Unknown names yield
/// a structured 404 body, never a crash.
pub async fn audio_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.store.get(&filename).await?;
    Ok(([(header::CONTENT_TYPE, "audio/wav")], bytes).into_response())
}
