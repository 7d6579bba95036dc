//! HTTP error mapping.
//!
//! Store errors surface as JSON bodies with a stable machine-readable code;
//! storage faults are logged server-side and returned as an opaque 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Store(err) = self;
        let (status, code, message) = match &err {
            StoreError::AuthorNotFound(_) | StoreError::ArticleNotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            StoreError::AuthorExists(_) | StoreError::ArticleExists(_) => {
                (StatusCode::CONFLICT, "CONFLICT", err.to_string())
            }
            StoreError::Invalid { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID", err.to_string())
            }
            StoreError::Db(_) | StoreError::Codec(_) => {
                error!("storage failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal storage error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message, code })).into_response()
    }
}
