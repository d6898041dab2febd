// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponseBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    Validation(String),

    #[error("unsupported media type '{0}'")]
    UnsupportedMediaType(String),

    #[error("zone '{0}' not found")]
    ZoneNotFound(String),

    #[error("zone write conflict: {0}")]
    Conflict(String),

    #[error("zone store error: {0}")]
    Remote(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        AppError::Remote(msg.into())
    }

    pub fn internal<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnsupportedMediaType(ct) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("unsupported media type '{ct}'"),
            ),
            AppError::ZoneNotFound(zone) => {
                (StatusCode::NOT_FOUND, format!("zone '{zone}' not found"))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Remote(msg) => {
                error!("zone store error: {msg}");
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::Internal(err) => {
                error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".into(),
                )
            }
        };

        let body = Json(ErrorResponseBody { error: msg });
        (status, body).into_response()
    }
}
