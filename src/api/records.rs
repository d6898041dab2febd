// src/api/records.rs
use axum::{
    Extension,
    body::Body,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::info;

use super::WEBHOOK_MEDIA_TYPE;
use crate::SharedState;
use crate::endpoint::{Changes, DomainFilter, Endpoint};
use crate::error::AppError;

/// Record types advertised to the controller during negotiation.
const SUPPORTED_RECORD_TYPES: [&str; 4] = ["A", "AAAA", "CNAME", "TXT"];

// GET /
pub async fn negotiate(Extension(state): Extension<SharedState>) -> Response {
    let filter = DomainFilter {
        domain_filter: vec![state.config.zone_root().to_string()],
        record_types: SUPPORTED_RECORD_TYPES
            .iter()
            .map(|t| t.to_string())
            .collect(),
    };
    webhook_json(StatusCode::OK, &filter)
}

// GET /healthz
pub async fn healthz() -> Response {
    webhook_json(StatusCode::OK, &json!({ "status": "ok" }))
}

// GET /records
pub async fn list_records(
    Extension(state): Extension<SharedState>,
) -> Result<Response, AppError> {
    let endpoints = state.reconciler.list_endpoints().await?;
    Ok(webhook_json(StatusCode::OK, &endpoints))
}

// POST /records
pub async fn apply_changes(
    Extension(state): Extension<SharedState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    require_webhook_media_type(&headers)?;

    let changes: Changes = serde_json::from_str(&body)
        .map_err(|e| AppError::validation(format!("failed to decode change payload: {e}")))?;

    info!(
        create = changes.create.len(),
        delete = changes.delete.len(),
        update_old = changes.update_old.len(),
        update_new = changes.update_new.len(),
        "received change request"
    );

    state.reconciler.apply_changes(&changes).await?;
    Ok(no_content())
}

// POST /adjustendpoints
pub async fn adjust_endpoints(
    Extension(state): Extension<SharedState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    require_webhook_media_type(&headers)?;

    let desired: Vec<Endpoint> = serde_json::from_str(&body)
        .map_err(|e| AppError::validation(format!("failed to decode desired endpoints: {e}")))?;

    let adjusted = state.reconciler.adjust_endpoints(desired);
    Ok(webhook_json(StatusCode::OK, &adjusted))
}

fn require_webhook_media_type(headers: &HeaderMap) -> Result<(), AppError> {
    let ct = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if ct != WEBHOOK_MEDIA_TYPE {
        return Err(AppError::UnsupportedMediaType(ct.to_string()));
    }
    Ok(())
}

/// Serialize a body with the versioned webhook media type stamped on.
fn webhook_json<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    let bytes = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(err) => return AppError::internal(err).into_response(),
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, WEBHOOK_MEDIA_TYPE)
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn no_content() -> Response {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::CONTENT_TYPE, WEBHOOK_MEDIA_TYPE)
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
