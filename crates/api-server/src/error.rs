//! Mapping from the core error taxonomy to HTTP responses.

use axum::http::StatusCode;
use axum::Json;
use outreach_core::{OutreachError, UpstreamKind};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// One error type, one status. Conflict is always surfaced to the user as
/// "already finalized" material, never absorbed into a 200.
pub fn error_response(err: OutreachError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        OutreachError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
        OutreachError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
        OutreachError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        OutreachError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        OutreachError::Upstream {
            kind: UpstreamKind::Retriable,
            ..
        } => (StatusCode::SERVICE_UNAVAILABLE, "upstream_retriable"),
        OutreachError::Upstream {
            kind: UpstreamKind::Fatal,
            ..
        } => (StatusCode::BAD_GATEWAY, "upstream_failed"),
        OutreachError::Serialization(_) | OutreachError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };

    metrics::counter!("outreach.api.errors", "code" => code).increment(1);

    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}
