//! Batch draft generation REST endpoint.

use crate::auth::AuthedUser;
use crate::error::{error_response, ErrorResponse};
use crate::rest::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use outreach_core::types::{Channel, EngagementIntent};
use outreach_engine::ContactDraft;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchDraftRequest {
    pub contact_ids: Vec<Uuid>,
    /// Free-form intent key; unrecognized values fall back to cold.
    #[serde(default)]
    pub engagement_intent: String,
    pub text_type: Channel,
}

/// POST /v1/drafts/batch — Generate drafts for a set of contacts.
/// Unresolvable contacts are skipped; a generator failure aborts the call.
#[utoipa::path(
    post,
    path = "/v1/drafts/batch",
    tag = "Drafts",
    request_body = BatchDraftRequest,
    responses(
        (status = 200, description = "Generated drafts", body = [ContactDraft]),
        (status = 503, description = "Generation failed", body = ErrorResponse),
    )
)]
pub async fn generate_batch(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(req): Json<BatchDraftRequest>,
) -> Result<Json<Vec<ContactDraft>>, (StatusCode, Json<ErrorResponse>)> {
    let intent = EngagementIntent::parse(&req.engagement_intent);
    state
        .engine
        .drafts
        .generate_batch(&user_id, &req.contact_ids, intent, req.text_type)
        .await
        .map(Json)
        .map_err(error_response)
}
