//! Follow-up REST endpoints. These two routes keep the camelCase wire
//! shapes of the original public API.

use crate::auth::AuthedUser;
use crate::error::{error_response, ErrorResponse};
use crate::rest::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use outreach_core::types::Outcome;
use outreach_core::OutreachError;
use outreach_engine::SendFollowUpRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftFollowUpRequest {
    pub contact_id: Uuid,
    pub original_campaign_id: Uuid,
    pub outcome: Outcome,
    #[serde(default)]
    pub original_message_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DraftFollowUpResponse {
    pub draft: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendFollowUpResponse {
    pub campaign_id: Uuid,
    pub provider_message_id: String,
    pub sent_at: DateTime<Utc>,
}

/// POST /v1/followups/draft — Draft follow-up copy. Nothing is persisted;
/// the draft goes back to the user for review.
#[utoipa::path(
    post,
    path = "/v1/followups/draft",
    tag = "Follow-ups",
    request_body = DraftFollowUpRequest,
    responses(
        (status = 200, description = "Draft text", body = DraftFollowUpResponse),
        (status = 400, description = "Outcome already finalized", body = ErrorResponse),
    )
)]
pub async fn draft_follow_up(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(req): Json<DraftFollowUpRequest>,
) -> Result<Json<DraftFollowUpResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .followups
        .draft_follow_up(
            &user_id,
            req.contact_id,
            req.original_campaign_id,
            req.outcome,
            &req.original_message_text,
        )
        .await
        .map(|draft| Json(DraftFollowUpResponse { draft }))
        .map_err(error_response)
}

/// POST /v1/followups/send — Dispatch the confirmed follow-up and commit
/// the chained campaign.
#[utoipa::path(
    post,
    path = "/v1/followups/send",
    tag = "Follow-ups",
    request_body = SendFollowUpRequest,
    responses(
        (status = 201, description = "Chained campaign committed", body = SendFollowUpResponse),
        (status = 404, description = "Unknown contact or campaign", body = ErrorResponse),
        (status = 503, description = "Dispatch failed, nothing created", body = ErrorResponse),
    )
)]
pub async fn send_follow_up(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(req): Json<SendFollowUpRequest>,
) -> Result<(StatusCode, Json<SendFollowUpResponse>), (StatusCode, Json<ErrorResponse>)> {
    let campaign = state
        .engine
        .followups
        .send_follow_up(&user_id, req)
        .await
        .map_err(error_response)?;

    let entry = campaign.contacts.first().ok_or_else(|| {
        error_response(OutreachError::Internal(anyhow::anyhow!(
            "follow-up campaign committed without entries"
        )))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(SendFollowUpResponse {
            campaign_id: campaign.id,
            provider_message_id: entry.provider_message_id.clone(),
            sent_at: entry.sent_at,
        }),
    ))
}
