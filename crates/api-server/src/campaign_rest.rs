//! Campaign and outcome REST endpoints.

use crate::auth::AuthedUser;
use crate::error::{error_response, ErrorResponse};
use crate::rest::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use outreach_core::types::{Campaign, Channel, ContactSendRecord, EngagementIntent, Outcome};
use outreach_engine::MessageContent;
use serde::Deserialize;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

/// Bulk campaign send request. `contact_ids` and `contents` are parallel
/// arrays. The intent arrives as a free-form key and is parsed with a
/// defined fallback.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub contact_ids: Vec<Uuid>,
    pub channel: Channel,
    #[serde(default)]
    pub engagement_intent: String,
    pub contents: Vec<MessageContent>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetOutcomeRequest {
    pub outcome: Outcome,
}

/// POST /v1/campaigns — Validate, dispatch, and commit a campaign.
#[utoipa::path(
    post,
    path = "/v1/campaigns",
    tag = "Campaigns",
    request_body = CreateCampaignRequest,
    responses(
        (status = 201, description = "Campaign committed", body = Campaign),
        (status = 400, description = "No contact survived validation", body = ErrorResponse),
        (status = 503, description = "Every dispatch failed", body = ErrorResponse),
    )
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), (StatusCode, Json<ErrorResponse>)> {
    if req.name.trim().is_empty() {
        warn!("Campaign create rejected: empty name");
        return Err(error_response(outreach_core::OutreachError::validation(
            "name must not be empty",
        )));
    }
    let intent = EngagementIntent::parse(&req.engagement_intent);
    state
        .engine
        .ledger
        .create(
            &user_id,
            &req.name,
            &req.contact_ids,
            req.channel,
            intent,
            &req.contents,
        )
        .await
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(error_response)
}

/// GET /v1/campaigns — List the caller's campaigns, newest-first.
#[utoipa::path(
    get,
    path = "/v1/campaigns",
    tag = "Campaigns",
    responses((status = 200, description = "Campaigns", body = [Campaign]))
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
) -> Result<Json<Vec<Campaign>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .ledger
        .list(&user_id)
        .map(Json)
        .map_err(error_response)
}

/// GET /v1/campaigns/{id} — Fetch one campaign with its send entries.
#[utoipa::path(
    get,
    path = "/v1/campaigns/{id}",
    tag = "Campaigns",
    responses(
        (status = 200, description = "Campaign", body = Campaign),
        (status = 404, description = "Unknown campaign", body = ErrorResponse),
    )
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .ledger
        .get(&user_id, id)
        .map(Json)
        .map_err(error_response)
}

/// POST /v1/campaigns/{id}/entries/{index}/outcome — Record an outcome on
/// one send entry. 409 when the entry is already finalized.
#[utoipa::path(
    post,
    path = "/v1/campaigns/{id}/entries/{index}/outcome",
    tag = "Campaigns",
    request_body = SetOutcomeRequest,
    responses(
        (status = 200, description = "Outcome recorded", body = ContactSendRecord),
        (status = 404, description = "Unknown campaign or entry", body = ErrorResponse),
        (status = 409, description = "Outcome already finalized", body = ErrorResponse),
    )
)]
pub async fn set_outcome(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<SetOutcomeRequest>,
) -> Result<Json<ContactSendRecord>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .outcomes
        .set_outcome(&user_id, id, index, req.outcome)
        .map(Json)
        .map_err(error_response)
}
