//! Template REST endpoints.

use crate::auth::AuthedUser;
use crate::error::{error_response, ErrorResponse};
use crate::rest::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use outreach_core::types::Template;
use outreach_engine::TemplateDraft;
use uuid::Uuid;

/// POST /v1/templates — Save a template.
#[utoipa::path(
    post,
    path = "/v1/templates",
    tag = "Templates",
    request_body = TemplateDraft,
    responses(
        (status = 201, description = "Template saved", body = Template),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
    )
)]
pub async fn save_template(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(draft): Json<TemplateDraft>,
) -> Result<(StatusCode, Json<Template>), (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .templates
        .save(&user_id, draft)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(error_response)
}

/// GET /v1/templates — List the caller's templates, newest-first.
#[utoipa::path(
    get,
    path = "/v1/templates",
    tag = "Templates",
    responses((status = 200, description = "Templates", body = [Template]))
)]
pub async fn list_templates(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
) -> Result<Json<Vec<Template>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .templates
        .list(&user_id)
        .map(Json)
        .map_err(error_response)
}

/// GET /v1/templates/{id} — Fetch one template.
#[utoipa::path(
    get,
    path = "/v1/templates/{id}",
    tag = "Templates",
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "Unknown template", body = ErrorResponse),
    )
)]
pub async fn get_template(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Template>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .templates
        .get(&user_id, id)
        .map(Json)
        .map_err(error_response)
}

/// DELETE /v1/templates/{id} — Idempotent owner-scoped delete.
#[utoipa::path(
    delete,
    path = "/v1/templates/{id}",
    tag = "Templates",
    responses((status = 204, description = "Deleted (or already absent)"))
)]
pub async fn delete_template(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state.engine.templates.delete(&user_id, id);
    StatusCode::NO_CONTENT
}
