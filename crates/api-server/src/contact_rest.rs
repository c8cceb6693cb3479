//! Contact directory REST endpoints.

use crate::auth::AuthedUser;
use crate::error::{error_response, ErrorResponse};
use crate::rest::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use outreach_core::types::{Activity, Contact, Note};
use outreach_engine::NewContact;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NoteRequest {
    pub body: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrichRequest {
    pub details: String,
}

/// POST /v1/contacts — Create a contact.
#[utoipa::path(
    post,
    path = "/v1/contacts",
    tag = "Contacts",
    request_body = NewContact,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 400, description = "Missing first name", body = ErrorResponse),
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Json(req): Json<NewContact>,
) -> Result<(StatusCode, Json<Contact>), (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .create(&user_id, req)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(error_response)
}

/// GET /v1/contacts — List the caller's contacts, newest-first.
#[utoipa::path(
    get,
    path = "/v1/contacts",
    tag = "Contacts",
    responses((status = 200, description = "Contacts", body = [Contact]))
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
) -> Result<Json<Vec<Contact>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .list(&user_id)
        .map(Json)
        .map_err(error_response)
}

/// GET /v1/contacts/{id} — Fetch a contact profile. Viewing is itself an
/// activity and lands in the log.
#[utoipa::path(
    get,
    path = "/v1/contacts/{id}",
    tag = "Contacts",
    responses(
        (status = 200, description = "Contact", body = Contact),
        (status = 404, description = "Unknown contact", body = ErrorResponse),
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Contact>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .view_profile(&user_id, id)
        .map(Json)
        .map_err(error_response)
}

/// GET /v1/contacts/{id}/activities — Activity feed, newest-first.
#[utoipa::path(
    get,
    path = "/v1/contacts/{id}/activities",
    tag = "Contacts",
    responses((status = 200, description = "Activity feed", body = [Activity]))
)]
pub async fn contact_activities(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Activity>>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .activities(&user_id, id)
        .map(Json)
        .map_err(error_response)
}

/// POST /v1/contacts/{id}/notes — Add a note.
#[utoipa::path(
    post,
    path = "/v1/contacts/{id}/notes",
    tag = "Contacts",
    request_body = NoteRequest,
    responses((status = 201, description = "Note added", body = Note))
)]
pub async fn add_note(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .add_note(&user_id, id, &req.body)
        .map(|n| (StatusCode::CREATED, Json(n)))
        .map_err(error_response)
}

/// PUT /v1/contacts/{id}/notes/{note_id} — Edit a note.
#[utoipa::path(
    put,
    path = "/v1/contacts/{id}/notes/{note_id}",
    tag = "Contacts",
    request_body = NoteRequest,
    responses((status = 200, description = "Note updated", body = Note))
)]
pub async fn edit_note(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path((id, note_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<Note>, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .edit_note(&user_id, id, note_id, &req.body)
        .map(Json)
        .map_err(error_response)
}

/// DELETE /v1/contacts/{id}/notes/{note_id} — Remove a note. The activity
/// log keeps the deletion as history.
#[utoipa::path(
    delete,
    path = "/v1/contacts/{id}/notes/{note_id}",
    tag = "Contacts",
    responses((status = 204, description = "Note removed"))
)]
pub async fn delete_note(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path((id, note_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .delete_note(&user_id, id, note_id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

/// POST /v1/contacts/{id}/enrich — Record an enrichment event.
#[utoipa::path(
    post,
    path = "/v1/contacts/{id}/enrich",
    tag = "Contacts",
    request_body = EnrichRequest,
    responses((status = 204, description = "Enrichment recorded"))
)]
pub async fn enrich_contact(
    State(state): State<AppState>,
    AuthedUser(user_id): AuthedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<EnrichRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .engine
        .contacts
        .record_enrichment(&user_id, id, &req.details)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
