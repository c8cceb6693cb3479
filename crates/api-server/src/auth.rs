//! Bearer-token extraction for business routes.
//!
//! Every `/v1` handler takes an `AuthedUser`; the extractor pulls the
//! Authorization header, hands the token to the identity verifier, and
//! rejects the request with 401 before the handler body runs.

use crate::error::{error_response, ErrorResponse};
use crate::rest::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::Json;
use outreach_core::OutreachError;

/// The verified caller. The wrapped string is the user id every storage
/// key is scoped by.
pub struct AuthedUser(pub String);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match header_value {
            Some(value) if value.starts_with("Bearer ") => &value[7..],
            _ => {
                return Err(error_response(OutreachError::Unauthorized(
                    "Authorization header with Bearer token required".to_string(),
                )))
            }
        };

        let user_id = state
            .verifier
            .verify(token)
            .await
            .map_err(error_response)?;

        Ok(AuthedUser(user_id))
    }
}
