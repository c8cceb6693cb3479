//! Bearer-token identity verification.
//!
//! Development: a static token table seeded at startup. Production: replace
//! with JWT verification against the identity provider behind the same
//! trait.

use crate::traits::IdentityVerifier;
use async_trait::async_trait;
use dashmap::DashMap;
use outreach_core::{OutreachError, OutreachResult};
use tracing::warn;

/// Static token → user id table for development.
pub struct StaticTokenVerifier {
    tokens: DashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }

    pub fn with_token(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), user_id.into());
        self
    }
}

impl Default for StaticTokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> OutreachResult<String> {
        match self.tokens.get(token) {
            Some(entry) => Ok(entry.value().clone()),
            None => {
                warn!("Rejected unknown bearer token");
                metrics::counter!("outreach.auth.rejected").increment(1);
                Err(OutreachError::Unauthorized(
                    "invalid or expired bearer token".to_string(),
                ))
            }
        }
    }
}
