//! Contracts the engine depends on. Implementations are injected once at
//! startup and shared by reference; tests swap in mocks.

use async_trait::async_trait;
use outreach_core::OutreachResult;

/// Text generation given a prompt. Failures surface as Upstream errors,
/// classified Retriable (timeout, rate limit) or Fatal (rejected prompt,
/// bad credentials).
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_length: usize) -> OutreachResult<String>;
}

/// Email delivery. Returns the provider message id on success.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> OutreachResult<String>;
}

/// SMS delivery. Returns the provider message id on success. The core does
/// no length truncation; respecting segment limits is the generator's and
/// caller's responsibility.
#[async_trait]
pub trait SmsDispatcher: Send + Sync {
    async fn send(&self, to_phone: &str, body: &str) -> OutreachResult<String>;
}

/// Bearer-token verification. Maps a token to the owning user id.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> OutreachResult<String>;
}
