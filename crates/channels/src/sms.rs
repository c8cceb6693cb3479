//! Twilio SMS dispatch.
//!
//! Development mode simulates the Twilio Messages API and returns a
//! generated SM-prefixed sid. No length truncation happens here.

use crate::traits::SmsDispatcher;
use async_trait::async_trait;
use outreach_core::config::SmsConfig;
use outreach_core::{OutreachError, OutreachResult};
use tracing::{debug, info};

/// Twilio-backed SMS dispatcher.
pub struct TwilioDispatcher {
    config: SmsConfig,
}

impl TwilioDispatcher {
    pub fn new(config: SmsConfig) -> Self {
        info!(
            account_sid = %config.account_sid,
            from = %config.from_number,
            "Twilio dispatcher initialized"
        );
        Self { config }
    }
}

#[async_trait]
impl SmsDispatcher for TwilioDispatcher {
    async fn send(&self, to_phone: &str, body: &str) -> OutreachResult<String> {
        if to_phone.trim().is_empty() {
            return Err(OutreachError::fatal("twilio", "empty destination number"));
        }

        debug!(to = %to_phone, chars = body.len(), "Sending SMS via Twilio");

        // Twilio Messages API form body (stub — in production, HTTP POST to
        // /2010-04-01/Accounts/{sid}/Messages.json)
        let _payload = serde_json::json!({
            "From": self.config.from_number,
            "To": to_phone,
            "Body": body,
        });

        let sid = format!("SM{}", uuid::Uuid::new_v4().to_string().replace('-', ""));

        metrics::counter!("outreach.sms.dispatched").increment(1);
        info!(to = %to_phone, provider_message_id = %sid, "SMS dispatched");

        Ok(sid)
    }
}
