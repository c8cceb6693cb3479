//! Follow-up chaining: draft a continuation for a prior send, and on
//! confirmation create a new single-contact campaign that references the
//! campaign it follows up on.
//!
//! `send_follow_up` dispatches first and only creates the chained campaign
//! record after the provider accepts the message, so a dispatch failure
//! leaves no half-created campaign behind.

use crate::contacts;
use crate::policy;
use outreach_core::types::{
    Campaign, Channel, Contact, ContactSendRecord, EngagementIntent, Outcome, SendStatus,
};
use outreach_core::{OutreachError, OutreachResult};
use outreach_channels::{ContentGenerator, EmailDispatcher};
use outreach_store::{Collection, DocKey, DocumentStore};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

/// Upper bound passed to the generator for follow-up drafts.
const FOLLOW_UP_MAX_CHARS: usize = 1200;

/// Request shape for the confirmed follow-up send.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendFollowUpRequest {
    pub contact_id: Uuid,
    pub original_campaign_id: Uuid,
    pub subject: String,
    pub body: String,
    pub to_email: String,
    #[serde(default)]
    pub to_name: String,
}

pub struct FollowUpOrchestrator {
    store: Arc<DocumentStore>,
    generator: Arc<dyn ContentGenerator>,
    email: Arc<dyn EmailDispatcher>,
}

impl FollowUpOrchestrator {
    pub fn new(
        store: Arc<DocumentStore>,
        generator: Arc<dyn ContentGenerator>,
        email: Arc<dyn EmailDispatcher>,
    ) -> Self {
        Self {
            store,
            generator,
            email,
        }
    }

    fn campaign_key(user_id: &str, campaign_id: Uuid) -> DocKey {
        DocKey::new(user_id, Collection::Campaigns, campaign_id.to_string())
    }

    fn contact_key(user_id: &str, contact_id: Uuid) -> DocKey {
        DocKey::new(user_id, Collection::Contacts, contact_id.to_string())
    }

    /// Draft follow-up copy for a prior send. The draft is returned to the
    /// caller unpersisted; nothing is written until the user confirms with
    /// `send_follow_up`.
    pub async fn draft_follow_up(
        &self,
        user_id: &str,
        contact_id: Uuid,
        original_campaign_id: Uuid,
        outcome: Outcome,
        original_message_text: &str,
    ) -> OutreachResult<String> {
        let contact: Contact = self
            .store
            .get_required(&Self::contact_key(user_id, contact_id))?;
        let original: Campaign = self
            .store
            .get_required(&Self::campaign_key(user_id, original_campaign_id))?;

        let guidance = policy::followup_guidance(outcome).ok_or_else(|| {
            OutreachError::validation("cannot follow up on a finalized outcome")
        })?;

        let prompt = format!(
            "You are drafting a follow-up message in a B2B outreach sequence.\n\
             Recipient: {} ({} at {})\n\
             Prior campaign intent: {}\n\
             Recorded outcome: {:?}\n\
             Original message:\n{}\n\
             Guidance: {}\n\
             Write the follow-up email body:",
            contact.full_name(),
            contact.title,
            contact.company,
            original.engagement_intent.as_str(),
            outcome,
            original_message_text,
            guidance,
        );

        let draft = self
            .generator
            .generate(&prompt, FOLLOW_UP_MAX_CHARS)
            .await?;

        metrics::counter!("outreach.followups.drafted").increment(1);
        Ok(draft)
    }

    /// Send a confirmed follow-up and commit the chained campaign.
    pub async fn send_follow_up(
        &self,
        user_id: &str,
        req: SendFollowUpRequest,
    ) -> OutreachResult<Campaign> {
        if req.to_email.trim().is_empty() {
            return Err(OutreachError::validation("toEmail must not be empty"));
        }

        let contact: Contact = self
            .store
            .get_required(&Self::contact_key(user_id, req.contact_id))?;
        let original: Campaign = self
            .store
            .get_required(&Self::campaign_key(user_id, req.original_campaign_id))?;

        // Dispatch first; the campaign record only exists if the provider
        // accepted the message.
        let provider_message_id = self
            .email
            .send(&req.to_email, &req.subject, &req.body)
            .await?;

        let name = if req.to_name.trim().is_empty() {
            contact.full_name()
        } else {
            req.to_name.clone()
        };

        let now = self.store.server_time();
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: format!("Follow-up — {}", original.name),
            channel: Channel::Email,
            engagement_intent: EngagementIntent::Followup,
            parent_campaign_id: Some(original.id),
            contacts: vec![ContactSendRecord {
                contact_id: contact.id,
                name,
                destination: req.to_email.clone(),
                subject: req.subject.clone(),
                body: req.body.clone(),
                status: SendStatus::Sent,
                sent_at: now,
                provider_message_id,
                outcome: None,
                outcome_marked_at: None,
                outcome_locked: false,
                outcome_locked_at: None,
            }],
            created_at: now,
            user_id: user_id.to_string(),
        };

        self.store
            .put(Self::campaign_key(user_id, campaign.id), &campaign)?;
        contacts::append_send_activity(
            &self.store,
            user_id,
            contact.id,
            &format!("follow-up sent for campaign \"{}\"", original.name),
        );

        metrics::counter!("outreach.followups.sent").increment(1);
        info!(
            campaign_id = %campaign.id,
            parent_campaign_id = %original.id,
            "Follow-up campaign committed"
        );

        Ok(campaign)
    }
}
