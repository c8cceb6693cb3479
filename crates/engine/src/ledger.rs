//! Campaign ledger: validates destinations, dispatches per contact, and
//! commits one send record per successful dispatch.
//!
//! Commits are independent — a dispatch failure for one contact never rolls
//! back records already earned by others. A campaign document is only
//! written when it has at least one record.

use crate::contacts;
use outreach_core::types::{
    Campaign, Channel, Contact, ContactSendRecord, EngagementIntent, SendStatus,
};
use outreach_core::{OutreachError, OutreachResult};
use outreach_channels::{EmailDispatcher, SmsDispatcher};
use outreach_store::{Collection, DocKey, DocumentStore};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-contact message content, parallel to the contact id list.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MessageContent {
    #[serde(default)]
    pub subject: String,
    pub body: String,
}

pub struct CampaignLedger {
    store: Arc<DocumentStore>,
    email: Arc<dyn EmailDispatcher>,
    sms: Arc<dyn SmsDispatcher>,
}

impl CampaignLedger {
    pub fn new(
        store: Arc<DocumentStore>,
        email: Arc<dyn EmailDispatcher>,
        sms: Arc<dyn SmsDispatcher>,
    ) -> Self {
        Self { store, email, sms }
    }

    fn campaign_key(user_id: &str, campaign_id: Uuid) -> DocKey {
        DocKey::new(user_id, Collection::Campaigns, campaign_id.to_string())
    }

    fn contact_key(user_id: &str, contact_id: Uuid) -> DocKey {
        DocKey::new(user_id, Collection::Contacts, contact_id.to_string())
    }

    /// Create and send a campaign. `contact_ids` and `contents` are
    /// parallel arrays. Contacts that are missing or lack the destination
    /// the channel requires are dropped, not fatal; the call fails
    /// Validation only when zero contacts survive.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        contact_ids: &[Uuid],
        channel: Channel,
        intent: EngagementIntent,
        contents: &[MessageContent],
    ) -> OutreachResult<Campaign> {
        if contact_ids.len() != contents.len() {
            return Err(OutreachError::validation(
                "contacts and contents must have the same length",
            ));
        }

        // Destination validation pass: drop, don't fail.
        let mut survivors: Vec<(Contact, String, MessageContent)> = Vec::new();
        for (contact_id, content) in contact_ids.iter().zip(contents) {
            let contact: Option<Contact> =
                self.store.get(&Self::contact_key(user_id, *contact_id))?;
            let Some(contact) = contact else {
                warn!(contact_id = %contact_id, "Dropping unknown contact from campaign");
                metrics::counter!("outreach.campaigns.contacts_dropped").increment(1);
                continue;
            };
            match contact.destination_for(channel) {
                Some(dest) => {
                    let dest = dest.to_string();
                    survivors.push((contact, dest, content.clone()));
                }
                None => {
                    warn!(
                        contact_id = %contact_id,
                        channel = channel.display_name(),
                        "Dropping contact without required destination"
                    );
                    metrics::counter!("outreach.campaigns.contacts_dropped").increment(1);
                }
            }
        }

        if survivors.is_empty() {
            return Err(OutreachError::validation(format!(
                "no contacts with a valid {} destination",
                channel.display_name()
            )));
        }

        let campaign_id = Uuid::new_v4();
        let mut records = Vec::new();
        let mut last_dispatch_err = None;

        for (contact, destination, content) in survivors {
            let dispatched = match channel {
                Channel::Email => {
                    self.email
                        .send(&destination, &content.subject, &content.body)
                        .await
                }
                Channel::Sms => self.sms.send(&destination, &content.body).await,
            };

            match dispatched {
                Ok(provider_message_id) => {
                    records.push(ContactSendRecord {
                        contact_id: contact.id,
                        name: contact.full_name(),
                        destination,
                        subject: content.subject,
                        body: content.body,
                        status: SendStatus::Sent,
                        sent_at: self.store.server_time(),
                        provider_message_id,
                        outcome: None,
                        outcome_marked_at: None,
                        outcome_locked: false,
                        outcome_locked_at: None,
                    });
                    contacts::append_send_activity(
                        &self.store,
                        user_id,
                        contact.id,
                        &format!("{} sent for campaign \"{}\"", channel.display_name(), name),
                    );
                }
                Err(e) => {
                    warn!(
                        contact_id = %contact.id,
                        error = %e,
                        "Dispatch failed, committed records are kept"
                    );
                    metrics::counter!("outreach.campaigns.dispatch_failures").increment(1);
                    last_dispatch_err = Some(e);
                }
            }
        }

        // A campaign never exists with zero send records.
        if records.is_empty() {
            return Err(match last_dispatch_err {
                Some(e) => e,
                None => OutreachError::fatal("dispatch", "no records committed"),
            });
        }

        let campaign = Campaign {
            id: campaign_id,
            name: name.to_string(),
            channel,
            engagement_intent: intent,
            parent_campaign_id: None,
            contacts: records,
            created_at: self.store.server_time(),
            user_id: user_id.to_string(),
        };
        self.store
            .put(Self::campaign_key(user_id, campaign_id), &campaign)?;

        metrics::counter!(
            "outreach.campaigns.created",
            "channel" => channel.display_name()
        )
        .increment(1);
        info!(
            campaign_id = %campaign_id,
            entries = campaign.contacts.len(),
            "Campaign committed"
        );

        Ok(campaign)
    }

    pub fn get(&self, user_id: &str, campaign_id: Uuid) -> OutreachResult<Campaign> {
        self.store
            .get_required(&Self::campaign_key(user_id, campaign_id))
    }

    /// All campaigns for a user, newest-first.
    pub fn list(&self, user_id: &str) -> OutreachResult<Vec<Campaign>> {
        let mut campaigns: Vec<Campaign> = self.store.list(user_id, Collection::Campaigns)?;
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(campaigns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{ContactDirectory, NewContact};
    use async_trait::async_trait;
    use outreach_core::types::ActivityType;
    use std::sync::Mutex;

    /// Email mock that fails for configured destinations.
    struct MockEmail {
        fail_for: Vec<String>,
        sent: Mutex<Vec<String>>,
    }

    impl MockEmail {
        fn ok() -> Self {
            Self {
                fail_for: Vec::new(),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing_for(dest: &str) -> Self {
            Self {
                fail_for: vec![dest.to_string()],
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EmailDispatcher for MockEmail {
        async fn send(&self, to: &str, _subject: &str, _body: &str) -> OutreachResult<String> {
            if self.fail_for.iter().any(|d| d == to) {
                return Err(OutreachError::retriable("sendgrid", "simulated timeout"));
            }
            self.sent.lock().unwrap().push(to.to_string());
            Ok(format!("sg-{}", self.sent.lock().unwrap().len()))
        }
    }

    struct MockSms;

    #[async_trait]
    impl SmsDispatcher for MockSms {
        async fn send(&self, _to_phone: &str, _body: &str) -> OutreachResult<String> {
            Ok("SMtest".to_string())
        }
    }

    struct Fixture {
        store: Arc<DocumentStore>,
        directory: ContactDirectory,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(DocumentStore::new());
            Self {
                directory: ContactDirectory::new(store.clone()),
                store: store.clone(),
            }
        }

        fn ledger(&self, email: MockEmail) -> CampaignLedger {
            CampaignLedger::new(self.store.clone(), Arc::new(email), Arc::new(MockSms))
        }

        fn contact(&self, first: &str, email: Option<&str>, phone: Option<&str>) -> Uuid {
            self.directory
                .create(
                    "user-1",
                    NewContact {
                        first_name: first.into(),
                        last_name: "Test".into(),
                        title: String::new(),
                        company: "Acme".into(),
                        phone: phone.map(String::from),
                        email: email.map(String::from),
                    },
                )
                .unwrap()
                .id
        }
    }

    fn contents(n: usize) -> Vec<MessageContent> {
        (0..n)
            .map(|i| MessageContent {
                subject: format!("subject {i}"),
                body: format!("body {i}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_contacts_without_destination_are_dropped() {
        let fx = Fixture::new();
        let with_email = fx.contact("Ada", Some("a@x.com"), None);
        let phone_only = fx.contact("Bob", None, Some("+15550100"));
        let ledger = fx.ledger(MockEmail::ok());

        let campaign = ledger
            .create(
                "user-1",
                "Q3 push",
                &[with_email, phone_only],
                Channel::Email,
                EngagementIntent::Cold,
                &contents(2),
            )
            .await
            .unwrap();

        assert_eq!(campaign.contacts.len(), 1);
        assert_eq!(campaign.contacts[0].contact_id, with_email);
        assert_eq!(campaign.contacts[0].status, SendStatus::Sent);
        assert!(campaign.parent_campaign_id.is_none());
    }

    #[tokio::test]
    async fn test_zero_survivors_is_validation_error() {
        let fx = Fixture::new();
        let phone_only = fx.contact("Bob", None, Some("+15550100"));
        let ledger = fx.ledger(MockEmail::ok());

        let err = ledger
            .create(
                "user-1",
                "Q3 push",
                &[phone_only, Uuid::new_v4()],
                Channel::Email,
                EngagementIntent::Cold,
                &contents(2),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OutreachError::Validation(_)));
        assert!(ledger.list("user-1").unwrap().is_empty(), "nothing persisted");
    }

    #[tokio::test]
    async fn test_dispatch_failure_keeps_other_commits() {
        let fx = Fixture::new();
        let ada = fx.contact("Ada", Some("a@x.com"), None);
        let bob = fx.contact("Bob", Some("b@x.com"), None);
        let ledger = fx.ledger(MockEmail::failing_for("b@x.com"));

        let campaign = ledger
            .create(
                "user-1",
                "Q3 push",
                &[ada, bob],
                Channel::Email,
                EngagementIntent::Warm,
                &contents(2),
            )
            .await
            .unwrap();

        assert_eq!(campaign.contacts.len(), 1);
        assert_eq!(campaign.contacts[0].contact_id, ada);

        let stored = ledger.get("user-1", campaign.id).unwrap();
        assert_eq!(stored.contacts.len(), 1);
    }

    #[tokio::test]
    async fn test_all_dispatches_failing_creates_nothing() {
        let fx = Fixture::new();
        let ada = fx.contact("Ada", Some("a@x.com"), None);
        let ledger = fx.ledger(MockEmail::failing_for("a@x.com"));

        let err = ledger
            .create(
                "user-1",
                "Q3 push",
                &[ada],
                Channel::Email,
                EngagementIntent::Cold,
                &contents(1),
            )
            .await
            .unwrap_err();

        assert!(err.is_retriable());
        assert!(ledger.list("user-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_appends_activity() {
        let fx = Fixture::new();
        let ada = fx.contact("Ada", Some("a@x.com"), None);
        let ledger = fx.ledger(MockEmail::ok());

        ledger
            .create(
                "user-1",
                "Q3 push",
                &[ada],
                Channel::Email,
                EngagementIntent::Cold,
                &contents(1),
            )
            .await
            .unwrap();

        let feed = fx.directory.activities("user-1", ada).unwrap();
        assert_eq!(feed[0].activity_type, ActivityType::EmailSent);
    }

    #[tokio::test]
    async fn test_mismatched_lengths_rejected() {
        let fx = Fixture::new();
        let ada = fx.contact("Ada", Some("a@x.com"), None);
        let ledger = fx.ledger(MockEmail::ok());

        let err = ledger
            .create(
                "user-1",
                "Q3 push",
                &[ada],
                Channel::Email,
                EngagementIntent::Cold,
                &contents(2),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OutreachError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sms_campaign_uses_phone_destination() {
        let fx = Fixture::new();
        let bob = fx.contact("Bob", None, Some("+15550100"));
        let ledger = fx.ledger(MockEmail::ok());

        let campaign = ledger
            .create(
                "user-1",
                "SMS blast",
                &[bob],
                Channel::Sms,
                EngagementIntent::Hot,
                &contents(1),
            )
            .await
            .unwrap();

        assert_eq!(campaign.contacts[0].destination, "+15550100");
        assert_eq!(campaign.contacts[0].provider_message_id, "SMtest");
    }
}
