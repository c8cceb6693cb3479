//! Batch draft generation.
//!
//! Unresolvable contacts (missing, or lacking the destination the text
//! type needs) are skipped silently and the rest of the batch proceeds.
//! A content-generation failure is different: it aborts the whole call.
//! That asymmetry is deliberate — a missing contact is the caller's data
//! problem, a generator failure means every remaining draft would fail the
//! same way.

use crate::policy;
use outreach_core::types::{ActivityType, Channel, Contact, EngagementIntent};
use outreach_core::OutreachResult;
use outreach_channels::ContentGenerator;
use outreach_store::{Collection, DocKey, DocumentStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

/// Generator length caps per text type. SMS copy is asked for short; the
/// core itself never truncates after the fact.
const EMAIL_DRAFT_MAX_CHARS: usize = 1200;
const SMS_DRAFT_MAX_CHARS: usize = 300;

/// One generated draft, ready for review before sending.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactDraft {
    pub contact_id: Uuid,
    pub name: String,
    pub destination: String,
    /// Present for email drafts, absent for SMS.
    pub subject: Option<String>,
    pub body: String,
}

pub struct BatchDrafter {
    store: Arc<DocumentStore>,
    generator: Arc<dyn ContentGenerator>,
}

impl BatchDrafter {
    pub fn new(store: Arc<DocumentStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { store, generator }
    }

    fn contact_key(user_id: &str, contact_id: Uuid) -> DocKey {
        DocKey::new(user_id, Collection::Contacts, contact_id.to_string())
    }

    pub async fn generate_batch(
        &self,
        user_id: &str,
        contact_ids: &[Uuid],
        intent: EngagementIntent,
        text_type: Channel,
    ) -> OutreachResult<Vec<ContactDraft>> {
        let tone = policy::tone_for_intent(intent);
        let max_chars = match text_type {
            Channel::Email => EMAIL_DRAFT_MAX_CHARS,
            Channel::Sms => SMS_DRAFT_MAX_CHARS,
        };

        let mut drafts = Vec::new();
        for contact_id in contact_ids {
            let contact: Option<Contact> =
                self.store.get(&Self::contact_key(user_id, *contact_id))?;
            let Some(contact) = contact else {
                debug!(contact_id = %contact_id, "Skipping unknown contact in batch draft");
                metrics::counter!("outreach.drafts.skipped").increment(1);
                continue;
            };
            let Some(destination) = contact.destination_for(text_type) else {
                debug!(
                    contact_id = %contact_id,
                    text_type = text_type.display_name(),
                    "Skipping contact without required destination"
                );
                metrics::counter!("outreach.drafts.skipped").increment(1);
                continue;
            };
            let destination = destination.to_string();

            let prompt = format!(
                "You are drafting a {} message for B2B outreach.\n\
                 Recipient: {} ({} at {})\n\
                 Engagement intent: {}\n\
                 Tone: {}\n\
                 Write the {} body:",
                text_type.display_name(),
                contact.full_name(),
                contact.title,
                contact.company,
                intent.as_str(),
                tone,
                text_type.display_name(),
            );

            // No per-item isolation: a generator failure aborts the batch.
            let body = self.generator.generate(&prompt, max_chars).await?;

            let subject = match text_type {
                Channel::Email => Some(policy::subject_for_intent(intent, &contact.company)),
                Channel::Sms => None,
            };

            self.store
                .transact::<Contact, _, _>(&Self::contact_key(user_id, contact.id), |c| {
                    c.append_activity(
                        ActivityType::EmailDrafted,
                        format!("{} draft generated", text_type.display_name()),
                    );
                    Ok(())
                })?;

            drafts.push(ContactDraft {
                contact_id: contact.id,
                name: contact.full_name(),
                destination,
                subject,
                body,
            });
        }

        metrics::counter!("outreach.drafts.generated").increment(drafts.len() as u64);
        info!(
            requested = contact_ids.len(),
            drafted = drafts.len(),
            "Batch draft generation complete"
        );
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{ContactDirectory, NewContact};
    use async_trait::async_trait;
    use outreach_core::OutreachError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockGenerator {
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    impl MockGenerator {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on_call: Some(call),
            }
        }
    }

    #[async_trait]
    impl ContentGenerator for MockGenerator {
        async fn generate(&self, prompt: &str, _max_length: usize) -> OutreachResult<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_call == Some(call) {
                return Err(OutreachError::retriable("generator", "simulated timeout"));
            }
            Ok(format!("draft for: {}", prompt.lines().nth(1).unwrap_or("")))
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
                store,
            }
        }

        fn drafter(&self, generator: MockGenerator) -> BatchDrafter {
            BatchDrafter::new(self.store.clone(), Arc::new(generator))
        }

        fn contact(&self, first: &str, email: Option<&str>, phone: Option<&str>) -> Uuid {
            self.directory
                .create(
                    "user-1",
                    NewContact {
                        first_name: first.into(),
                        last_name: "Test".into(),
                        title: "CTO".into(),
                        company: "Acme".into(),
                        phone: phone.map(String::from),
                        email: email.map(String::from),
                    },
                )
                .unwrap()
                .id
        }
    }

    #[tokio::test]
    async fn test_contact_without_destination_is_skipped() {
        let fx = Fixture::new();
        let a = fx.contact("Ada", Some("a@x.com"), None);
        let b = fx.contact("Bob", None, Some("+15550100"));
        let drafter = fx.drafter(MockGenerator::ok());

        let drafts = drafter
            .generate_batch(
                "user-1",
                &[a, b],
                EngagementIntent::Cold,
                Channel::Email,
            )
            .await
            .unwrap();

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].contact_id, a);
        assert!(drafts[0].subject.is_some());
    }

    #[tokio::test]
    async fn test_missing_contact_is_skipped() {
        let fx = Fixture::new();
        let a = fx.contact("Ada", Some("a@x.com"), None);
        let drafter = fx.drafter(MockGenerator::ok());

        let drafts = drafter
            .generate_batch(
                "user-1",
                &[Uuid::new_v4(), a],
                EngagementIntent::Warm,
                Channel::Email,
            )
            .await
            .unwrap();
        assert_eq!(drafts.len(), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_aborts_batch() {
        let fx = Fixture::new();
        let a = fx.contact("Ada", Some("a@x.com"), None);
        let b = fx.contact("Bob", Some("b@x.com"), None);
        let drafter = fx.drafter(MockGenerator::failing_on(1));

        let err = drafter
            .generate_batch(
                "user-1",
                &[a, b],
                EngagementIntent::Cold,
                Channel::Email,
            )
            .await
            .unwrap_err();
        assert!(err.is_retriable());
    }

    #[tokio::test]
    async fn test_sms_drafts_have_no_subject() {
        let fx = Fixture::new();
        let b = fx.contact("Bob", None, Some("+15550100"));
        let drafter = fx.drafter(MockGenerator::ok());

        let drafts = drafter
            .generate_batch("user-1", &[b], EngagementIntent::Hot, Channel::Sms)
            .await
            .unwrap();
        assert_eq!(drafts.len(), 1);
        assert!(drafts[0].subject.is_none());
        assert_eq!(drafts[0].destination, "+15550100");
    }

    #[tokio::test]
    async fn test_drafting_appends_activity() {
        let fx = Fixture::new();
        let a = fx.contact("Ada", Some("a@x.com"), None);
        let drafter = fx.drafter(MockGenerator::ok());

        drafter
            .generate_batch("user-1", &[a], EngagementIntent::Cold, Channel::Email)
            .await
            .unwrap();

        let feed = fx.directory.activities("user-1", a).unwrap();
        assert_eq!(feed[0].activity_type, ActivityType::EmailDrafted);
    }
}
