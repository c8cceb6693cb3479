//! End-to-end flow through the engine with the development providers:
//! contacts → batch drafts → campaign send → outcome tracking → follow-up
//! chaining → terminal lock.

use outreach_core::config::{EmailConfig, GeneratorConfig, SmsConfig};
use outreach_core::types::{Channel, EngagementIntent, Outcome};
use outreach_core::OutreachError;
use outreach_channels::{PromptGenerator, SendGridDispatcher, TwilioDispatcher};
use outreach_engine::ledger::MessageContent;
use outreach_engine::{NewContact, OutreachEngine, SendFollowUpRequest};
use outreach_store::DocumentStore;
use std::sync::Arc;

const USER: &str = "user-flow";

fn engine() -> OutreachEngine {
    let store = Arc::new(DocumentStore::new());
    OutreachEngine::new(
        store,
        Arc::new(PromptGenerator::new(GeneratorConfig::default())),
        Arc::new(SendGridDispatcher::new(EmailConfig::default())),
        Arc::new(TwilioDispatcher::new(SmsConfig::default())),
    )
}

#[tokio::test]
async fn full_outreach_cycle() {
    let engine = engine();

    let ada = engine
        .contacts
        .create(
            USER,
            NewContact {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                title: "VP Engineering".into(),
                company: "Analytical Engines".into(),
                phone: None,
                email: Some("ada@example.com".into()),
            },
        )
        .unwrap();
    let bob = engine
        .contacts
        .create(
            USER,
            NewContact {
                first_name: "Bob".into(),
                last_name: "Babbage".into(),
                title: "Founder".into(),
                company: "Difference Co".into(),
                phone: Some("+15550100".into()),
                email: None,
            },
        )
        .unwrap();

    // Batch drafting drops the phone-only contact for email text.
    let drafts = engine
        .drafts
        .generate_batch(
            USER,
            &[ada.id, bob.id],
            EngagementIntent::Cold,
            Channel::Email,
        )
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].contact_id, ada.id);

    // Campaign creation drops the same contact; partial success, not fatal.
    let contents = vec![
        MessageContent {
            subject: "Quick question".into(),
            body: drafts[0].body.clone(),
        },
        MessageContent {
            subject: "Quick question".into(),
            body: "unused".into(),
        },
    ];
    let campaign = engine
        .ledger
        .create(
            USER,
            "Cold Q3",
            &[ada.id, bob.id],
            Channel::Email,
            EngagementIntent::Cold,
            &contents,
        )
        .await
        .unwrap();
    assert_eq!(campaign.contacts.len(), 1);
    assert!(campaign.contacts[0].provider_message_id.starts_with("sg-"));

    // Non-terminal outcomes allow reclassification.
    engine
        .outcomes
        .set_outcome(USER, campaign.id, 0, Outcome::NoResponse)
        .unwrap();
    let replied = engine
        .outcomes
        .set_outcome(USER, campaign.id, 0, Outcome::Replied)
        .unwrap();
    assert!(!replied.outcome_locked);

    // Draft and send the follow-up; the new campaign chains to the old one.
    let draft = engine
        .followups
        .draft_follow_up(
            USER,
            ada.id,
            campaign.id,
            Outcome::Replied,
            &campaign.contacts[0].body,
        )
        .await
        .unwrap();
    assert!(!draft.is_empty());

    let followup = engine
        .followups
        .send_follow_up(
            USER,
            SendFollowUpRequest {
                contact_id: ada.id,
                original_campaign_id: campaign.id,
                subject: "Re: Quick question".into(),
                body: draft,
                to_email: "ada@example.com".into(),
                to_name: "Ada Lovelace".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(followup.parent_campaign_id, Some(campaign.id));
    assert_eq!(followup.contacts.len(), 1);
    assert_eq!(followup.engagement_intent, EngagementIntent::Followup);

    // Terminal outcome locks the entry; later writes surface Conflict.
    engine
        .outcomes
        .set_outcome(USER, followup.id, 0, Outcome::MeetingBooked)
        .unwrap();
    let err = engine
        .outcomes
        .set_outcome(USER, followup.id, 0, Outcome::Replied)
        .unwrap_err();
    assert!(matches!(err, OutreachError::Conflict(_)));

    // Both campaigns listed newest-first.
    let campaigns = engine.ledger.list(USER).unwrap();
    assert_eq!(campaigns.len(), 2);

    // The contact's feed recorded the whole journey.
    let feed = engine.contacts.activities(USER, ada.id).unwrap();
    assert!(feed.len() >= 4, "created, drafted, sent, follow-up sent");
}

#[tokio::test]
async fn zero_survivor_campaign_is_rejected() {
    let engine = engine();
    let bob = engine
        .contacts
        .create(
            USER,
            NewContact {
                first_name: "Bob".into(),
                last_name: "Babbage".into(),
                title: String::new(),
                company: String::new(),
                phone: Some("+15550100".into()),
                email: None,
            },
        )
        .unwrap();

    let err = engine
        .ledger
        .create(
            USER,
            "Doomed",
            &[bob.id],
            Channel::Email,
            EngagementIntent::Cold,
            &[MessageContent {
                subject: "s".into(),
                body: "b".into(),
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OutreachError::Validation(_)));
    assert!(engine.ledger.list(USER).unwrap().is_empty());
}
