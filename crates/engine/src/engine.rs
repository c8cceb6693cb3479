//! Engine assembly. Components are constructed once here with their
//! collaborators and shared by reference — no ambient singletons.

use crate::contacts::ContactDirectory;
use crate::drafts::BatchDrafter;
use crate::followup::FollowUpOrchestrator;
use crate::ledger::CampaignLedger;
use crate::outcomes::OutcomeTracker;
use crate::templates::TemplateStore;
use outreach_channels::{ContentGenerator, EmailDispatcher, SmsDispatcher};
use outreach_store::DocumentStore;
use std::sync::Arc;
use tracing::info;

/// All engine components wired to one store and one set of collaborators.
pub struct OutreachEngine {
    pub contacts: ContactDirectory,
    pub templates: TemplateStore,
    pub ledger: CampaignLedger,
    pub outcomes: OutcomeTracker,
    pub followups: FollowUpOrchestrator,
    pub drafts: BatchDrafter,
}

impl OutreachEngine {
    pub fn new(
        store: Arc<DocumentStore>,
        generator: Arc<dyn ContentGenerator>,
        email: Arc<dyn EmailDispatcher>,
        sms: Arc<dyn SmsDispatcher>,
    ) -> Self {
        info!("Outreach engine initialized");
        Self {
            contacts: ContactDirectory::new(store.clone()),
            templates: TemplateStore::new(store.clone()),
            ledger: CampaignLedger::new(store.clone(), email.clone(), sms),
            outcomes: OutcomeTracker::new(store.clone()),
            followups: FollowUpOrchestrator::new(store.clone(), generator.clone(), email),
            drafts: BatchDrafter::new(store, generator),
        }
    }
}
