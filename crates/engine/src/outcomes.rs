//! Outcome tracking with terminal locking.
//!
//! Recording an outcome is a compare-and-set on the campaign document: the
//! lock check and the outcome write happen in one store transaction, so a
//! terminal outcome and its lock are never observable apart, and two racing
//! writers resolve to one success and one Conflict.

use outreach_core::types::{Campaign, ContactSendRecord, Outcome};
use outreach_core::{OutreachError, OutreachResult};
use outreach_store::{Collection, DocKey, DocumentStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct OutcomeTracker {
    store: Arc<DocumentStore>,
}

impl OutcomeTracker {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Record an outcome on one send entry. Non-terminal outcomes (replied,
    /// no_response) stay unlocked and may be reclassified later; terminal
    /// outcomes (meeting_booked, opportunity_created, unsubscribed) lock the
    /// entry in the same write. A locked entry always fails Conflict — the
    /// caller is told the outcome is already finalized, never silently
    /// ignored.
    pub fn set_outcome(
        &self,
        user_id: &str,
        campaign_id: Uuid,
        entry_index: usize,
        outcome: Outcome,
    ) -> OutreachResult<ContactSendRecord> {
        let key = DocKey::new(user_id, Collection::Campaigns, campaign_id.to_string());

        let updated = self
            .store
            .transact::<Campaign, _, _>(&key, |campaign| {
                let entry = campaign.contacts.get_mut(entry_index).ok_or_else(|| {
                    OutreachError::not_found(
                        "send entry",
                        format!("{campaign_id}[{entry_index}]"),
                    )
                })?;

                if entry.outcome_locked {
                    return Err(OutreachError::conflict("outcome already finalized"));
                }

                let now = Utc::now();
                entry.outcome = Some(outcome);
                entry.outcome_marked_at = Some(now);
                if outcome.is_terminal() {
                    entry.outcome_locked = true;
                    entry.outcome_locked_at = Some(now);
                }
                Ok(entry.clone())
            })?;

        metrics::counter!(
            "outreach.outcomes.recorded",
            "terminal" => if outcome.is_terminal() { "true" } else { "false" }
        )
        .increment(1);
        info!(
            campaign_id = %campaign_id,
            entry_index,
            outcome = ?outcome,
            locked = updated.outcome_locked,
            "Outcome recorded"
        );

        Ok(updated)
    }
}
