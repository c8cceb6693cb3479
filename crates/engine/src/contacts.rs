//! Contact directory with append-only activity history.
//!
//! Every mutation appends an Activity rather than rewriting history: note
//! deletion removes the note from the working set but the log keeps both
//! the addition and the deletion.

use chrono::Utc;
use outreach_core::types::{Activity, ActivityType, Contact, Note};
use outreach_core::{OutreachError, OutreachResult};
use outreach_store::{Collection, DocKey, DocumentStore};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Best-effort append of an email_sent activity after a dispatch commit.
/// The send record is already committed at that point; a failed activity
/// write is logged, not propagated.
pub(crate) fn append_send_activity(
    store: &DocumentStore,
    user_id: &str,
    contact_id: Uuid,
    details: &str,
) {
    let key = DocKey::new(user_id, Collection::Contacts, contact_id.to_string());
    let result = store.transact::<Contact, _, _>(&key, |contact| {
        contact.append_activity(ActivityType::EmailSent, details);
        Ok(())
    });
    if let Err(e) = result {
        warn!(contact_id = %contact_id, error = %e, "Failed to append send activity");
    }
}

/// Request shape for contact creation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewContact {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub struct ContactDirectory {
    store: Arc<DocumentStore>,
}

impl ContactDirectory {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    fn key(user_id: &str, contact_id: Uuid) -> DocKey {
        DocKey::new(user_id, Collection::Contacts, contact_id.to_string())
    }

    pub fn create(&self, user_id: &str, req: NewContact) -> OutreachResult<Contact> {
        if req.first_name.trim().is_empty() {
            return Err(OutreachError::validation("first_name must not be empty"));
        }

        let mut contact = Contact {
            id: Uuid::new_v4(),
            first_name: req.first_name,
            last_name: req.last_name,
            title: req.title,
            company: req.company,
            phone: req.phone,
            email: req.email,
            notes: Vec::new(),
            activity_log: Vec::new(),
            created_at: self.store.server_time(),
        };
        contact.append_activity(ActivityType::ContactCreated, contact.full_name());

        self.store.put(Self::key(user_id, contact.id), &contact)?;
        metrics::counter!("outreach.contacts.created").increment(1);
        info!(contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    pub fn get(&self, user_id: &str, contact_id: Uuid) -> OutreachResult<Contact> {
        self.store.get_required(&Self::key(user_id, contact_id))
    }

    /// Fetch a contact and record the profile view in its activity log.
    pub fn view_profile(&self, user_id: &str, contact_id: Uuid) -> OutreachResult<Contact> {
        self.store
            .transact::<Contact, _, _>(&Self::key(user_id, contact_id), |contact| {
                contact.append_activity(ActivityType::ProfileViewed, "profile viewed");
                Ok(contact.clone())
            })
    }

    /// All contacts for a user, newest-first.
    pub fn list(&self, user_id: &str) -> OutreachResult<Vec<Contact>> {
        let mut contacts: Vec<Contact> = self.store.list(user_id, Collection::Contacts)?;
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contacts)
    }

    pub fn add_note(&self, user_id: &str, contact_id: Uuid, body: &str) -> OutreachResult<Note> {
        if body.trim().is_empty() {
            return Err(OutreachError::validation("note body must not be empty"));
        }
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        let stored = note.clone();
        self.store
            .transact::<Contact, _, _>(&Self::key(user_id, contact_id), move |contact| {
                contact.notes.push(stored.clone());
                contact.append_activity(ActivityType::NoteAdded, "note added");
                Ok(())
            })?;
        Ok(note)
    }

    pub fn edit_note(
        &self,
        user_id: &str,
        contact_id: Uuid,
        note_id: Uuid,
        body: &str,
    ) -> OutreachResult<Note> {
        if body.trim().is_empty() {
            return Err(OutreachError::validation("note body must not be empty"));
        }
        self.store
            .transact::<Contact, _, _>(&Self::key(user_id, contact_id), |contact| {
                let note = contact
                    .notes
                    .iter_mut()
                    .find(|n| n.id == note_id)
                    .ok_or_else(|| OutreachError::not_found("note", note_id.to_string()))?;
                note.body = body.to_string();
                note.updated_at = Utc::now();
                let updated = note.clone();
                contact.append_activity(ActivityType::NoteEdited, "note edited");
                Ok(updated)
            })
    }

    /// Remove a note from the working set. History is preserved: the
    /// activity log gains a `note_deleted` entry instead of losing one.
    pub fn delete_note(&self, user_id: &str, contact_id: Uuid, note_id: Uuid) -> OutreachResult<()> {
        self.store
            .transact::<Contact, _, _>(&Self::key(user_id, contact_id), |contact| {
                let before = contact.notes.len();
                contact.notes.retain(|n| n.id != note_id);
                if contact.notes.len() == before {
                    return Err(OutreachError::not_found("note", note_id.to_string()));
                }
                contact.append_activity(ActivityType::NoteDeleted, "note deleted");
                Ok(())
            })
    }

    pub fn record_enrichment(
        &self,
        user_id: &str,
        contact_id: Uuid,
        details: &str,
    ) -> OutreachResult<()> {
        self.store
            .transact::<Contact, _, _>(&Self::key(user_id, contact_id), |contact| {
                contact.append_activity(ActivityType::Enriched, details);
                Ok(())
            })?;
        metrics::counter!("outreach.contacts.enriched").increment(1);
        Ok(())
    }

    /// Activity feed, newest-first. Entries are stored in insertion order
    /// and reversed at read time.
    pub fn activities(&self, user_id: &str, contact_id: Uuid) -> OutreachResult<Vec<Activity>> {
        let contact = self.get(user_id, contact_id)?;
        Ok(contact.activity_log.into_iter().rev().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::types::ActivityType;

    fn directory() -> ContactDirectory {
        ContactDirectory::new(Arc::new(DocumentStore::new()))
    }

    fn new_contact(first: &str) -> NewContact {
        NewContact {
            first_name: first.into(),
            last_name: "Lovelace".into(),
            title: "VP Engineering".into(),
            company: "Analytical Engines".into(),
            phone: None,
            email: Some("ada@example.com".into()),
        }
    }

    #[test]
    fn test_create_appends_created_activity() {
        let dir = directory();
        let contact = dir.create("user-1", new_contact("Ada")).unwrap();
        assert_eq!(contact.activity_log.len(), 1);
        assert_eq!(
            contact.activity_log[0].activity_type,
            ActivityType::ContactCreated
        );
    }

    #[test]
    fn test_create_requires_first_name() {
        let dir = directory();
        let err = dir.create("user-1", new_contact("  ")).unwrap_err();
        assert!(matches!(err, OutreachError::Validation(_)));
    }

    #[test]
    fn test_note_lifecycle_preserves_history() {
        let dir = directory();
        let contact = dir.create("user-1", new_contact("Ada")).unwrap();

        let note = dir.add_note("user-1", contact.id, "met at RustConf").unwrap();
        dir.edit_note("user-1", contact.id, note.id, "met at RustConf 2025")
            .unwrap();
        dir.delete_note("user-1", contact.id, note.id).unwrap();

        let stored = dir.get("user-1", contact.id).unwrap();
        assert!(stored.notes.is_empty(), "note removed from working set");

        let types: Vec<ActivityType> = stored
            .activity_log
            .iter()
            .map(|a| a.activity_type)
            .collect();
        assert_eq!(
            types,
            vec![
                ActivityType::ContactCreated,
                ActivityType::NoteAdded,
                ActivityType::NoteEdited,
                ActivityType::NoteDeleted,
            ],
            "history keeps every event in insertion order"
        );
    }

    #[test]
    fn test_delete_missing_note_is_not_found() {
        let dir = directory();
        let contact = dir.create("user-1", new_contact("Ada")).unwrap();
        let err = dir
            .delete_note("user-1", contact.id, Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, OutreachError::NotFound { .. }));
    }

    #[test]
    fn test_activities_newest_first() {
        let dir = directory();
        let contact = dir.create("user-1", new_contact("Ada")).unwrap();
        dir.add_note("user-1", contact.id, "first").unwrap();
        dir.record_enrichment("user-1", contact.id, "title confirmed via LinkedIn")
            .unwrap();

        let feed = dir.activities("user-1", contact.id).unwrap();
        assert_eq!(feed[0].activity_type, ActivityType::Enriched);
        assert_eq!(
            feed.last().unwrap().activity_type,
            ActivityType::ContactCreated
        );
    }

    #[test]
    fn test_view_profile_records_activity() {
        let dir = directory();
        let contact = dir.create("user-1", new_contact("Ada")).unwrap();
        dir.view_profile("user-1", contact.id).unwrap();

        let feed = dir.activities("user-1", contact.id).unwrap();
        assert_eq!(feed[0].activity_type, ActivityType::ProfileViewed);
    }

    #[test]
    fn test_list_scoped_per_user() {
        let dir = directory();
        dir.create("user-1", new_contact("Ada")).unwrap();
        dir.create("user-2", new_contact("Grace")).unwrap();

        assert_eq!(dir.list("user-1").unwrap().len(), 1);
        assert_eq!(dir.list("user-2").unwrap().len(), 1);
    }
}
