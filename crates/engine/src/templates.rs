//! Template store: explicit save, owner-scoped idempotent delete.
//! Update is intentionally absent; templates are replaced, not edited.

use outreach_core::types::Template;
use outreach_core::{OutreachError, OutreachResult};
use outreach_store::{Collection, DocKey, DocumentStore};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

/// Request shape for template save.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TemplateDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub intent: String,
}

pub struct TemplateStore {
    store: Arc<DocumentStore>,
}

impl TemplateStore {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    fn key(user_id: &str, template_id: Uuid) -> DocKey {
        DocKey::new(user_id, Collection::Templates, template_id.to_string())
    }

    /// Save a template. Every required field must be non-empty; the error
    /// lists all missing fields at once so the user fixes one round trip.
    pub fn save(&self, user_id: &str, draft: TemplateDraft) -> OutreachResult<Template> {
        let mut missing = Vec::new();
        if draft.name.trim().is_empty() {
            missing.push("name");
        }
        if draft.subject.trim().is_empty() {
            missing.push("subject");
        }
        if draft.body.trim().is_empty() {
            missing.push("body");
        }
        if draft.intent.trim().is_empty() {
            missing.push("intent");
        }
        if !missing.is_empty() {
            return Err(OutreachError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let now = self.store.server_time();
        let template = Template {
            id: Uuid::new_v4(),
            name: draft.name,
            subject: draft.subject,
            body: draft.body,
            intent: draft.intent,
            created_at: now,
            updated_at: now,
        };

        self.store.put(Self::key(user_id, template.id), &template)?;
        metrics::counter!("outreach.templates.saved").increment(1);
        info!(template_id = %template.id, name = %template.name, "Template saved");
        Ok(template)
    }

    pub fn get(&self, user_id: &str, template_id: Uuid) -> OutreachResult<Template> {
        self.store.get_required(&Self::key(user_id, template_id))
    }

    /// All templates for a user, newest-first.
    pub fn list(&self, user_id: &str) -> OutreachResult<Vec<Template>> {
        let mut templates: Vec<Template> = self.store.list(user_id, Collection::Templates)?;
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    /// Idempotent delete scoped to the caller's own key space. Deleting a
    /// template that does not exist is a no-op, not an error.
    pub fn delete(&self, user_id: &str, template_id: Uuid) {
        let removed = self.store.delete(&Self::key(user_id, template_id));
        if removed {
            metrics::counter!("outreach.templates.deleted").increment(1);
            info!(template_id = %template_id, "Template deleted");
        }
    }
}
