/// Top-level document collections. A closed enum so a new collection is a
/// compile-time-visible change, not a stray string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Contacts,
    Campaigns,
    Templates,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Contacts => "contacts",
            Collection::Campaigns => "campaigns",
            Collection::Templates => "templates",
        }
    }

    /// Singular entity name used in NotFound errors.
    pub fn entity(&self) -> &'static str {
        match self {
            Collection::Contacts => "contact",
            Collection::Campaigns => "campaign",
            Collection::Templates => "template",
        }
    }
}

/// Composite document key. Every document belongs to exactly one user;
/// scoping a read or delete to the caller's own records is a matter of
/// constructing the key, so cross-tenant access cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocKey {
    pub user_id: String,
    pub collection: Collection,
    pub doc_id: String,
}

impl DocKey {
    pub fn new(
        user_id: impl Into<String>,
        collection: Collection,
        doc_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            collection,
            doc_id: doc_id.into(),
        }
    }

    /// Path rendering for logs only; never parsed back.
    pub fn path(&self) -> String {
        format!(
            "users/{}/{}/{}",
            self.user_id,
            self.collection.as_str(),
            self.doc_id
        )
    }
}

impl std::fmt::Display for DocKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
