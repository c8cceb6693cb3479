//! In-memory document store backed by DashMap.
//!
//! `transact` holds the document's shard guard for the duration of the
//! closure, which serializes concurrent read-check-write cycles on the same
//! document: exactly one of two racing `set_outcome` calls commits, the
//! other re-reads the committed state and surfaces Conflict.

use crate::key::{Collection, DocKey};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use outreach_core::{OutreachError, OutreachResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Thread-safe document store keyed by (user id, collection, doc id).
pub struct DocumentStore {
    docs: DashMap<DocKey, serde_json::Value>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    /// Server-assigned timestamp for created_at/updated_at fields.
    pub fn server_time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Insert or overwrite a document.
    pub fn put<T: Serialize>(&self, key: DocKey, doc: &T) -> OutreachResult<()> {
        let value = serde_json::to_value(doc)?;
        debug!(key = %key, "Document written");
        self.docs.insert(key, value);
        Ok(())
    }

    /// Fetch a document, or None if absent.
    pub fn get<T: DeserializeOwned>(&self, key: &DocKey) -> OutreachResult<Option<T>> {
        match self.docs.get(key) {
            Some(entry) => Ok(Some(serde_json::from_value(entry.value().clone())?)),
            None => Ok(None),
        }
    }

    /// Fetch a document or fail NotFound with the collection's entity name.
    pub fn get_required<T: DeserializeOwned>(&self, key: &DocKey) -> OutreachResult<T> {
        self.get(key)?
            .ok_or_else(|| OutreachError::not_found(key.collection.entity(), key.doc_id.clone()))
    }

    /// Delete a document. Returns whether anything was removed; callers that
    /// want idempotent semantics simply ignore the flag.
    pub fn delete(&self, key: &DocKey) -> bool {
        let removed = self.docs.remove(key).is_some();
        debug!(key = %key, removed, "Document delete");
        removed
    }

    /// All documents of one user in one collection, in no particular order.
    pub fn list<T: DeserializeOwned>(
        &self,
        user_id: &str,
        collection: Collection,
    ) -> OutreachResult<Vec<T>> {
        let mut out = Vec::new();
        for entry in self.docs.iter() {
            let key = entry.key();
            if key.user_id == user_id && key.collection == collection {
                out.push(serde_json::from_value(entry.value().clone())?);
            }
        }
        Ok(out)
    }

    /// Per-document read-check-write transaction. The closure receives the
    /// deserialized document and may mutate it; on Ok the mutated document
    /// is written back in the same critical section, on Err nothing is
    /// committed. Fails NotFound if the document is absent. The closure
    /// must not re-enter the store (the entry shard is locked).
    pub fn transact<T, R, F>(&self, key: &DocKey, f: F) -> OutreachResult<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> OutreachResult<R>,
    {
        let mut entry = self
            .docs
            .get_mut(key)
            .ok_or_else(|| OutreachError::not_found(key.collection.entity(), key.doc_id.clone()))?;

        let mut doc: T = serde_json::from_value(entry.value().clone())?;
        let result = f(&mut doc)?;
        *entry.value_mut() = serde_json::to_value(&doc)?;
        debug!(key = %key, "Document transaction committed");
        Ok(result)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
