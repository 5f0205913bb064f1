//! Submission store
//!
//! Owns the in-memory collection and mirrors it to a backend after every
//! mutation. The collection loaded at open is the source of truth from then
//! on; nothing else writes the backend.
//!
//! Persistence failures are logged and absorbed: a failed load starts empty,
//! a failed write keeps the in-memory change.

use serde_json::{Map, Value};

use super::backend::SubmissionBackend;
use super::record::Submission;
use crate::observability::Event;

/// In-memory submission collection, newest first
pub struct SubmissionStore {
    backend: Box<dyn SubmissionBackend>,
    items: Vec<Submission>,
}

impl SubmissionStore {
    /// Opens the store, loading whatever the backend holds.
    pub fn open(backend: Box<dyn SubmissionBackend>) -> Self {
        let items = match backend.load() {
            Ok(items) => {
                tracing::info!(event = %Event::StoreLoaded, count = items.len(), "submissions loaded");
                items
            }
            Err(e) => {
                tracing::error!(event = %Event::StoreLoadFailed, error = %e, "starting with no submissions");
                Vec::new()
            }
        };

        Self { backend, items }
    }

    /// Stores a submission as the most recent entry.
    pub fn add(&mut self, submission: Submission) -> Submission {
        self.items.insert(0, submission.clone());
        self.persist();
        submission
    }

    /// Replaces the values of an existing submission.
    ///
    /// Returns `None` when the id is unknown.
    pub fn update(&mut self, id: &str, values: Map<String, Value>) -> Option<Submission> {
        let item = self.items.iter_mut().find(|s| s.id == id)?;
        item.values = values;
        let updated = item.clone();
        self.persist();
        Some(updated)
    }

    /// Removes a submission. Returns false when the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|s| s.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// All submissions, newest first
    pub fn list(&self) -> &[Submission] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Submission> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) {
        if let Err(e) = self.backend.persist(&self.items) {
            tracing::error!(event = %Event::StorePersistFailed, error = %e, "submission write dropped");
        }
    }
}
