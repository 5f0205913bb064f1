//! # Submission Service
//!
//! Validates values against the compiled form schema, then hands them to the
//! store. Validation always runs before any lookup or mutation, so an invalid
//! payload never changes stored data.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use super::errors::{ServiceError, ServiceResult};
use crate::observability::Event;
use crate::query::{self, ListPage, ListParams, SortOrder};
use crate::schema::{CompiledSchema, FormSchema, SchemaValidator, ValidationErrors};
use crate::storage::{Submission, SubmissionStore};

/// Create, read, update, delete and list submissions of one form
pub struct SubmissionService {
    compiled: Arc<CompiledSchema>,
    store: RwLock<SubmissionStore>,
}

impl SubmissionService {
    pub fn new(compiled: Arc<CompiledSchema>, store: SubmissionStore) -> Self {
        Self {
            compiled,
            store: RwLock::new(store),
        }
    }

    /// The active form schema
    pub fn schema(&self) -> &FormSchema {
        self.compiled.schema()
    }

    pub fn compiled(&self) -> &Arc<CompiledSchema> {
        &self.compiled
    }

    /// Runs the validator without touching the store
    pub fn validate(&self, values: &Map<String, Value>) -> ValidationErrors {
        SchemaValidator::new(&self.compiled).validate(values)
    }

    /// Validates and stores new values
    pub fn create(&self, values: Map<String, Value>) -> ServiceResult<Submission> {
        self.check(&values)?;

        let submission = self.write().add(Submission::new(values));
        tracing::info!(event = %Event::SubmissionCreated, id = %submission.id, "submission created");
        Ok(submission)
    }

    /// Validates and fully replaces the values of an existing submission
    pub fn update(&self, id: &str, values: Map<String, Value>) -> ServiceResult<Submission> {
        self.check(&values)?;

        let submission = self
            .write()
            .update(id, values)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        tracing::info!(event = %Event::SubmissionUpdated, id = %id, "submission updated");
        Ok(submission)
    }

    /// Removes a submission
    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        if !self.write().remove(id) {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        tracing::info!(event = %Event::SubmissionDeleted, id = %id, "submission deleted");
        Ok(())
    }

    pub fn get(&self, id: &str) -> ServiceResult<Submission> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// One page of the filtered, sorted collection
    pub fn list(&self, params: &ListParams) -> ListPage {
        query::list(self.read().list(), params)
    }

    /// Every matching submission, sorted, unpaginated
    pub fn matching(&self, search: Option<&str>, order: SortOrder) -> Vec<Submission> {
        let store = self.read();
        query::filter_and_sort(store.list(), search, order)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    fn check(&self, values: &Map<String, Value>) -> ServiceResult<()> {
        let errors = self.validate(values);
        if !errors.is_empty() {
            tracing::info!(
                event = %Event::SubmissionRejected,
                fields = errors.len(),
                "submission rejected"
            );
            return Err(ServiceError::Validation(errors));
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, SubmissionStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every mutation rewrites the store file while this guard is held.
    ///
    /// Handlers call the service inline on the async runtime, so the blocking
    /// rewrite runs on the request's worker thread, not on `spawn_blocking`.
    /// Single writer process only.
    fn write(&self) -> RwLockWriteGuard<'_, SubmissionStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}
