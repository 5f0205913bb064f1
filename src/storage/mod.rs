//! Submission storage subsystem
//!
//! The store owns the collection; a backend mirrors it as one JSON document.
//!
//! # Invariants
//!
//! - Newest submission first
//! - The whole collection is written on every mutation
//! - Single writer process; concurrent writers are not coordinated
//! - Persistence failures degrade to stale or empty data, never to errors

mod backend;
mod errors;
mod record;
mod store;

pub use backend::{JsonFileBackend, MemoryBackend, SubmissionBackend, SUBMISSIONS_FILE};
pub use errors::{PersistenceError, PersistenceResult};
pub use record::Submission;
pub use store::SubmissionStore;
