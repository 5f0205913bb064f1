//! Observable events
//!
//! Every log line carries one of these as its `event` field, so logs can be
//! filtered by what happened rather than by message text.

use std::fmt;

/// Observable events in dynaform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Form schema compiled
    SchemaLoaded,
    /// Listening for requests
    Serving,

    // Storage
    /// Submissions document loaded
    StoreLoaded,
    /// Submissions document unreadable; continuing empty
    StoreLoadFailed,
    /// Submissions document write dropped
    StorePersistFailed,

    // Submissions
    /// Submission stored
    SubmissionCreated,
    /// Submission values replaced
    SubmissionUpdated,
    /// Submission removed
    SubmissionDeleted,
    /// Submission rejected by the validator
    SubmissionRejected,

    // Requests
    /// Request failed with an unexpected error
    RequestFailed,
}

impl Event {
    /// Returns the event name as it appears in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::Serving => "SERVING",
            Event::StoreLoaded => "STORE_LOADED",
            Event::StoreLoadFailed => "STORE_LOAD_FAILED",
            Event::StorePersistFailed => "STORE_PERSIST_FAILED",
            Event::SubmissionCreated => "SUBMISSION_CREATED",
            Event::SubmissionUpdated => "SUBMISSION_UPDATED",
            Event::SubmissionDeleted => "SUBMISSION_DELETED",
            Event::SubmissionRejected => "SUBMISSION_REJECTED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Whether the event reports lost or degraded data
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Event::StoreLoadFailed | Event::StorePersistFailed | Event::RequestFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
