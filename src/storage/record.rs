//! Submission record
//!
//! On disk and on the wire:
//!
//! ```text
//! {
//!   "id": "3f1c...",                     // UUID v4
//!   "createdAt": "2026-10-19T09:30:00.123Z",
//!   "values": { "<field id>": <json value>, ... }
//! }
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One validated, stored set of form values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Opaque unique identifier
    pub id: String,
    /// Creation time, millisecond precision
    pub created_at: DateTime<Utc>,
    /// Field id → submitted value
    pub values: Map<String, Value>,
}

impl Submission {
    /// Creates a submission with a fresh id, stamped now
    pub fn new(values: Map<String, Value>) -> Self {
        Self::with_timestamp(values, Utc::now())
    }

    /// Creates a submission with a fresh id and an explicit creation time
    pub fn with_timestamp(values: Map<String, Value>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: created_at.trunc_subsecs(3),
            values,
        }
    }

    /// First 8 characters of the id, as shown in tables and titles
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}
