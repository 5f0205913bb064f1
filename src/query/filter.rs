//! # Search Filter
//!
//! Case-insensitive substring search over every value of a submission.

use serde_json::Value;

use crate::storage::Submission;

/// A lowercased search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_lowercase(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Check if any value of the submission contains the term
    pub fn matches(&self, submission: &Submission) -> bool {
        submission.values.values().any(|value| self.matches_value(value))
    }

    /// Arrays match element-wise; scalars through their string form
    pub fn matches_value(&self, value: &Value) -> bool {
        match value {
            Value::Array(items) => items
                .iter()
                .any(|item| scalar_text(item).to_lowercase().contains(&self.term)),
            other => scalar_text(other).to_lowercase().contains(&self.term),
        }
    }
}

/// String form of a value as the search sees it
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
