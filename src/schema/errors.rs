//! Schema error types
//!
//! Two families live here:
//! - `SchemaError`: the form schema itself is unusable (load or compile time)
//! - `Violation` / `ValidationErrors`: a submission breaks the schema

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Result type for schema loading and compilation
pub type SchemaResult<T> = Result<T, SchemaError>;

/// The form schema cannot be loaded or compiled
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file could not be read
    #[error("Failed to read schema file '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    /// Schema file is not a valid FormSchema document
    #[error("Malformed schema file '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// Schema structure is inconsistent (duplicate ids, missing options, ...)
    #[error("Invalid schema structure: {0}")]
    InvalidStructure(String),

    /// A regex constraint does not compile
    #[error("Field '{field}': invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },

    /// A minDate constraint is not a calendar date
    #[error("Field '{field}': invalid minDate '{value}'")]
    InvalidMinDate { field: String, value: String },
}

/// One failed constraint on one field.
///
/// The display text is the message shown to users, identical on the form and
/// in API error bodies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("This field is required.")]
    Required,

    #[error("This field is not allowed.")]
    NotAllowed,

    #[error("Enter a valid text value.")]
    InvalidText,

    #[error("Must be at least {0} characters.")]
    TooShort(usize),

    #[error("Must be at most {0} characters.")]
    TooLong(usize),

    #[error("Please match the required pattern.")]
    PatternMismatch,

    #[error("Enter a valid number.")]
    InvalidNumber,

    #[error("Must be at least {0}.")]
    BelowMin(f64),

    #[error("Must be at most {0}.")]
    AboveMax(f64),

    #[error("Choose a valid option.")]
    InvalidOption,

    #[error("Choose only the listed options.")]
    InvalidOptions,

    #[error("Pick at least {0} option(s).")]
    TooFewSelected(usize),

    #[error("Pick at most {0} option(s).")]
    TooManySelected(usize),

    #[error("Select a valid date.")]
    InvalidDate,

    #[error("Date cannot be before {0}.")]
    BeforeMinDate(String),

    #[error("Choose on or off.")]
    InvalidSwitch,
}

/// A failed field: its id and the first constraint it broke
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub violation: Violation,
}

/// Per-field validation outcome. Empty means the submission is valid.
///
/// Entries keep schema field order, so "the first error" is the same for every
/// consumer. Serializes as a `{ field: message }` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation. A field keeps only its first violation.
    pub fn push(&mut self, field: impl Into<String>, violation: Violation) {
        let field = field.into();
        if self.entries.iter().any(|e| e.field == field) {
            return;
        }
        self.entries.push(FieldViolation { field, violation });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the violation recorded for a field
    pub fn get(&self, field: &str) -> Option<&Violation> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.violation)
    }

    /// Returns the user-facing message for a field
    pub fn message(&self, field: &str) -> Option<String> {
        self.get(field).map(|v| v.to_string())
    }

    /// Returns the first message in schema order
    pub fn first_message(&self) -> Option<String> {
        self.entries.first().map(|e| e.violation.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.entries.iter()
    }

    /// Converts into a `Result`, `Ok` when there are no violations
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for entry in &self.entries {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", entry.field, entry.violation)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.field, &entry.violation.to_string())?;
        }
        map.end()
    }
}
