//! Submission validator
//!
//! Validation semantics:
//! - Every declared field is checked, in schema order
//! - Each failing field reports exactly one message (first failure wins)
//! - Undeclared keys are rejected after all declared fields
//! - Validation never mutates the values it checks
//!
//! Used identically for create and update.

use serde_json::{Map, Value};

use super::errors::{ValidationErrors, Violation};
use super::rules::CompiledSchema;

/// Validates submission values against a compiled form schema.
pub struct SchemaValidator<'a> {
    compiled: &'a CompiledSchema,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator backed by the given compiled schema.
    pub fn new(compiled: &'a CompiledSchema) -> Self {
        Self { compiled }
    }

    /// Validates a complete values mapping.
    ///
    /// Returns one entry per failing field; an empty result means valid.
    pub fn validate(&self, values: &Map<String, Value>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for field in self.compiled.fields() {
            if let Err(violation) = field.check(values.get(&field.id)) {
                errors.push(field.id.clone(), violation);
            }
        }

        for key in values.keys() {
            if self.compiled.field(key).is_none() {
                errors.push(key.clone(), Violation::NotAllowed);
            }
        }

        errors
    }

    /// Validates a single field value, as the form does on change and blur.
    ///
    /// Unknown field ids yield `NotAllowed`.
    pub fn validate_field(&self, field_id: &str, value: Option<&Value>) -> Option<Violation> {
        match self.compiled.field(field_id) {
            Some(field) => field.check(value).err(),
            None => Some(Violation::NotAllowed),
        }
    }
}
