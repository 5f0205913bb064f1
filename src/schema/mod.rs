//! Form schema subsystem
//!
//! One declarative `FormSchema` drives server validation, live form
//! validation, control rendering and the submissions table.
//!
//! # Design Principles
//!
//! - Schemas are immutable after load
//! - Rules are compiled once and shared by every validation path
//! - One message per failing field, first failure wins
//! - Validation is a pure function of (schema, values)

mod defaults;
mod errors;
mod loader;
mod rules;
mod types;
mod validator;

pub use defaults::onboarding_schema;
pub use errors::{FieldViolation, SchemaError, SchemaResult, ValidationErrors, Violation};
pub use loader::{SchemaLoader, SchemaSource};
pub use rules::{coerce_number, coerce_switch, is_empty, parse_date, CompiledField, CompiledSchema, Rule};
pub use types::{FieldOption, FieldSchema, FieldType, FieldValidations, FormSchema};
pub use validator::SchemaValidator;
