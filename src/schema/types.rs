//! Form schema type definitions
//!
//! Supported field types:
//! - text / textarea: free text with length bounds and an optional pattern
//! - number: finite number with inclusive bounds
//! - select: exactly one declared option
//! - multi-select: a set of declared options with cardinality bounds
//! - date: calendar date with an optional inclusive lower bound
//! - switch: boolean toggle

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Supported field types. Unrecognised type names load as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// Single-line text
    Text,
    /// Number input
    Number,
    /// Single choice from `options`
    Select,
    /// Any number of choices from `options`
    MultiSelect,
    /// Calendar date (YYYY-MM-DD)
    Date,
    /// Multi-line text
    Textarea,
    /// Boolean toggle
    Switch,
    /// Escape hatch: accepts any value
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// Returns the wire name of this type
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::MultiSelect => "multi-select",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Switch => "switch",
            FieldType::Unknown => "unknown",
        }
    }

    /// Whether this type chooses among declared options
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::MultiSelect)
    }
}

/// One selectable option of a select or multi-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Type-specific constraints. Each one only applies to the types that read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<usize>,
}

impl FieldValidations {
    /// Returns true when no constraint is set
    pub fn is_empty(&self) -> bool {
        *self == FieldValidations::default()
    }
}

/// Declarative description of one form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Unique within a form; the key of the field in submission values
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "FieldValidations::is_empty")]
    pub validations: FieldValidations,
}

impl FieldSchema {
    /// Create an optional field with no options or constraints
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            placeholder: None,
            required: false,
            options: Vec::new(),
            validations: FieldValidations::default(),
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_validations(mut self, validations: FieldValidations) -> Self {
        self.validations = validations;
        self
    }

    /// Returns the declared option values in order
    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.value.as_str())
    }
}

/// A complete form: title, description and ordered fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Create a schema without a description
    pub fn new(title: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields,
        }
    }

    /// Looks up a field by id
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Validates the schema structure itself (not a submission)
    pub fn validate_structure(&self) -> Result<(), String> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            if field.id.trim().is_empty() {
                return Err(format!("Field '{}' has an empty id", field.label));
            }
            if !seen.insert(field.id.as_str()) {
                return Err(format!("Duplicate field id '{}'", field.id));
            }
            if field.field_type.has_options() && field.options.is_empty() {
                return Err(format!(
                    "Field '{}' of type {} must declare options",
                    field.id,
                    field.field_type.type_name()
                ));
            }

            let v = &field.validations;
            if let (Some(min), Some(max)) = (v.min_length, v.max_length) {
                if min > max {
                    return Err(format!("Field '{}': minLength exceeds maxLength", field.id));
                }
            }
            if let (Some(min), Some(max)) = (v.min, v.max) {
                if min > max {
                    return Err(format!("Field '{}': min exceeds max", field.id));
                }
            }
            if let (Some(min), Some(max)) = (v.min_selected, v.max_selected) {
                if min > max {
                    return Err(format!("Field '{}': minSelected exceeds maxSelected", field.id));
                }
            }
        }

        Ok(())
    }
}
