//! Field → input control mapping
//!
//! Each field type maps to one control. The native input constraints
//! (`required`, `minlength`, `pattern`, `min`, ...) are derived from the same
//! schema the validator compiles, so the browser never accepts less than the
//! server does.

use crate::schema::{FieldOption, FieldSchema, FieldType};

/// Label of the empty entry at the top of every select
pub const SELECT_PLACEHOLDER: &str = "Select an option";

/// Kind of input control a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// `<input type="text">`
    TextInput,
    /// `<input type="number">`
    NumberInput,
    /// `<textarea>`
    TextArea,
    /// `<select>` with an empty first entry
    Select,
    /// One checkbox per option
    CheckboxGroup,
    /// `<input type="date">`
    DateInput,
    /// On/off toggle
    Toggle,
    /// No control; the value passes through untouched
    Unsupported,
}

impl ControlKind {
    pub fn for_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => ControlKind::TextInput,
            FieldType::Number => ControlKind::NumberInput,
            FieldType::Textarea => ControlKind::TextArea,
            FieldType::Select => ControlKind::Select,
            FieldType::MultiSelect => ControlKind::CheckboxGroup,
            FieldType::Date => ControlKind::DateInput,
            FieldType::Switch => ControlKind::Toggle,
            FieldType::Unknown => ControlKind::Unsupported,
        }
    }
}

/// A field ready to render
#[derive(Debug, Clone)]
pub struct Control<'a> {
    pub field: &'a FieldSchema,
    pub kind: ControlKind,
}

impl<'a> Control<'a> {
    pub fn for_field(field: &'a FieldSchema) -> Self {
        Self {
            field,
            kind: ControlKind::for_type(field.field_type),
        }
    }

    /// Placeholder text, with a generic prompt when the schema has none
    pub fn prompt(&self) -> &str {
        self.field
            .placeholder
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("Provide a response for this field.")
    }

    /// Options in display order (empty for non-choice controls)
    pub fn options(&self) -> &[FieldOption] {
        &self.field.options
    }

    /// Native HTML constraint attributes as (name, value) pairs.
    ///
    /// Boolean attributes carry an empty value.
    pub fn constraint_attributes(&self) -> Vec<(&'static str, String)> {
        let v = &self.field.validations;
        let mut attrs = Vec::new();

        // Native `required` on a checkbox group would demand every box
        if self.field.required
            && !matches!(self.kind, ControlKind::CheckboxGroup | ControlKind::Toggle)
        {
            attrs.push(("required", String::new()));
        }

        match self.kind {
            ControlKind::TextInput | ControlKind::TextArea => {
                if let Some(min) = v.min_length {
                    attrs.push(("minlength", min.to_string()));
                }
                if let Some(max) = v.max_length {
                    attrs.push(("maxlength", max.to_string()));
                }
                if self.kind == ControlKind::TextInput {
                    if let Some(pattern) = &v.regex {
                        attrs.push(("pattern", pattern.clone()));
                    }
                }
            }
            ControlKind::NumberInput => {
                if let Some(min) = v.min {
                    attrs.push(("min", min.to_string()));
                }
                if let Some(max) = v.max {
                    attrs.push(("max", max.to_string()));
                }
                attrs.push(("step", "any".to_string()));
            }
            ControlKind::DateInput => {
                if let Some(min) = &v.min_date {
                    attrs.push(("min", min.clone()));
                }
            }
            _ => {}
        }

        attrs
    }
}
