//! Compiled validation rules
//!
//! A `FormSchema` is compiled once into a `CompiledSchema`. Both the server
//! validator and the form state run these same rules, so a value accepted by
//! the form is accepted by the API and vice versa.
//!
//! Check order per field, first failure wins:
//! 1. required-ness
//! 2. empty optional values pass, except a present empty selection on a
//!    multi-select with `minSelected`
//! 3. type conformance
//! 4. bounds

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult, Violation};
use super::types::{FieldSchema, FieldType, FormSchema};

/// Type-specific predicate for one field
#[derive(Debug, Clone)]
pub enum Rule {
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
        /// Anchored so it must match the whole value
        pattern: Option<Regex>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Select {
        allowed: Vec<String>,
    },
    MultiSelect {
        allowed: Vec<String>,
        min_selected: Option<usize>,
        max_selected: Option<usize>,
    },
    Date {
        min_date: Option<(NaiveDate, String)>,
    },
    Switch,
    Any,
}

/// A field with its rule ready to run
#[derive(Debug, Clone)]
pub struct CompiledField {
    pub id: String,
    pub required: bool,
    pub rule: Rule,
}

impl CompiledField {
    /// Compiles one field schema
    pub fn compile(field: &FieldSchema) -> SchemaResult<Self> {
        let v = &field.validations;
        let allowed = || field.option_values().map(str::to_string).collect::<Vec<_>>();

        let rule = match field.field_type {
            FieldType::Text | FieldType::Textarea => {
                let pattern = match &v.regex {
                    Some(raw) => Some(Regex::new(&format!("^(?:{})$", raw)).map_err(|e| {
                        SchemaError::InvalidPattern {
                            field: field.id.clone(),
                            reason: e.to_string(),
                        }
                    })?),
                    None => None,
                };
                Rule::Text {
                    min_length: v.min_length,
                    max_length: v.max_length,
                    pattern,
                }
            }
            FieldType::Number => Rule::Number {
                min: v.min,
                max: v.max,
            },
            FieldType::Select => Rule::Select { allowed: allowed() },
            FieldType::MultiSelect => Rule::MultiSelect {
                allowed: allowed(),
                min_selected: v.min_selected,
                max_selected: v.max_selected,
            },
            FieldType::Date => {
                let min_date = match &v.min_date {
                    Some(raw) => {
                        let date = parse_date(raw).ok_or_else(|| SchemaError::InvalidMinDate {
                            field: field.id.clone(),
                            value: raw.clone(),
                        })?;
                        Some((date, raw.clone()))
                    }
                    None => None,
                };
                Rule::Date { min_date }
            }
            FieldType::Switch => Rule::Switch,
            FieldType::Unknown => Rule::Any,
        };

        Ok(Self {
            id: field.id.clone(),
            required: field.required,
            rule,
        })
    }

    /// Checks a value (`None` when the key is absent)
    pub fn check(&self, value: Option<&Value>) -> Result<(), Violation> {
        if is_empty(value) {
            if self.required {
                return Err(Violation::Required);
            }
            if !self.bounds_empty_selection(value) {
                return Ok(());
            }
        }
        let Some(value) = value else {
            return Ok(());
        };

        match &self.rule {
            Rule::Text {
                min_length,
                max_length,
                pattern,
            } => {
                let text = value.as_str().ok_or(Violation::InvalidText)?.trim();
                let len = text.chars().count();
                if let Some(min) = min_length {
                    if len < *min {
                        return Err(Violation::TooShort(*min));
                    }
                }
                if let Some(max) = max_length {
                    if len > *max {
                        return Err(Violation::TooLong(*max));
                    }
                }
                if let Some(pattern) = pattern {
                    if !pattern.is_match(text) {
                        return Err(Violation::PatternMismatch);
                    }
                }
            }
            Rule::Number { min, max } => {
                let number = coerce_number(value).ok_or(Violation::InvalidNumber)?;
                if let Some(min) = min {
                    if number < *min {
                        return Err(Violation::BelowMin(*min));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Err(Violation::AboveMax(*max));
                    }
                }
            }
            Rule::Select { allowed } => {
                let choice = value.as_str().ok_or(Violation::InvalidOption)?;
                if !allowed.iter().any(|a| a == choice) {
                    return Err(Violation::InvalidOption);
                }
            }
            Rule::MultiSelect {
                allowed,
                min_selected,
                max_selected,
            } => {
                let items = value.as_array().ok_or(Violation::InvalidOptions)?;
                let all_declared = items.iter().all(|item| {
                    item.as_str()
                        .map(|s| allowed.iter().any(|a| a == s))
                        .unwrap_or(false)
                });
                if !all_declared {
                    return Err(Violation::InvalidOptions);
                }
                // Selections are a set; repeats count once
                let picked = items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<HashSet<_>>()
                    .len();
                if let Some(min) = min_selected {
                    if picked < *min {
                        return Err(Violation::TooFewSelected(*min));
                    }
                }
                if let Some(max) = max_selected {
                    if picked > *max {
                        return Err(Violation::TooManySelected(*max));
                    }
                }
            }
            Rule::Date { min_date } => {
                let date = value
                    .as_str()
                    .and_then(parse_date)
                    .ok_or(Violation::InvalidDate)?;
                if let Some((min, label)) = min_date {
                    if date < *min {
                        return Err(Violation::BeforeMinDate(label.clone()));
                    }
                }
            }
            Rule::Switch => {
                coerce_switch(value).ok_or(Violation::InvalidSwitch)?;
            }
            Rule::Any => {}
        }

        Ok(())
    }

    /// An empty array sent for an optional multi-select still has to meet
    /// `minSelected`; only an absent or null value skips the rule.
    fn bounds_empty_selection(&self, value: Option<&Value>) -> bool {
        match (&self.rule, value) {
            (
                Rule::MultiSelect {
                    min_selected: Some(min),
                    ..
                },
                Some(Value::Array(_)),
            ) => *min > 0,
            _ => false,
        }
    }
}

/// Every field of a form, compiled, plus the source schema
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    schema: FormSchema,
    fields: Vec<CompiledField>,
}

impl CompiledSchema {
    /// Checks the schema structure and compiles every field
    pub fn compile(schema: FormSchema) -> SchemaResult<Self> {
        schema
            .validate_structure()
            .map_err(SchemaError::InvalidStructure)?;

        let fields = schema
            .fields
            .iter()
            .map(CompiledField::compile)
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self { schema, fields })
    }

    /// The schema this was compiled from
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Compiled fields in schema order
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Absent, null, blank string or empty array.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// JSON numbers and numeric strings, finite only.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Booleans and the strings `true` / `false`.
pub fn coerce_switch(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
