//! Submit-time normalization of raw form values.
//!
//! Controls hold loosely typed values (number inputs hold text, unchecked
//! groups may be missing). Before a submission leaves the form:
//! - number: blank ⇒ null, numeric ⇒ a JSON number, anything else is kept
//!   as typed so validation reports it
//! - multi-select: anything but an array ⇒ `[]`
//! - switch: truthiness ⇒ bool
//! - everything else: absent or null ⇒ `""`
//!
//! Keys the schema does not declare are dropped.

use serde_json::{Map, Number, Value};

use crate::schema::{coerce_number, FieldType, FormSchema};

/// Builds the payload for submission from raw control values
pub fn normalize_for_submit(schema: &FormSchema, raw: &Map<String, Value>) -> Map<String, Value> {
    let mut payload = Map::new();

    for field in &schema.fields {
        let value = raw.get(&field.id);
        let normalized = match field.field_type {
            FieldType::Number => normalize_number(value),
            FieldType::MultiSelect => match value {
                Some(Value::Array(items)) => Value::Array(items.clone()),
                _ => Value::Array(Vec::new()),
            },
            FieldType::Switch => Value::Bool(value.map(is_truthy).unwrap_or(false)),
            _ => match value {
                None | Some(Value::Null) => Value::String(String::new()),
                Some(v) => v.clone(),
            },
        };
        payload.insert(field.id.clone(), normalized);
    }

    payload
}

fn normalize_number(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Null,
        Some(Value::String(s)) if s.trim().is_empty() => Value::Null,
        Some(v) => coerce_number(v)
            .and_then(number_value)
            .unwrap_or_else(|| v.clone()),
    }
}

/// Whole numbers become integers so `29` stays `29`, not `29.0`
fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Some(Value::Number(Number::from(n as i64)))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
