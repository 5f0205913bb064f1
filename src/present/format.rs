//! Display formatting for stored values and timestamps.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::schema::FormSchema;
use crate::storage::Submission;

/// Shown for empty values
pub const EMPTY: &str = "—";

/// Formats a stored value for display.
///
/// Arrays are joined with ", ", booleans read Yes/No, and absent, null or
/// empty values render as "—".
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY.to_string(),
        Some(Value::Array(items)) if items.is_empty() => EMPTY.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_display)
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::String(s)) if s.is_empty() => EMPTY.to_string(),
        Some(other) => scalar_display(other),
    }
}

fn scalar_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Medium date, short time: `Oct 19, 2026, 3:04 PM` (UTC)
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// ISO-8601 with milliseconds, as stored
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One labelled line of a submission's detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

/// Detail view: creation time, then every schema field in order
pub fn detail_rows(schema: &FormSchema, submission: &Submission) -> Vec<DetailRow> {
    let mut rows = Vec::with_capacity(schema.fields.len() + 1);
    rows.push(DetailRow {
        label: "Created".to_string(),
        value: format_timestamp(&submission.created_at),
    });
    rows.extend(schema.fields.iter().map(|field| DetailRow {
        label: field.label.clone(),
        value: format_value(submission.values.get(&field.id)),
    }));
    rows
}

/// Title of the detail and editor views
pub fn submission_title(submission: &Submission) -> String {
    format!("Submission {}", submission.short_id())
}
