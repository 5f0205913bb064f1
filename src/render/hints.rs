//! Rule hints shown under a field while it has no error.

use crate::schema::FieldSchema;

/// Shown when a field has no constraints at all
pub const OPTIONAL_HINT: &str = "You can leave this empty if it's optional.";

/// Short descriptions of each constraint on a field
pub fn rule_hints(field: &FieldSchema) -> Vec<String> {
    let v = &field.validations;
    let mut hints = Vec::new();

    if let Some(n) = v.min_length {
        hints.push(format!("≥{} chars", n));
    }
    if let Some(n) = v.max_length {
        hints.push(format!("≤{} chars", n));
    }
    if let Some(n) = v.min {
        hints.push(format!("min {}", n));
    }
    if let Some(n) = v.max {
        hints.push(format!("max {}", n));
    }
    if let Some(n) = v.min_selected {
        hints.push(format!("min {} picks", n));
    }
    if let Some(n) = v.max_selected {
        hints.push(format!("max {} picks", n));
    }
    if let Some(date) = &v.min_date {
        hints.push(format!("from {}", date));
    }

    hints
}

/// The full hint line for a field
pub fn hint_line(field: &FieldSchema) -> String {
    let hints = rule_hints(field);
    if hints.is_empty() {
        OPTIONAL_HINT.to_string()
    } else {
        format!("Rules: {}", hints.join(" · "))
    }
}
