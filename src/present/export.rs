//! CSV export
//!
//! Columns are `id`, `createdAt`, then every schema field id in schema order.
//! Every cell is quoted; values use the same display text as the table.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use super::format::{format_value, iso_timestamp};
use crate::schema::FormSchema;
use crate::storage::Submission;

/// Suggested download name
pub const EXPORT_FILE_NAME: &str = "submissions.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Header row
pub fn headers(schema: &FormSchema) -> Vec<String> {
    let mut headers = vec!["id".to_string(), "createdAt".to_string()];
    headers.extend(schema.fields.iter().map(|field| field.id.clone()));
    headers
}

/// Writes the header and one row per submission into a string
pub fn export_csv(schema: &FormSchema, submissions: &[Submission]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers(schema))?;
    for submission in submissions {
        let mut row = vec![submission.id.clone(), iso_timestamp(&submission.created_at)];
        row.extend(
            schema
                .fields
                .iter()
                .map(|field| format_value(submission.values.get(&field.id))),
        );
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}
