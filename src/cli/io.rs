//! JSON and text I/O for CLI commands
//!
//! - Input: JSON files
//! - Output: one JSON object per command on stdout, or raw CSV
//! - UTF-8 only

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value};

use super::errors::{CliError, CliResult};

/// Reads a JSON object from a file
pub fn read_object(path: &Path) -> CliResult<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;

    match serde_json::from_str(&content)? {
        Value::Object(values) => Ok(values),
        _ => Err(CliError::io_error(format!(
            "{} must contain a JSON object",
            path.display()
        ))),
    }
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response with details to stdout
pub fn write_error(code: &str, message: &str, details: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message,
        "details": details
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Writes text to a file, or stdout when no path is given
pub fn write_text(output: Option<&Path>, text: &str) -> CliResult<()> {
    match output {
        Some(path) => fs::write(path, text).map_err(|e| {
            CliError::io_error(format!("Failed to write {}: {}", path.display(), e))
        }),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
