//! Form schema loader
//!
//! The active form comes from one of two places:
//! - a JSON `FormSchema` file named in the configuration
//! - the built-in onboarding form
//!
//! Either way the schema is compiled before it is served; a schema that does
//! not compile stops startup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::defaults::onboarding_schema;
use super::errors::{SchemaError, SchemaResult};
use super::rules::CompiledSchema;
use super::types::FormSchema;

/// Where the active form schema comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Built-in onboarding form
    Builtin,
    /// JSON file on disk
    File(PathBuf),
}

/// Loads and compiles the active form schema.
pub struct SchemaLoader {
    source: SchemaSource,
}

impl SchemaLoader {
    /// Loader for the built-in onboarding form
    pub fn builtin() -> Self {
        Self {
            source: SchemaSource::Builtin,
        }
    }

    /// Loader for a schema file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SchemaSource::File(path.into()),
        }
    }

    /// Picks the file source when a path is configured, the built-in otherwise
    pub fn from_config(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::builtin(),
        }
    }

    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// Reads the schema without compiling it.
    ///
    /// `today` anchors the built-in form's earliest start date.
    pub fn read(&self, today: NaiveDate) -> SchemaResult<FormSchema> {
        match &self.source {
            SchemaSource::Builtin => Ok(onboarding_schema(today)),
            SchemaSource::File(path) => Self::read_file(path),
        }
    }

    /// Reads and compiles the schema.
    pub fn load(&self, today: NaiveDate) -> SchemaResult<CompiledSchema> {
        CompiledSchema::compile(self.read(today)?)
    }

    fn read_file(path: &Path) -> SchemaResult<FormSchema> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| SchemaError::Malformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
