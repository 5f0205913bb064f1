//! # Submission Backends
//!
//! A backend loads and saves the whole submission collection as one unit.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::errors::{PersistenceError, PersistenceResult};
use super::record::Submission;

/// File name of the submissions document inside the data directory
pub const SUBMISSIONS_FILE: &str = "submissions.json";

/// Whole-collection persistence
pub trait SubmissionBackend: Send + Sync {
    /// Loads the full collection, newest first
    fn load(&self) -> PersistenceResult<Vec<Submission>>;

    /// Replaces the stored collection
    fn persist(&self, submissions: &[Submission]) -> PersistenceResult<()>;
}

/// One pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Backend for an explicit document path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for `<data_dir>/submissions.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SUBMISSIONS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty `[]` document if absent.
    pub fn ensure(&self) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| PersistenceError::io(parent.display().to_string(), e))?;
            }
        }

        if !self.path.exists() {
            fs::write(&self.path, "[]").map_err(|e| self.io_error(e))?;
        }

        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::io(self.path.display().to_string(), source)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SubmissionBackend for JsonFileBackend {
    fn load(&self) -> PersistenceResult<Vec<Submission>> {
        self.ensure()?;

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|e| PersistenceError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn persist(&self, submissions: &[Submission]) -> PersistenceResult<()> {
        self.ensure()?;

        let content = serde_json::to_string_pretty(submissions)
            .map_err(|e| PersistenceError::Serialize(e.to_string()))?;

        // Write aside then rename, so a crash never leaves half a document
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))
    }
}

/// Keeps the "persisted" collection in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<Vec<Submission>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing collection
    pub fn with_submissions(submissions: Vec<Submission>) -> Self {
        Self {
            saved: Mutex::new(submissions),
        }
    }

    /// Returns what was last persisted
    pub fn saved(&self) -> Vec<Submission> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SubmissionBackend for MemoryBackend {
    fn load(&self) -> PersistenceResult<Vec<Submission>> {
        Ok(self.saved())
    }

    fn persist(&self, submissions: &[Submission]) -> PersistenceResult<()> {
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = submissions.to_vec();
        Ok(())
    }
}
