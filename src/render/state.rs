//! # Form State
//!
//! Headless state for one rendered form: current values, per-field errors,
//! touched flags and a status banner.
//!
//! Validation runs on change and on blur through the same compiled rules the
//! server uses. On submit the values are normalized first and the whole
//! payload is checked with `SchemaValidator`, so a payload the form accepts is
//! exactly a payload the server accepts.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::normalize::normalize_for_submit;
use crate::schema::{CompiledSchema, FieldType, SchemaValidator, ValidationErrors, Violation};
use crate::storage::Submission;
use crate::submissions::{ServiceError, SubmissionService};

/// Where the entry form sends the user after a successful create
pub const SUBMISSIONS_PATH: &str = "/submissions";

/// Banner message after a successful create
pub const CREATED_MESSAGE: &str = "Submission saved. Redirecting to the submissions table...";

/// Banner message after a successful update
pub const UPDATED_MESSAGE: &str = "Submission updated.";

/// Tone of a status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Info,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Error => "error",
            Tone::Info => "info",
        }
    }
}

/// Status message shown above the form
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub tone: Tone,
    pub message: String,
}

impl Banner {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }
}

/// State of one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub value: Value,
    pub error: Option<Violation>,
    pub touched: bool,
}

/// What the form is editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Entry form; submits create new records
    Create,
    /// Editor for an existing record
    Edit { id: String },
}

/// Receives normalized payloads from a form
pub trait SubmissionSink {
    fn create(&self, values: Map<String, Value>) -> Result<Submission, ServiceError>;
    fn update(&self, id: &str, values: Map<String, Value>) -> Result<Submission, ServiceError>;
}

impl SubmissionSink for SubmissionService {
    fn create(&self, values: Map<String, Value>) -> Result<Submission, ServiceError> {
        SubmissionService::create(self, values)
    }

    fn update(&self, id: &str, values: Map<String, Value>) -> Result<Submission, ServiceError> {
        SubmissionService::update(self, id, values)
    }
}

/// Result of `FormState::submit`
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent
    Invalid,
    /// The sink accepted the payload
    Saved {
        submission: Submission,
        /// Set for the entry form, which navigates to the table
        redirect: Option<&'static str>,
    },
    /// The sink rejected the payload; the banner carries the reason
    Failed,
}

/// Default value of a field before the user touches it
pub fn default_value(field_type: FieldType) -> Value {
    match field_type {
        FieldType::MultiSelect => Value::Array(Vec::new()),
        FieldType::Switch => Value::Bool(false),
        _ => Value::String(String::new()),
    }
}

/// Interactive state for one form
#[derive(Debug, Clone)]
pub struct FormState {
    compiled: Arc<CompiledSchema>,
    mode: FormMode,
    fields: Vec<FieldState>,
    banner: Option<Banner>,
}

impl FormState {
    /// Empty entry form with per-type defaults
    pub fn new(compiled: Arc<CompiledSchema>) -> Self {
        let fields = Self::defaults(&compiled);
        Self {
            compiled,
            mode: FormMode::Create,
            fields,
            banner: None,
        }
    }

    /// Editor prefilled with a stored record.
    ///
    /// Stored values override defaults; fields missing from the record keep
    /// their default.
    pub fn for_submission(compiled: Arc<CompiledSchema>, submission: &Submission) -> Self {
        let mut fields = Self::defaults(&compiled);
        for (state, field) in fields.iter_mut().zip(compiled.fields()) {
            if let Some(value) = submission.values.get(&field.id) {
                state.value = value.clone();
            }
        }
        Self {
            compiled,
            mode: FormMode::Edit {
                id: submission.id.clone(),
            },
            fields,
            banner: None,
        }
    }

    fn defaults(compiled: &CompiledSchema) -> Vec<FieldState> {
        compiled
            .schema()
            .fields
            .iter()
            .map(|field| FieldState {
                value: default_value(field.field_type),
                error: None,
                touched: false,
            })
            .collect()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn compiled(&self) -> &Arc<CompiledSchema> {
        &self.compiled
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn set_banner(&mut self, banner: Option<Banner>) {
        self.banner = banner;
    }

    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.index(id).map(|i| &self.fields[i])
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.field(id).map(|state| &state.value)
    }

    pub fn error(&self, id: &str) -> Option<&Violation> {
        self.field(id).and_then(|state| state.error.as_ref())
    }

    /// Current raw values keyed by field id
    pub fn values(&self) -> Map<String, Value> {
        self.compiled
            .fields()
            .iter()
            .zip(&self.fields)
            .map(|(field, state)| (field.id.clone(), state.value.clone()))
            .collect()
    }

    /// Records a new value and re-validates the field.
    ///
    /// Returns false for ids the schema does not declare.
    pub fn handle_change(&mut self, id: &str, value: Value) -> bool {
        let Some(i) = self.index(id) else {
            return false;
        };
        let error = SchemaValidator::new(&self.compiled).validate_field(id, Some(&value));
        let state = &mut self.fields[i];
        state.value = value;
        state.error = error;
        true
    }

    /// Marks a field touched and re-validates it
    pub fn handle_blur(&mut self, id: &str) -> bool {
        let Some(i) = self.index(id) else {
            return false;
        };
        let error =
            SchemaValidator::new(&self.compiled).validate_field(id, Some(&self.fields[i].value));
        let state = &mut self.fields[i];
        state.touched = true;
        state.error = error;
        true
    }

    /// The payload `submit` would send
    pub fn normalized_values(&self) -> Map<String, Value> {
        normalize_for_submit(self.compiled.schema(), &self.values())
    }

    /// Validates the normalized payload and attaches errors to every field.
    ///
    /// All fields are marked touched.
    pub fn validate_all(&mut self) -> ValidationErrors {
        let errors = SchemaValidator::new(&self.compiled).validate(&self.normalized_values());
        for (field, state) in self.compiled.fields().iter().zip(self.fields.iter_mut()) {
            state.touched = true;
            state.error = errors.get(&field.id).cloned();
        }
        errors
    }

    /// True when no field currently shows an error
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|state| state.error.is_none())
    }

    /// Validates, then hands the normalized payload to the sink.
    ///
    /// - success on the entry form resets it and asks for a redirect
    /// - success in the editor keeps the saved values
    /// - failure keeps every value and shows the first reported error
    pub fn submit<S: SubmissionSink + ?Sized>(&mut self, sink: &S) -> SubmitOutcome {
        if !self.validate_all().is_empty() {
            self.banner = None;
            return SubmitOutcome::Invalid;
        }

        let payload = self.normalized_values();
        let result = match &self.mode {
            FormMode::Create => sink.create(payload),
            FormMode::Edit { id } => sink.update(id, payload),
        };

        match result {
            Ok(submission) => match self.mode {
                FormMode::Create => {
                    self.reset();
                    self.banner = Some(Banner::new(Tone::Success, CREATED_MESSAGE));
                    SubmitOutcome::Saved {
                        submission,
                        redirect: Some(SUBMISSIONS_PATH),
                    }
                }
                FormMode::Edit { .. } => {
                    self.banner = Some(Banner::new(Tone::Success, UPDATED_MESSAGE));
                    SubmitOutcome::Saved {
                        submission,
                        redirect: None,
                    }
                }
            },
            Err(err) => {
                self.banner = Some(Banner::new(Tone::Error, err.first_message()));
                SubmitOutcome::Failed
            }
        }
    }

    /// Restores defaults and clears errors, touched flags and the banner
    pub fn reset(&mut self) {
        self.fields = Self::defaults(&self.compiled);
        self.banner = None;
    }

    /// Applies an urlencoded form post.
    ///
    /// Multi-select fields collect every pair with their id; switches are on
    /// when present with a truthy value; other fields take their first value.
    pub fn apply_pairs(&mut self, pairs: &[(String, String)]) {
        let updates: Vec<(String, Value)> = self
            .compiled
            .schema()
            .fields
            .iter()
            .map(|field| {
                let mut values = pairs
                    .iter()
                    .filter(|(key, _)| key == &field.id)
                    .map(|(_, value)| value.clone());
                let value = match field.field_type {
                    FieldType::MultiSelect => Value::Array(values.map(Value::String).collect()),
                    FieldType::Switch => {
                        Value::Bool(values.any(|v| matches!(v.as_str(), "on" | "true")))
                    }
                    _ => Value::String(values.next().unwrap_or_default()),
                };
                (field.id.clone(), value)
            })
            .collect();

        for (id, value) in updates {
            self.handle_change(&id, value);
        }
    }

    fn index(&self, id: &str) -> Option<usize> {
        self.compiled.fields().iter().position(|field| field.id == id)
    }
}
