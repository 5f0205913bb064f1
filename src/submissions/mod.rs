//! # Submissions Module
//!
//! The write path (validate, then store) and the read path (get, list) for
//! submissions of the active form.

mod errors;
mod service;

pub use errors::{ServiceError, ServiceResult};
pub use service::SubmissionService;
