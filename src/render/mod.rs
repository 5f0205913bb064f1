//! # Form Renderer
//!
//! Turns a form schema into something a user can fill in:
//! - `Control`: the input control for each field and its native constraints
//! - `FormState`: values, errors, touched flags and the status banner
//! - HTML for the entry form, the submissions table, and the detail and
//!   editor pages
//!
//! Field checks on change and blur run the same compiled rules as the server
//! validator.

mod control;
mod hints;
mod html;
mod normalize;
mod state;

pub use control::{Control, ControlKind, SELECT_PLACEHOLDER};
pub use hints::{hint_line, rule_hints, OPTIONAL_HINT};
pub use html::{
    escape, export_href, list_href, render_detail, render_editor, render_form, render_not_found,
    render_submissions,
};
pub use normalize::normalize_for_submit;
pub use state::{
    default_value, Banner, FieldState, FormMode, FormState, SubmissionSink, SubmitOutcome, Tone,
    CREATED_MESSAGE, SUBMISSIONS_PATH, UPDATED_MESSAGE,
};
