//! Server-side HTML for the entry form, the submissions table, and the
//! detail and editor pages of one submission.

use std::fmt::Write;

use serde_json::Value;

use super::control::{Control, ControlKind, SELECT_PLACEHOLDER};
use super::hints::hint_line;
use super::state::{FormMode, FormState, SUBMISSIONS_PATH};
use crate::present::{
    detail_rows, format_timestamp, format_value, submission_title, table_rows, total_label,
    TableView, EMPTY_TABLE, PAGE_SIZES,
};
use crate::query::{ListPage, ListParams};
use crate::schema::FormSchema;
use crate::storage::Submission;

/// Escapes text for element content and quoted attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn attributes(control: &Control<'_>) -> String {
    let mut out = String::new();
    for (name, value) in control.constraint_attributes() {
        if value.is_empty() {
            let _ = write!(out, " {}", name);
        } else {
            let _ = write!(out, " {}=\"{}\"", name, escape(&value));
        }
    }
    out
}

fn render_control(out: &mut String, control: &Control<'_>, value: Option<&Value>) {
    let id = escape(&control.field.id);
    let prompt = escape(control.prompt());
    let attrs = attributes(control);

    match control.kind {
        ControlKind::TextInput | ControlKind::NumberInput | ControlKind::DateInput => {
            let input_type = match control.kind {
                ControlKind::NumberInput => "number",
                ControlKind::DateInput => "date",
                _ => "text",
            };
            let _ = writeln!(
                out,
                "<input type=\"{}\" id=\"{}\" name=\"{}\" value=\"{}\" placeholder=\"{}\"{}>",
                input_type,
                id,
                id,
                escape(&text_of(value)),
                prompt,
                attrs
            );
        }
        ControlKind::TextArea => {
            let _ = writeln!(
                out,
                "<textarea id=\"{}\" name=\"{}\" rows=\"4\" placeholder=\"{}\"{}>{}</textarea>",
                id,
                id,
                prompt,
                attrs,
                escape(&text_of(value))
            );
        }
        ControlKind::Select => {
            let current = text_of(value);
            let _ = writeln!(out, "<select id=\"{}\" name=\"{}\"{}>", id, id, attrs);
            let _ = writeln!(out, "<option value=\"\">{}</option>", SELECT_PLACEHOLDER);
            for option in control.options() {
                let selected = if option.value == current { " selected" } else { "" };
                let _ = writeln!(
                    out,
                    "<option value=\"{}\"{}>{}</option>",
                    escape(&option.value),
                    selected,
                    escape(&option.label)
                );
            }
            out.push_str("</select>\n");
        }
        ControlKind::CheckboxGroup => {
            let chosen: Vec<&str> = match value {
                Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
                _ => Vec::new(),
            };
            let _ = writeln!(out, "<div class=\"checkbox-group\" id=\"{}\">", id);
            for option in control.options() {
                let checked = if chosen.contains(&option.value.as_str()) {
                    " checked"
                } else {
                    ""
                };
                let _ = writeln!(
                    out,
                    "<label><input type=\"checkbox\" name=\"{}\" value=\"{}\"{}> {}</label>",
                    id,
                    escape(&option.value),
                    checked,
                    escape(&option.label)
                );
            }
            out.push_str("</div>\n");
        }
        ControlKind::Toggle => {
            let on = matches!(value, Some(Value::Bool(true)));
            let _ = writeln!(
                out,
                "<label><input type=\"checkbox\" role=\"switch\" id=\"{}\" name=\"{}\"{}> {}</label>",
                id,
                id,
                if on { " checked" } else { "" },
                if on { "Enabled" } else { "Disabled" }
            );
        }
        ControlKind::Unsupported => {
            let _ = writeln!(
                out,
                "<p class=\"unsupported\">{}</p>",
                escape(&format_value(value))
            );
        }
    }
}

fn submission_href(id: &str) -> String {
    format!("{}/{}", SUBMISSIONS_PATH, urlencoding::encode(id))
}

fn search_suffix(search: Option<&str>) -> String {
    search
        .map(|q| format!("&q={}", urlencoding::encode(q)))
        .unwrap_or_default()
}

/// Table URL for a list query
pub fn list_href(params: &ListParams) -> String {
    format!(
        "{}?page={}&limit={}&sortOrder={}{}",
        SUBMISSIONS_PATH,
        params.page,
        params.limit,
        params.sort_order.as_str(),
        search_suffix(params.search.as_deref())
    )
}

/// CSV download of everything the table's search and sort select
pub fn export_href(params: &ListParams) -> String {
    format!(
        "/api/export.csv?sortOrder={}{}",
        params.sort_order.as_str(),
        search_suffix(params.search.as_deref())
    )
}

fn delete_button(id: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}/delete\" class=\"inline\" \
         onsubmit=\"return confirm('Delete this submission?')\">\
         <button type=\"submit\">Delete</button></form>",
        escape(&submission_href(id))
    )
}

fn form_body(body: &mut String, state: &FormState, submit_label: &str) {
    let schema = state.compiled().schema();

    if let Some(banner) = state.banner() {
        let _ = writeln!(
            body,
            "<div class=\"banner banner-{}\" role=\"status\">{}</div>",
            banner.tone.as_str(),
            escape(&banner.message)
        );
    }

    let action = match state.mode() {
        FormMode::Create => "/".to_string(),
        FormMode::Edit { id } => format!("{}/edit", submission_href(id)),
    };
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"{}\" novalidate>",
        escape(&action)
    );
    for field in &schema.fields {
        let control = Control::for_field(field);
        let field_state = state.field(&field.id);

        let _ = writeln!(
            body,
            "<div class=\"field\">\n<label for=\"{}\">{}{}</label>",
            escape(&field.id),
            escape(&field.label),
            if field.required { " *" } else { "" }
        );
        render_control(body, &control, field_state.map(|s| &s.value));

        match field_state.and_then(|s| s.error.as_ref()) {
            Some(error) => {
                let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(&error.to_string()));
            }
            None => {
                let _ = writeln!(body, "<p class=\"hint\">{}</p>", escape(&hint_line(field)));
            }
        }
        body.push_str("</div>\n");
    }
    let _ = writeln!(body, "<button type=\"submit\">{}</button>\n</form>", submit_label);
}

/// Renders the entry form with current values, errors and banner
pub fn render_form(state: &FormState) -> String {
    let schema = state.compiled().schema();
    let mut body = String::new();

    let _ = writeln!(body, "<main class=\"form-page\">\n<h1>{}</h1>", escape(&schema.title));
    if let Some(description) = &schema.description {
        let _ = writeln!(body, "<p class=\"description\">{}</p>", escape(description));
    }
    form_body(&mut body, state, "Submit");
    let _ = writeln!(
        body,
        "<p><a href=\"{}\">View submissions</a></p>\n</main>",
        SUBMISSIONS_PATH
    );

    page(&schema.title, &body)
}

/// Renders the editor for a stored submission
pub fn render_editor(state: &FormState, submission: &Submission) -> String {
    let title = format!("Edit {}", submission_title(submission));
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<main class=\"editor-page\">\n<h1>{}</h1>\n<p class=\"meta\">Created {}</p>",
        escape(&title),
        escape(&format_timestamp(&submission.created_at))
    );
    form_body(&mut body, state, "Save changes");
    let _ = writeln!(
        body,
        "<p><a href=\"{}\">Cancel</a></p>\n</main>",
        escape(&submission_href(&submission.id))
    );

    page(&title, &body)
}

/// Renders the read-only detail view of one submission
pub fn render_detail(schema: &FormSchema, submission: &Submission) -> String {
    let title = submission_title(submission);
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<main class=\"detail-page\">\n<h1>{}</h1>\n<dl>",
        escape(&title)
    );
    for row in detail_rows(schema, submission) {
        let _ = writeln!(
            body,
            "<dt>{}</dt><dd>{}</dd>",
            escape(&row.label),
            escape(&row.value)
        );
    }
    let href = submission_href(&submission.id);
    let _ = writeln!(
        body,
        "</dl>\n<p><a href=\"{}/edit\">Edit</a> {} <a href=\"{}\">Back to submissions</a></p>\n</main>",
        escape(&href),
        delete_button(&submission.id),
        SUBMISSIONS_PATH
    );

    page(&title, &body)
}

/// Page for an unknown submission id
pub fn render_not_found(message: &str) -> String {
    let body = format!(
        "<main class=\"not-found\">\n<h1>{}</h1>\n<p><a href=\"{}\">Back to submissions</a></p>\n</main>\n",
        escape(message),
        SUBMISSIONS_PATH
    );
    page(message, &body)
}

fn page_size_select(current: usize) -> String {
    let mut sizes = PAGE_SIZES.to_vec();
    if !sizes.contains(&current) {
        sizes.push(current);
        sizes.sort_unstable();
    }

    let mut out = String::from("<select name=\"limit\" aria-label=\"Rows per page\">");
    for size in sizes {
        let _ = write!(
            out,
            "<option value=\"{}\"{}>{} / page</option>",
            size,
            if size == current { " selected" } else { "" },
            size
        );
    }
    out.push_str("</select>");
    out
}

/// Renders one page of the submissions table
pub fn render_submissions(schema: &FormSchema, list: &ListPage, params: &ListParams) -> String {
    let mut view = TableView::from_params(params);
    view.apply(list);
    let mut body = String::new();

    let _ = writeln!(
        body,
        "<main class=\"submissions-page\">\n<h1>Submissions</h1>\n<p>{} sorted by created date ({}).</p>",
        escape(&total_label(view.total())),
        view.sort_order().as_str()
    );

    // Changing search or page size starts again from page 1
    let _ = writeln!(
        body,
        "<form method=\"get\" action=\"{}\">\n\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search text across submissions...\">\n\
         {}\n\
         <input type=\"hidden\" name=\"sortOrder\" value=\"{}\">\n\
         <button type=\"submit\">Apply</button>\n</form>",
        SUBMISSIONS_PATH,
        escape(view.search_input()),
        page_size_select(view.limit()),
        view.sort_order().as_str()
    );

    let mut sorted = view.clone();
    sorted.toggle_sort();
    let _ = writeln!(
        body,
        "<table>\n<thead><tr><th>ID</th><th><a href=\"{}\">Created</a></th>",
        escape(&list_href(&sorted.params()))
    );
    for field in &schema.fields {
        let _ = write!(body, "<th>{}</th>", escape(&field.label));
    }
    body.push_str("<th>Actions</th></tr></thead>\n<tbody>\n");

    for (row, submission) in table_rows(&list.submissions).iter().zip(&list.submissions) {
        let href = submission_href(&row.id);
        let _ = write!(
            body,
            "<tr><td title=\"{}\">{}</td><td>{}</td>",
            escape(&row.id),
            escape(&row.short_id),
            escape(&row.created)
        );
        for field in &schema.fields {
            let _ = write!(
                body,
                "<td>{}</td>",
                escape(&format_value(submission.values.get(&field.id)))
            );
        }
        let _ = writeln!(
            body,
            "<td><a href=\"{}\">View</a> <a href=\"{}/edit\">Edit</a> {}</td></tr>",
            escape(&href),
            escape(&href),
            delete_button(&row.id)
        );
    }
    body.push_str("</tbody>\n</table>\n");

    if list.submissions.is_empty() {
        let _ = writeln!(body, "<p class=\"empty\">{}</p>", EMPTY_TABLE);
    }

    let _ = write!(
        body,
        "<nav><span>{}</span> <span>Total: {}</span>",
        view.page_label(),
        view.total()
    );
    if view.can_prev() {
        let mut prev = view.clone();
        prev.prev();
        let _ = write!(body, " <a href=\"{}\">Previous</a>", escape(&list_href(&prev.params())));
    }
    if view.can_next() {
        let mut next = view.clone();
        next.next();
        let _ = write!(body, " <a href=\"{}\">Next</a>", escape(&list_href(&next.params())));
    }
    let _ = writeln!(
        body,
        "</nav>\n<p><a href=\"/\">New submission</a> <a href=\"{}\">Export CSV</a></p>\n</main>",
        escape(&export_href(&view.params()))
    );

    page("Submissions", &body)
}
