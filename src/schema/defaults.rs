//! Built-in onboarding form, served when no schema file is configured.

use chrono::NaiveDate;

use super::types::{FieldOption, FieldSchema, FieldType, FieldValidations, FormSchema};

/// The employee onboarding form. `today` is the earliest allowed start date.
pub fn onboarding_schema(today: NaiveDate) -> FormSchema {
    let fields = vec![
        FieldSchema::new("fullName", "Full Name", FieldType::Text)
            .required()
            .with_placeholder("Jane Doe")
            .with_validations(FieldValidations {
                min_length: Some(2),
                max_length: Some(60),
                ..Default::default()
            }),
        FieldSchema::new("email", "Work Email", FieldType::Text)
            .required()
            .with_placeholder("jane@example.com")
            .with_validations(FieldValidations {
                regex: Some(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$".to_string()),
                ..Default::default()
            }),
        FieldSchema::new("age", "Age", FieldType::Number)
            .required()
            .with_placeholder("e.g. 29")
            .with_validations(FieldValidations {
                min: Some(18.0),
                max: Some(70.0),
                ..Default::default()
            }),
        FieldSchema::new("department", "Department", FieldType::Select)
            .required()
            .with_placeholder("Choose department")
            .with_options(vec![
                FieldOption::new("Engineering", "engineering"),
                FieldOption::new("Product", "product"),
                FieldOption::new("Design", "design"),
                FieldOption::new("Marketing", "marketing"),
                FieldOption::new("Sales", "sales"),
                FieldOption::new("People Ops", "people-ops"),
            ]),
        FieldSchema::new("skills", "Primary Skills", FieldType::MultiSelect)
            .required()
            .with_placeholder("Select at least one")
            .with_options(vec![
                FieldOption::new("React", "react"),
                FieldOption::new("TypeScript", "typescript"),
                FieldOption::new("Node.js", "node"),
                FieldOption::new("SQL", "sql"),
                FieldOption::new("UX Research", "ux"),
                FieldOption::new("Go", "go"),
                FieldOption::new("Python", "python"),
            ])
            .with_validations(FieldValidations {
                min_selected: Some(1),
                max_selected: Some(5),
                ..Default::default()
            }),
        FieldSchema::new("startDate", "Start Date", FieldType::Date)
            .required()
            .with_placeholder("YYYY-MM-DD")
            .with_validations(FieldValidations {
                min_date: Some(today.format("%Y-%m-%d").to_string()),
                ..Default::default()
            }),
        FieldSchema::new("bio", "About You", FieldType::Textarea)
            .with_placeholder("Brief background and goals")
            .with_validations(FieldValidations {
                max_length: Some(300),
                ..Default::default()
            }),
        FieldSchema::new("remoteEligible", "Remote Eligible", FieldType::Switch),
    ];

    FormSchema {
        title: "Employee Onboarding".to_string(),
        description: Some("Capture key details to onboard a new hire.".to_string()),
        fields,
    }
}
