//! Validation Property Tests
//!
//! Behaviour of the built-in onboarding form under the validator:
//! - an empty or absent required field yields exactly one error
//! - numeric bounds are inclusive
//! - selection cardinality is checked after element validity
//! - validation is deterministic and never mutates its input

use chrono::{Duration, NaiveDate};
use dynaform::schema::{
    onboarding_schema, CompiledSchema, FieldOption, FieldSchema, FieldType, FieldValidations,
    FormSchema, SchemaError, SchemaLoader, SchemaValidator, Violation,
};
use serde_json::{json, Map, Value};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn compiled() -> CompiledSchema {
    CompiledSchema::compile(onboarding_schema(today())).unwrap()
}

fn valid() -> Map<String, Value> {
    json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "age": 29,
        "department": "design",
        "skills": ["react"],
        "startDate": "2026-11-02",
        "bio": "",
        "remoteEligible": false
    })
    .as_object()
    .cloned()
    .unwrap()
}

fn with(field: &str, value: Value) -> Map<String, Value> {
    let mut values = valid();
    values.insert(field.to_string(), value);
    values
}

// =============================================================================
// Required Fields
// =============================================================================

#[test]
fn test_valid_payload_passes() {
    let compiled = compiled();
    assert!(SchemaValidator::new(&compiled).validate(&valid()).is_empty());
}

/// Every empty representation of a required field yields one Required error.
#[test]
fn test_required_field_empty_or_absent() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);

    for empty in [json!(""), json!("   "), json!(null), json!([])] {
        let errors = validator.validate(&with("fullName", empty.clone()));
        assert_eq!(errors.len(), 1, "value {:?}", empty);
        assert_eq!(errors.get("fullName"), Some(&Violation::Required));
    }

    let mut values = valid();
    values.remove("email");
    let errors = validator.validate(&values);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.message("email").as_deref(), Some("This field is required."));
}

#[test]
fn test_optional_empty_fields_pass() {
    let compiled = compiled();
    let mut values = valid();
    values.remove("bio");
    values.remove("remoteEligible");
    assert!(SchemaValidator::new(&compiled).validate(&values).is_empty());
}

// =============================================================================
// Number Bounds
// =============================================================================

#[test]
fn test_age_bounds_are_inclusive() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);

    assert_eq!(
        validator.validate(&with("age", json!(17))).get("age"),
        Some(&Violation::BelowMin(18.0))
    );
    assert!(validator.validate(&with("age", json!(18))).is_empty());
    assert!(validator.validate(&with("age", json!(70))).is_empty());
    assert_eq!(
        validator.validate(&with("age", json!(71))).get("age"),
        Some(&Violation::AboveMax(70.0))
    );
}

#[test]
fn test_numeric_strings_accepted() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);

    assert!(validator.validate(&with("age", json!("42"))).is_empty());
    assert_eq!(
        validator.validate(&with("age", json!("forty"))).get("age"),
        Some(&Violation::InvalidNumber)
    );
}

// =============================================================================
// Multi-select Cardinality
// =============================================================================

#[test]
fn test_skills_cardinality() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);
    let options = ["react", "typescript", "node", "sql", "ux", "go"];

    assert_eq!(
        validator.validate(&with("skills", json!([]))).get("skills"),
        Some(&Violation::Required)
    );
    for n in 1..=5 {
        let picked: Vec<&str> = options[..n].to_vec();
        assert!(
            validator.validate(&with("skills", json!(picked))).is_empty(),
            "{} picks should pass",
            n
        );
    }
    assert_eq!(
        validator.validate(&with("skills", json!(options))).get("skills"),
        Some(&Violation::TooManySelected(5))
    );
}

#[test]
fn test_repeated_skill_counts_once() {
    let compiled = compiled();
    let errors = SchemaValidator::new(&compiled)
        .validate(&with("skills", json!(["go", "go", "go", "go", "go", "go"])));
    assert!(errors.is_empty());
}

#[test]
fn test_optional_multi_select_with_minimum() {
    let schema = FormSchema::new(
        "Survey",
        vec![FieldSchema::new("topics", "Topics", FieldType::MultiSelect)
            .with_options(vec![
                FieldOption::new("Rust", "rust"),
                FieldOption::new("Go", "go"),
            ])
            .with_validations(FieldValidations {
                min_selected: Some(1),
                max_selected: Some(5),
                ..Default::default()
            })],
    );
    let compiled = CompiledSchema::compile(schema).unwrap();
    let validator = SchemaValidator::new(&compiled);

    let errors = validator.validate(json!({ "topics": [] }).as_object().unwrap());
    assert_eq!(errors.get("topics"), Some(&Violation::TooFewSelected(1)));
    assert_eq!(
        errors.message("topics").as_deref(),
        Some("Pick at least 1 option(s).")
    );

    assert!(validator.validate(&Map::new()).is_empty());
    assert!(validator
        .validate(json!({ "topics": ["rust"] }).as_object().unwrap())
        .is_empty());
}

#[test]
fn test_unknown_option_reported_before_cardinality() {
    let compiled = compiled();
    let errors = SchemaValidator::new(&compiled).validate(&with(
        "skills",
        json!(["react", "node", "python", "go", "sql", "cobol"]),
    ));
    assert_eq!(errors.get("skills"), Some(&Violation::InvalidOptions));
}

// =============================================================================
// Dates, Options, Switches
// =============================================================================

#[test]
fn test_min_date_inclusive() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);

    assert!(validator.validate(&with("startDate", json!("2026-10-19"))).is_empty());
    let yesterday = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();
    assert_eq!(
        validator.validate(&with("startDate", json!(yesterday))).get("startDate"),
        Some(&Violation::BeforeMinDate("2026-10-19".into()))
    );
    assert_eq!(
        validator.validate(&with("startDate", json!("soon"))).get("startDate"),
        Some(&Violation::InvalidDate)
    );
}

#[test]
fn test_select_and_switch() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);

    assert_eq!(
        validator.validate(&with("department", json!("sales-ish"))).get("department"),
        Some(&Violation::InvalidOption)
    );
    assert!(validator.validate(&with("remoteEligible", json!("true"))).is_empty());
    assert_eq!(
        validator.validate(&with("remoteEligible", json!("maybe"))).get("remoteEligible"),
        Some(&Violation::InvalidSwitch)
    );
}

#[test]
fn test_email_pattern() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);

    assert!(validator.validate(&with("email", json!("a.b-c@mail.example.io"))).is_empty());
    assert_eq!(
        validator.validate(&with("email", json!("jane@example"))).get("email"),
        Some(&Violation::PatternMismatch)
    );
}

// =============================================================================
// Determinism and Purity
// =============================================================================

#[test]
fn test_validation_is_deterministic_and_pure() {
    let compiled = compiled();
    let validator = SchemaValidator::new(&compiled);
    let values = with("age", json!(99));
    let snapshot = values.clone();

    let first = validator.validate(&values);
    for _ in 0..50 {
        assert_eq!(validator.validate(&values), first);
    }
    assert_eq!(values, snapshot);
}

#[test]
fn test_undeclared_keys_come_after_declared_fields() {
    let compiled = compiled();
    let mut values = with("age", json!(5));
    values.insert("aaa".into(), json!(1));

    let errors = SchemaValidator::new(&compiled).validate(&values);
    let order: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(order, vec!["age", "aaa"]);
    assert_eq!(errors.first_message().as_deref(), Some("Must be at least 18."));
}

// =============================================================================
// Schema Loading
// =============================================================================

#[test]
fn test_loader_reads_schema_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("form.json");
    let schema = FormSchema::new(
        "Feedback",
        vec![FieldSchema::new("comment", "Comment", FieldType::Textarea)
            .required()
            .with_validations(FieldValidations {
                max_length: Some(10),
                ..Default::default()
            })],
    );
    fs::write(&path, serde_json::to_string(&schema).unwrap()).unwrap();

    let compiled = SchemaLoader::from_file(&path).load(today()).unwrap();
    assert_eq!(compiled.schema().title, "Feedback");

    let errors = SchemaValidator::new(&compiled)
        .validate(json!({ "comment": "far too long text" }).as_object().unwrap());
    assert_eq!(errors.get("comment"), Some(&Violation::TooLong(10)));
}

#[test]
fn test_loader_rejects_broken_schemas() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("form.json");

    fs::write(
        &path,
        r#"{ "title": "T", "fields": [
            { "id": "a", "label": "A", "type": "text" },
            { "id": "a", "label": "B", "type": "text" }
        ] }"#,
    )
    .unwrap();
    assert!(matches!(
        SchemaLoader::from_file(&path).load(today()),
        Err(SchemaError::InvalidStructure(_))
    ));

    fs::write(
        &path,
        r#"{ "title": "T", "fields": [
            { "id": "a", "label": "A", "type": "text", "validations": { "regex": "(" } }
        ] }"#,
    )
    .unwrap();
    assert!(matches!(
        SchemaLoader::from_file(&path).load(today()),
        Err(SchemaError::InvalidPattern { .. })
    ));

    assert!(matches!(
        SchemaLoader::from_file(tmp.path().join("missing.json")).load(today()),
        Err(SchemaError::Unreadable { .. })
    ));
}
