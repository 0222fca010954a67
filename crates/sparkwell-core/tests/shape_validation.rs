// crates/sparkwell-core/tests/shape_validation.rs
// ============================================================================
// Module: Shape Validation Tests
// Description: Tests for structural validation of JSON values against shapes.
// Purpose: Ensure the first violation is reported with a precise path and reason.
// Dependencies: sparkwell-core, serde_json
// ============================================================================
//! ## Overview
//! Validates the therapeutic artifact shape against well-formed and malformed
//! model responses, plus the primitive, literal, and union edge cases.
//!
//! Security posture: Model output is untrusted; nothing may pass unvalidated.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use serde_json::Value;
use serde_json::json;
use sparkwell_core::Field;
use sparkwell_core::Shape;
use sparkwell_core::TherapeuticArtifact;
use sparkwell_core::Violation;
use sparkwell_core::validate;

fn artifact_json() -> Value {
    json!({
        "title": "Box Breathing",
        "reassurance": "It makes sense to feel nervous before something that matters to you.",
        "exercise": "Breathe in for four counts, hold for four, out for four, hold for four.",
        "realizations": [
            "One exam does not define you.",
            "You have prepared more than you think."
        ],
        "instantCopingStrategy": {
            "title": "Cold Water Reset",
            "description": "Splash cold water on your face to slow your heart rate."
        },
        "musicSuggestion": {
            "title": "Theta Waves for Meditation",
            "description": "Gentle theta tones to settle a racing mind."
        }
    })
}

fn artifact_violation(value: &Value) -> Violation {
    validate(&TherapeuticArtifact::shape(), value).expect_err("expected a violation")
}

#[test]
fn well_formed_artifact_passes() {
    validate(&TherapeuticArtifact::shape(), &artifact_json()).unwrap();
}

#[test]
fn artifact_without_music_suggestion_passes() {
    let mut value = artifact_json();
    value.as_object_mut().unwrap().remove("musicSuggestion");
    validate(&TherapeuticArtifact::shape(), &value).unwrap();
}

#[test]
fn missing_required_field_reports_its_name() {
    let mut value = artifact_json();
    value.as_object_mut().unwrap().remove("reassurance");
    let violation = artifact_violation(&value);
    assert_eq!(violation.path, "reassurance");
    assert_eq!(violation.reason, "missing required field");
}

#[test]
fn empty_realizations_violate_minimum() {
    let mut value = artifact_json();
    value["realizations"] = json!([]);
    let violation = artifact_violation(&value);
    assert_eq!(violation.path, "realizations");
    assert_eq!(violation.reason, "expected at least 1 items, found 0");
}

#[test]
fn wrong_element_kind_reports_index() {
    let mut value = artifact_json();
    value["realizations"] = json!(["fine", 7]);
    let violation = artifact_violation(&value);
    assert_eq!(violation.path, "realizations[1]");
    assert_eq!(violation.reason, "expected string, found number");
}

#[test]
fn nested_missing_field_reports_dotted_path() {
    let mut value = artifact_json();
    value["instantCopingStrategy"].as_object_mut().unwrap().remove("title");
    let violation = artifact_violation(&value);
    assert_eq!(violation.path, "instantCopingStrategy.title");
}

#[test]
fn unknown_music_title_fails_enumeration() {
    let mut value = artifact_json();
    value["musicSuggestion"]["title"] = json!("Lo-fi Beats");
    let violation = artifact_violation(&value);
    assert_eq!(violation.path, "musicSuggestion.title");
    assert!(violation.reason.starts_with("expected literal"));
}

#[test]
fn null_optional_field_is_rejected() {
    let mut value = artifact_json();
    value["musicSuggestion"] = Value::Null;
    let violation = artifact_violation(&value);
    assert_eq!(violation.path, "musicSuggestion");
    assert_eq!(violation.reason, "expected object, found null");
}

#[test]
fn unknown_keys_are_ignored() {
    let mut value = artifact_json();
    value["mood"] = json!("calm");
    validate(&TherapeuticArtifact::shape(), &value).unwrap();
}

#[test]
fn first_violation_wins_in_declaration_order() {
    let value = json!({ "realizations": [] });
    let violation = artifact_violation(&value);
    assert_eq!(violation.path, "title");
}

#[test]
fn root_violation_uses_empty_path() {
    let violation = validate(&TherapeuticArtifact::shape(), &json!("just text")).unwrap_err();
    assert_eq!(violation.path, "");
    assert_eq!(violation.to_string(), "<root>: expected object, found string");
}

#[test]
fn numeric_literals_compare_by_value() {
    validate(&Shape::literal(1), &json!(1.0)).unwrap();
    assert!(validate(&Shape::literal(1), &json!(2)).is_err());
}

#[test]
fn large_integer_literals_compare_exactly() {
    let expected = Shape::literal(9_007_199_254_740_993_u64);
    assert!(validate(&expected, &json!(9_007_199_254_740_992_u64)).is_err());
    validate(&expected, &json!(9_007_199_254_740_993_u64)).unwrap();

    assert!(validate(&Shape::literal(u64::MAX), &json!(-1)).is_err());
    validate(&Shape::literal(-5), &json!(-5)).unwrap();
    validate(&Shape::literal(0.5), &json!(0.5)).unwrap();
}

#[test]
fn string_literal_is_exact() {
    validate(&Shape::literal("direct"), &json!("direct")).unwrap();
    let violation = validate(&Shape::literal("direct"), &json!("Direct")).unwrap_err();
    assert_eq!(violation.reason, "expected literal \"direct\", found \"Direct\"");
}

#[test]
fn union_accepts_any_alternative() {
    let shape = Shape::union(vec![Shape::string(), Shape::number()]);
    validate(&shape, &json!("a")).unwrap();
    validate(&shape, &json!(3)).unwrap();
    let violation = validate(&shape, &json!(true)).unwrap_err();
    assert_eq!(violation.reason, "expected string, found boolean");
}

#[test]
fn empty_union_matches_nothing() {
    let violation = validate(&Shape::union(Vec::new()), &json!(null)).unwrap_err();
    assert_eq!(violation.reason, "union declares no alternatives");
}

#[test]
fn booleans_do_not_satisfy_numbers() {
    let violation = validate(&Shape::number(), &json!(false)).unwrap_err();
    assert_eq!(violation.reason, "expected number, found boolean");
}

#[test]
fn json_schema_lists_required_fields_and_descriptions() {
    let shape = Shape::object(vec![
        Field::required("question", Shape::string()).describe("Clarifying question."),
        Field::optional("note", Shape::array_min(Shape::string(), 2)),
    ]);
    let schema = shape.to_json_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["question"]));
    assert_eq!(schema["properties"]["question"]["description"], "Clarifying question.");
    assert_eq!(schema["properties"]["note"]["minItems"], 2);
    assert_eq!(schema["properties"]["note"]["items"]["type"], "string");
}

#[test]
fn artifact_schema_enumerates_music_titles() {
    let schema = TherapeuticArtifact::shape().to_json_schema();
    let titles = schema["properties"]["musicSuggestion"]["properties"]["title"]["anyOf"]
        .as_array()
        .unwrap();
    assert_eq!(titles.len(), 5);
    assert_eq!(titles[0], json!({ "const": "432Hz Healing Frequency" }));
}
