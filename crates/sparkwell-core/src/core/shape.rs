// crates/sparkwell-core/src/core/shape.rs
// ============================================================================
// Module: Sparkwell Shapes
// Description: Declarative shapes and the fail-fast structural validator.
// Purpose: Describe and check the form of structured values exchanged with models.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Shape`] is a pure, immutable descriptor of a JSON value: a primitive,
//! an object with required or optional fields, an array, an ordered union, or
//! an exact literal. [`validate`] walks a value against a shape and reports the
//! first violation only, with a dotted/indexed path to the failing location.
//! Invariants:
//! - Shapes are built statically and are never cyclic, so validation terminates.
//! - Union failures report the first alternative's violation, never a "best" match.
//! - Optional fields must be absent when unset; a present `null` is checked
//!   against the field shape like any other value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::fmt;

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Shape Types
// ============================================================================

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// JSON string.
    String,
    /// JSON number (integer or float).
    Number,
    /// JSON boolean.
    Boolean,
}

impl PrimitiveKind {
    /// Returns the JSON Schema type name for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Returns true when the value has this kind.
    const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Number(_))
                | (Self::Boolean, Value::Bool(_))
        )
    }
}

/// Declared field of an object shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name as it appears in the JSON object.
    pub name: String,
    /// Shape of the field value.
    pub shape: Shape,
    /// Whether the field must be present.
    pub required: bool,
    /// Optional guidance forwarded to the model in JSON Schema form.
    pub description: Option<String>,
}

impl Field {
    /// Declares a required field.
    #[must_use]
    pub fn required(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            required: true,
            description: None,
        }
    }

    /// Declares an optional field.
    #[must_use]
    pub fn optional(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            required: false,
            description: None,
        }
    }

    /// Attaches a description to the field.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Structural descriptor for a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Primitive value of a fixed kind.
    Primitive(PrimitiveKind),
    /// Object with declared fields; undeclared keys are ignored.
    Object(Vec<Field>),
    /// Homogeneous array.
    Array {
        /// Shape of every element.
        element: Box<Shape>,
        /// Optional minimum number of elements.
        min_items: Option<usize>,
    },
    /// Ordered list of alternatives; the first match wins.
    Union(Vec<Shape>),
    /// Exact string, number, or boolean value.
    Literal(Value),
}

impl Shape {
    /// String primitive.
    #[must_use]
    pub const fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    /// Number primitive.
    #[must_use]
    pub const fn number() -> Self {
        Self::Primitive(PrimitiveKind::Number)
    }

    /// Boolean primitive.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Boolean)
    }

    /// Object with the given fields.
    #[must_use]
    pub const fn object(fields: Vec<Field>) -> Self {
        Self::Object(fields)
    }

    /// Array without a length constraint.
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array {
            element: Box::new(element),
            min_items: None,
        }
    }

    /// Array requiring at least `min_items` elements.
    #[must_use]
    pub fn array_min(element: Self, min_items: usize) -> Self {
        Self::Array {
            element: Box::new(element),
            min_items: Some(min_items),
        }
    }

    /// Ordered union of alternatives.
    #[must_use]
    pub const fn union(alternatives: Vec<Self>) -> Self {
        Self::Union(alternatives)
    }

    /// Exact literal value.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Union of string literals, in order.
    #[must_use]
    pub fn one_of_strings(values: &[&str]) -> Self {
        Self::Union(values.iter().map(|value| Self::literal(*value)).collect())
    }

    /// Renders the shape as a JSON Schema document fragment.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        match self {
            Self::Primitive(kind) => json!({ "type": kind.as_str() }),
            Self::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in fields {
                    let mut schema = field.shape.to_json_schema();
                    if let (Some(description), Value::Object(map)) =
                        (&field.description, &mut schema)
                    {
                        map.insert("description".to_string(), Value::String(description.clone()));
                    }
                    properties.insert(field.name.clone(), schema);
                    if field.required {
                        required.push(Value::String(field.name.clone()));
                    }
                }
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                })
            }
            Self::Array { element, min_items } => {
                let mut schema = json!({ "type": "array", "items": element.to_json_schema() });
                if let (Some(min), Value::Object(map)) = (min_items, &mut schema) {
                    map.insert("minItems".to_string(), json!(min));
                }
                schema
            }
            Self::Union(alternatives) => json!({
                "anyOf": alternatives.iter().map(Self::to_json_schema).collect::<Vec<_>>(),
            }),
            Self::Literal(value) => json!({ "const": value }),
        }
    }
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// First structural violation found while validating a value.
///
/// # Invariants
/// - `path` is empty for the root, fields join with `.`, elements append `[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {reason}", display_path(.path))]
pub struct Violation {
    /// Locator of the failing value.
    pub path: String,
    /// Human-readable failure reason.
    pub reason: String,
}

impl Violation {
    /// Creates a violation at the given path.
    #[must_use]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Renders a path for messages, naming the root explicitly.
fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates `value` against `shape`, stopping at the first violation.
///
/// # Errors
///
/// Returns [`Violation`] describing the first failing location.
pub fn validate(shape: &Shape, value: &Value) -> Result<(), Violation> {
    validate_at(shape, value, "")
}

/// Recursive validator carrying the current path.
fn validate_at(shape: &Shape, value: &Value, path: &str) -> Result<(), Violation> {
    match shape {
        Shape::Primitive(kind) => {
            if kind.matches(value) {
                Ok(())
            } else {
                Err(Violation::new(
                    path,
                    format!("expected {}, found {}", kind.as_str(), kind_of(value)),
                ))
            }
        }
        Shape::Object(fields) => {
            let Value::Object(map) = value else {
                return Err(Violation::new(
                    path,
                    format!("expected object, found {}", kind_of(value)),
                ));
            };
            for field in fields {
                let field_path = join_field(path, &field.name);
                match map.get(&field.name) {
                    Some(inner) => validate_at(&field.shape, inner, &field_path)?,
                    None if field.required => {
                        return Err(Violation::new(field_path, "missing required field"));
                    }
                    None => {}
                }
            }
            Ok(())
        }
        Shape::Array { element, min_items } => {
            let Value::Array(items) = value else {
                return Err(Violation::new(
                    path,
                    format!("expected array, found {}", kind_of(value)),
                ));
            };
            if let Some(min) = min_items
                && items.len() < *min
            {
                return Err(Violation::new(
                    path,
                    format!("expected at least {min} items, found {}", items.len()),
                ));
            }
            for (index, item) in items.iter().enumerate() {
                validate_at(element, item, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
        Shape::Union(alternatives) => {
            let mut first_failure = None;
            for alternative in alternatives {
                match validate_at(alternative, value, path) {
                    Ok(()) => return Ok(()),
                    Err(violation) => {
                        if first_failure.is_none() {
                            first_failure = Some(violation);
                        }
                    }
                }
            }
            Err(first_failure
                .unwrap_or_else(|| Violation::new(path, "union declares no alternatives")))
        }
        Shape::Literal(expected) => {
            if literal_matches(expected, value) {
                Ok(())
            } else {
                Err(Violation::new(path, format!("expected literal {expected}, found {value}")))
            }
        }
    }
}

/// Compares a literal, treating numbers numerically.
///
/// Integers compare exactly; floats are only involved when either side is one.
fn literal_matches(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(left), Value::Number(right)) => numbers_equal(left, right),
        _ => expected == actual,
    }
}

/// Compares two JSON numbers without rounding integers through `f64`.
fn numbers_equal(left: &Number, right: &Number) -> bool {
    if left.is_f64() || right.is_f64() {
        return match (left.as_f64(), right.as_f64()) {
            (Some(left), Some(right)) => left.partial_cmp(&right) == Some(Ordering::Equal),
            _ => false,
        };
    }
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return left == right;
    }
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return left == right;
    }
    false
}

/// Appends a field name to a path.
fn join_field(path: &str, name: &str) -> String {
    if path.is_empty() { name.to_string() } else { format!("{path}.{name}") }
}

/// Returns the JSON kind label of a value.
const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.as_str()),
            Self::Object(fields) => write!(f, "object({} fields)", fields.len()),
            Self::Array { element, .. } => write!(f, "array<{element}>"),
            Self::Union(alternatives) => write!(f, "union({} alternatives)", alternatives.len()),
            Self::Literal(value) => write!(f, "literal {value}"),
        }
    }
}
