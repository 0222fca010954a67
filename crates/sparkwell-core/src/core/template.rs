// crates/sparkwell-core/src/core/template.rs
// ============================================================================
// Module: Sparkwell Instruction Templates
// Description: Parsed instruction templates with field substitution and conditional blocks.
// Purpose: Render natural-language instructions from structured contract input.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Templates are parsed once, when a prompt contract is built, and rendered
//! for every invocation. Supported tags:
//! - `{{{field}}}` substitutes the raw value, `{{field}}` HTML-escapes it.
//! - `{{#if field}} .. {{else}} .. {{/if}}` renders a block only when the field
//!   is truthy (present, not `null`, `false`, `""`, `0`, or `[]`).
//! - `{{! comment}}` renders nothing.
//!
//! Field names may be dotted (`a.b`). Non-object inputs are bound to the
//! name `input`. Missing fields render as empty text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name bound to non-object template inputs.
pub const INPUT_BINDING: &str = "input";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template definition errors raised at parse time.
///
/// # Invariants
/// - Offsets are byte offsets into the template source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{{` tag was never closed.
    #[error("unclosed tag at offset {offset}")]
    UnclosedTag {
        /// Byte offset of the tag opener.
        offset: usize,
    },
    /// A tag had no field name.
    #[error("empty tag at offset {offset}")]
    EmptyTag {
        /// Byte offset of the tag opener.
        offset: usize,
    },
    /// A field name contained invalid characters or empty segments.
    #[error("invalid field name: {field}")]
    InvalidField {
        /// Offending field name.
        field: String,
    },
    /// A `{{/if}}` or `{{else}}` appeared outside a block.
    #[error("unexpected {tag} at offset {offset}")]
    UnexpectedTag {
        /// Offending tag text.
        tag: String,
        /// Byte offset of the tag opener.
        offset: usize,
    },
    /// A block opened with `{{#if}}` was never closed.
    #[error("unclosed block for field {field}")]
    UnclosedBlock {
        /// Field the block is keyed on.
        field: String,
    },
    /// A helper other than `if` was used.
    #[error("unsupported tag: {tag}")]
    Unsupported {
        /// Offending tag text.
        tag: String,
    },
    /// The template references a field the input shape does not declare.
    #[error("template references undeclared field: {field}")]
    UndeclaredField {
        /// Offending field name.
        field: String,
    },
}

// ============================================================================
// SECTION: Template Types
// ============================================================================

/// Parsed template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text.
    Text(String),
    /// Field substitution.
    Field {
        /// Dotted lookup path.
        path: Vec<String>,
        /// Whether the rendered value is HTML-escaped.
        escape: bool,
    },
    /// Conditional block.
    Conditional {
        /// Dotted lookup path of the condition field.
        path: Vec<String>,
        /// Segments rendered when the field is truthy.
        then: Vec<Segment>,
        /// Segments rendered otherwise.
        otherwise: Vec<Segment>,
    },
}

/// Open `{{#if}}` block during parsing.
struct OpenBlock {
    /// Condition path.
    path: Vec<String>,
    /// Segments collected before `{{else}}`.
    then: Vec<Segment>,
    /// Segments collected after `{{else}}`.
    otherwise: Vec<Segment>,
    /// Whether `{{else}}` has been seen.
    in_else: bool,
}

/// Parsed instruction template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Original template source.
    source: String,
    /// Parsed segments.
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parses a template source.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let segments = parse_segments(source)?;
        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Returns the template source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the distinct top-level field names the template references.
    #[must_use]
    pub fn referenced_fields(&self) -> BTreeSet<String> {
        let mut fields = BTreeSet::new();
        collect_roots(&self.segments, &mut fields);
        fields
    }

    /// Renders the template against an input value.
    #[must_use]
    pub fn render(&self, input: &Value) -> String {
        let mut bound = Map::new();
        let context = match input {
            Value::Object(map) => map,
            other => {
                bound.insert(INPUT_BINDING.to_string(), other.clone());
                &bound
            }
        };
        let mut out = String::with_capacity(self.source.len());
        render_segments(&self.segments, context, &mut out);
        out
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses template source into segments.
fn parse_segments(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut root = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        push_text(target(&mut root, &mut stack), &rest[.. start]);
        let tag_start = &rest[start ..];
        let offset = source.len() - tag_start.len();
        let (raw, inner, consumed) = if let Some(body) = tag_start.strip_prefix("{{{") {
            let end = body.find("}}}").ok_or(TemplateError::UnclosedTag { offset })?;
            (true, body[.. end].trim(), 3 + end + 3)
        } else {
            let body = &tag_start[2 ..];
            let end = body.find("}}").ok_or(TemplateError::UnclosedTag { offset })?;
            (false, body[.. end].trim(), 2 + end + 2)
        };
        rest = &tag_start[consumed ..];

        if inner.is_empty() {
            return Err(TemplateError::EmptyTag { offset });
        }
        if raw {
            let path = parse_path(inner)?;
            target(&mut root, &mut stack).push(Segment::Field { path, escape: false });
            continue;
        }
        if inner.starts_with('!') {
            continue;
        }
        if let Some(field) = inner
            .strip_prefix("#if")
            .filter(|field| field.is_empty() || field.starts_with(char::is_whitespace))
        {
            let field = field.trim();
            if field.is_empty() {
                return Err(TemplateError::EmptyTag { offset });
            }
            stack.push(OpenBlock {
                path: parse_path(field)?,
                then: Vec::new(),
                otherwise: Vec::new(),
                in_else: false,
            });
            continue;
        }
        if inner == "else" {
            match stack.last_mut() {
                Some(block) if !block.in_else => block.in_else = true,
                _ => {
                    return Err(TemplateError::UnexpectedTag {
                        tag: inner.to_string(),
                        offset,
                    });
                }
            }
            continue;
        }
        if inner == "/if" {
            let Some(block) = stack.pop() else {
                return Err(TemplateError::UnexpectedTag {
                    tag: inner.to_string(),
                    offset,
                });
            };
            target(&mut root, &mut stack).push(Segment::Conditional {
                path: block.path,
                then: block.then,
                otherwise: block.otherwise,
            });
            continue;
        }
        if inner.starts_with('#') || inner.starts_with('/') || inner.starts_with('>') {
            return Err(TemplateError::Unsupported {
                tag: inner.to_string(),
            });
        }
        let path = parse_path(inner)?;
        target(&mut root, &mut stack).push(Segment::Field { path, escape: true });
    }
    push_text(target(&mut root, &mut stack), rest);

    if let Some(block) = stack.pop() {
        return Err(TemplateError::UnclosedBlock {
            field: block.path.join("."),
        });
    }
    Ok(root)
}

/// Returns the segment list currently being filled.
fn target<'a>(root: &'a mut Vec<Segment>, stack: &'a mut [OpenBlock]) -> &'a mut Vec<Segment> {
    match stack.last_mut() {
        Some(block) if block.in_else => &mut block.otherwise,
        Some(block) => &mut block.then,
        None => root,
    }
}

/// Appends literal text, merging with a preceding text segment.
fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(existing)) = segments.last_mut() {
        existing.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Parses a dotted field path.
fn parse_path(field: &str) -> Result<Vec<String>, TemplateError> {
    let valid = |part: &str| {
        !part.is_empty()
            && part.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
    };
    let parts: Vec<&str> = field.split('.').collect();
    if parts.iter().copied().all(valid) {
        Ok(parts.into_iter().map(str::to_string).collect())
    } else {
        Err(TemplateError::InvalidField {
            field: field.to_string(),
        })
    }
}

/// Collects top-level field names from segments.
fn collect_roots(segments: &[Segment], fields: &mut BTreeSet<String>) {
    for segment in segments {
        match segment {
            Segment::Text(_) => {}
            Segment::Field { path, .. } => {
                if let Some(root) = path.first() {
                    fields.insert(root.clone());
                }
            }
            Segment::Conditional { path, then, otherwise } => {
                if let Some(root) = path.first() {
                    fields.insert(root.clone());
                }
                collect_roots(then, fields);
                collect_roots(otherwise, fields);
            }
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders segments into the output buffer.
fn render_segments(segments: &[Segment], context: &Map<String, Value>, out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Field { path, escape } => {
                if let Some(value) = lookup(context, path) {
                    let text = value_text(value);
                    if *escape {
                        push_escaped(out, &text);
                    } else {
                        out.push_str(&text);
                    }
                }
            }
            Segment::Conditional { path, then, otherwise } => {
                if is_truthy(lookup(context, path)) {
                    render_segments(then, context, out);
                } else {
                    render_segments(otherwise, context, out);
                }
            }
        }
    }
}

/// Resolves a dotted path against the context.
fn lookup<'a>(context: &'a Map<String, Value>, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = context.get(first)?;
    for part in rest {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Returns whether a looked-up value enables a conditional block.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Bool(true) | Value::Object(_)) => true,
    }
}

/// Renders a value as instruction text.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Appends text with HTML-sensitive characters escaped.
fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            other => out.push(other),
        }
    }
}
