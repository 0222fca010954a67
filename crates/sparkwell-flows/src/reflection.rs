// crates/sparkwell-flows/src/reflection.rs
// ============================================================================
// Module: Sparkwell Thought Reflection
// Description: Short mirror-style reflection on a single shared thought.
// Purpose: Bound whisper input length and request a validated reflection.
// Dependencies: crate::error, sparkwell-config, sparkwell-core, serde
// ============================================================================

//! ## Overview
//! A "whisper" is one short thought the user shares. The contract input is
//! the bare string, bound in the template as `input`; the output is a single
//! `reflection` field. Length bounds come from `[limits]` and are checked
//! before the gateway is called.

use serde::Deserialize;
use serde::Serialize;
use sparkwell_config::LimitsConfig;
use sparkwell_core::Field;
use sparkwell_core::PromptContract;
use sparkwell_core::Shape;
use sparkwell_core::TemplateError;

use crate::error::FlowError;

/// Contract identifier of the reflection flow.
pub const REFLECTION_CONTRACT_ID: &str = "flows.reflect_on_thought";

/// Reflection instruction.
const REFLECTION_TEMPLATE: &str = r#"You are a wellness companion. A user has shared the thought below. Offer a short, supportive, insightful reflection on it.

Be gentle and empathetic. Do not preach or give unsolicited advice. Act as a soft mirror that helps the user see their own thought in a new light, framed as a gentle observation or a thoughtful question.

The goal is comfort and self-reflection, not solving their problems. Keep it to two or three sentences.

User's thought:
"{{{input}}}""#;

/// Output of the reflection contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    /// Reflection text.
    pub reflection: String,
}

/// Reflection contract type.
pub type ReflectionContract = PromptContract<String, Reflection>;

/// Builds the reflection contract.
///
/// # Errors
///
/// Returns [`TemplateError`] when the instruction template is invalid.
pub fn reflection_contract() -> Result<ReflectionContract, TemplateError> {
    PromptContract::new(
        REFLECTION_CONTRACT_ID,
        Shape::string(),
        Shape::object(vec![
            Field::required("reflection", Shape::string())
                .describe("A short, gentle reflection of two or three sentences."),
        ]),
        REFLECTION_TEMPLATE,
    )
}

/// Checks a thought against the configured whisper bounds.
///
/// Leading and trailing whitespace does not count toward the length.
///
/// # Errors
///
/// Returns [`FlowError::EmptyInput`] for a blank thought and
/// [`FlowError::ThoughtLength`] when the trimmed length is out of bounds.
pub fn check_thought(limits: &LimitsConfig, thought: &str) -> Result<(), FlowError> {
    let trimmed = thought.trim();
    if trimmed.is_empty() {
        return Err(FlowError::EmptyInput { field: "thought" });
    }
    let actual = trimmed.chars().count();
    if actual < limits.whisper_min_chars || actual > limits.whisper_max_chars {
        return Err(FlowError::ThoughtLength {
            min: limits.whisper_min_chars,
            max: limits.whisper_max_chars,
            actual,
        });
    }
    Ok(())
}
