// crates/sparkwell-flows/src/echo.rs
// ============================================================================
// Module: Sparkwell Future-Self Echo
// Description: Supportive first-person message from the user's future self.
// Purpose: Request a titled echo, weaving in an optional future goal.
// Dependencies: sparkwell-core, serde
// ============================================================================

//! ## Overview
//! The echo contract takes the user's current situation and an optional goal.
//! The goal paragraph of the instruction sits in a `{{#if goal}}` block, so an
//! absent goal removes it entirely.

use serde::Deserialize;
use serde::Serialize;
use sparkwell_core::Field;
use sparkwell_core::PromptContract;
use sparkwell_core::Shape;
use sparkwell_core::TemplateError;

/// Contract identifier of the future-self echo flow.
pub const FUTURE_SELF_ECHO_CONTRACT_ID: &str = "flows.future_self_echo";

/// Echo instruction.
const FUTURE_SELF_ECHO_TEMPLATE: &str = r#"You embody a wise, compassionate, and successful future version of the user, about ten years from now. The user shares a current situation, worry, or aspiration, and may share a future goal.

Write a short, supportive "memory" from your perspective as their future self, looking back at this exact moment and remembering how you navigated it. The tone is warm, reassuring, and gently wise. Do not give direct advice; reframe the current struggle as a temporary chapter in a longer, successful story.

User's current situation:
"{{{situation}}}"
{{#if goal}}
User's future goal:
"{{{goal}}}"

Weave this goal into the memory and show how this moment became a stepping stone toward it.
{{/if}}
Generate the following:
1. title: A short, inspiring title, for example "A Letter to My Past Self" or "I Remember When".
2. echo: The message in the first person, opening with something like "I remember that feeling so vividly...". Acknowledge and validate the feeling, share a glimpse of the growth that came from it, and end on a hopeful, patient note."#;

/// Input of the future-self echo contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoInput {
    /// Current situation, worry, or aspiration.
    pub situation: String,
    /// Optional future goal; omitted from the wire form when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl EchoInput {
    /// Creates input, treating a blank goal as absent.
    #[must_use]
    pub fn new(situation: impl Into<String>, goal: Option<&str>) -> Self {
        Self {
            situation: situation.into(),
            goal: goal.map(str::trim).filter(|goal| !goal.is_empty()).map(str::to_string),
        }
    }
}

/// Output of the future-self echo contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureSelfEcho {
    /// Short inspiring title.
    pub title: String,
    /// First-person message from the future self.
    pub echo: String,
}

/// Future-self echo contract type.
pub type FutureSelfEchoContract = PromptContract<EchoInput, FutureSelfEcho>;

/// Builds the future-self echo contract.
///
/// # Errors
///
/// Returns [`TemplateError`] when the instruction template is invalid.
pub fn future_self_echo_contract() -> Result<FutureSelfEchoContract, TemplateError> {
    PromptContract::new(
        FUTURE_SELF_ECHO_CONTRACT_ID,
        Shape::object(vec![
            Field::required("situation", Shape::string())
                .describe("The current situation, worry, or aspiration of the user."),
            Field::optional("goal", Shape::string())
                .describe("A future goal or dream the user has."),
        ]),
        Shape::object(vec![
            Field::required("title", Shape::string())
                .describe("A short, inspiring title for the message."),
            Field::required("echo", Shape::string())
                .describe("A first-person memory from the user's future self."),
        ]),
        FUTURE_SELF_ECHO_TEMPLATE,
    )
}
