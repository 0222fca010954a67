// crates/sparkwell-core/src/runtime/triage.rs
// ============================================================================
// Module: Sparkwell Triage
// Description: One-round clarify-or-proceed state machine for user disclosures.
// Purpose: Decide whether a disclosure is ready for final generation or needs one question.
// Dependencies: crate::{core, runtime::contract}, serde, thiserror
// ============================================================================

//! ## Overview
//! Triage classifies an initial disclosure through a prompt contract whose
//! output is either `{type: "question", question}` or `{type: "direct"}`.
//! States: `AwaitingInitial -> AwaitingFollowUp -> Ready`, or
//! `AwaitingInitial -> Ready`. At most one clarifying question is ever asked.
//!
//! Invariants:
//! - [`Triage`] holds no per-conversation state; the caller owns every
//!   [`TriageDecision`] and [`TriageSession`] and must not share them across
//!   conversations.
//! - A follow-up merges as: original text, the separator, then the answer.
//! - There is no timeout; an abandoned session simply stays in
//!   [`TriageState::AwaitingFollowUp`].
//!
//! ## Trust boundary
//! Crisis detection is delegated entirely to the model behind the gateway via
//! the classification instruction. Nothing here verifies it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ErrorKind;
use crate::core::Field;
use crate::core::Shape;
use crate::core::TemplateError;
use crate::core::Violation;
use crate::runtime::contract::ContractContext;
use crate::runtime::contract::ContractError;
use crate::runtime::contract::PromptContract;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Contract identifier of the classification step.
pub const TRIAGE_CONTRACT_ID: &str = "triage.classify";
/// Phrase placed between the original disclosure and the follow-up answer.
pub const DEFAULT_FOLLOW_UP_SEPARATOR: &str = "\n\nFollow-up answer: ";
/// Default upper bound on disclosure length in characters.
pub const DEFAULT_MAX_DISCLOSURE_CHARS: usize = 4_000;

/// Classification instruction.
const TRIAGE_TEMPLATE: &str = r#"You are the intake step of a wellness companion for young adults. Read the user's message and decide whether you can respond helpfully right away, or whether you must first ask exactly one gentle clarifying question.

Choose "question" when the message contains crisis-level distress language: mentions of self-harm, suicide, wanting to die or disappear, feeling hopeless or that nothing will ever get better, or being in danger. Also choose "question" when the message is too vague to understand what the user is going through. The question must be short, warm, and open-ended.

Choose "direct" for ordinary stress, anxiety, worry, sadness, or frustration that is described clearly enough to respond to, for example exam nerves, a fight with a friend, or feeling overwhelmed at work.

User's message:
"{{{disclosure}}}"

Respond with {"type": "question", "question": "<your question>"} or {"type": "direct"}."#;

// ============================================================================
// SECTION: Classification Types
// ============================================================================

/// Input of the classification contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureInput {
    /// Raw disclosure text.
    pub disclosure: String,
}

/// Output of the classification contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriageClassification {
    /// One clarifying question is needed.
    Question {
        /// Question to surface to the user.
        question: String,
    },
    /// The disclosure can be answered directly.
    Direct,
}

impl TriageClassification {
    /// Returns the classification output shape.
    #[must_use]
    pub fn shape() -> Shape {
        Shape::union(vec![
            Shape::object(vec![
                Field::required("type", Shape::literal("question")),
                Field::required("question", Shape::string())
                    .describe("One short, warm, open-ended clarifying question."),
            ]),
            Shape::object(vec![Field::required("type", Shape::literal("direct"))]),
        ])
    }
}

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Pending clarification: the original disclosure and the question asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    /// Original disclosure text.
    disclosure: String,
    /// Clarifying question surfaced to the user.
    question: String,
}

impl FollowUp {
    /// Returns the original disclosure.
    #[must_use]
    pub fn disclosure(&self) -> &str {
        &self.disclosure
    }

    /// Returns the clarifying question.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// Context ready for final generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyContext {
    /// Context text passed to the final contract.
    context: String,
    /// Whether a follow-up answer was merged in.
    merged: bool,
}

impl ReadyContext {
    /// Returns the context text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.context
    }

    /// Consumes the context, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.context
    }

    /// Returns true when the context merges a follow-up answer.
    #[must_use]
    pub const fn was_merged(&self) -> bool {
        self.merged
    }
}

/// Result of classifying a disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriageDecision {
    /// Ask the question, then continue with the answer.
    NeedsFollowUp(FollowUp),
    /// Proceed to final generation.
    Ready(ReadyContext),
}

impl TriageDecision {
    /// Returns the clarifying question, if one is needed.
    #[must_use]
    pub fn question(&self) -> Option<&str> {
        match self {
            Self::NeedsFollowUp(follow_up) => Some(follow_up.question()),
            Self::Ready(_) => None,
        }
    }

    /// Returns true when no follow-up is needed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Triage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    /// Disclosure was empty or whitespace.
    #[error("disclosure is empty")]
    EmptyDisclosure,
    /// Disclosure exceeded the configured length.
    #[error("disclosure exceeds {max} characters ({actual})")]
    DisclosureTooLong {
        /// Configured maximum.
        max: usize,
        /// Actual length.
        actual: usize,
    },
    /// Follow-up answer was empty or whitespace.
    #[error("follow-up answer is empty")]
    EmptyAnswer,
    /// A follow-up was supplied when none was pending.
    #[error("triage is not awaiting a follow-up answer")]
    NotAwaitingFollowUp,
    /// A session was started twice.
    #[error("triage session already started")]
    AlreadyStarted,
    /// Classification contract failed.
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl TriageError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Contract(err) => err.kind(),
            Self::EmptyDisclosure
            | Self::DisclosureTooLong { .. }
            | Self::EmptyAnswer
            | Self::NotAwaitingFollowUp
            | Self::AlreadyStarted => ErrorKind::CallerInput,
        }
    }
}

// ============================================================================
// SECTION: Triage
// ============================================================================

/// Stateless triage step shared by every conversation.
pub struct Triage {
    /// Classification contract.
    contract: PromptContract<DisclosureInput, TriageClassification>,
    /// Merge separator phrase.
    separator: String,
    /// Maximum disclosure length in characters.
    max_disclosure_chars: usize,
}

impl Triage {
    /// Builds triage with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the classification template is invalid.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_settings(DEFAULT_FOLLOW_UP_SEPARATOR, DEFAULT_MAX_DISCLOSURE_CHARS)
    }

    /// Builds triage with an explicit separator and disclosure limit.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the classification template is invalid.
    pub fn with_settings(
        separator: impl Into<String>,
        max_disclosure_chars: usize,
    ) -> Result<Self, TemplateError> {
        let contract = PromptContract::new(
            TRIAGE_CONTRACT_ID,
            Shape::object(vec![Field::required("disclosure", Shape::string())]),
            TriageClassification::shape(),
            TRIAGE_TEMPLATE,
        )?;
        Ok(Self {
            contract,
            separator: separator.into(),
            max_disclosure_chars,
        })
    }

    /// Returns the merge separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the classification contract.
    #[must_use]
    pub const fn contract(&self) -> &PromptContract<DisclosureInput, TriageClassification> {
        &self.contract
    }

    /// Classifies an initial disclosure.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError`] for blank or oversized disclosures, and for
    /// classification failures (including a blank question).
    pub async fn start(
        &self,
        ctx: &ContractContext<'_>,
        disclosure: &str,
    ) -> Result<TriageDecision, TriageError> {
        if disclosure.trim().is_empty() {
            return Err(TriageError::EmptyDisclosure);
        }
        let actual = disclosure.chars().count();
        if actual > self.max_disclosure_chars {
            return Err(TriageError::DisclosureTooLong {
                max: self.max_disclosure_chars,
                actual,
            });
        }

        let input = DisclosureInput {
            disclosure: disclosure.to_string(),
        };
        match self.contract.invoke(ctx, &input).await? {
            TriageClassification::Question { question } => {
                if question.trim().is_empty() {
                    return Err(TriageError::Contract(ContractError::SchemaViolation {
                        contract: self.contract.id().clone(),
                        violation: Violation::new("question", "must not be blank"),
                    }));
                }
                Ok(TriageDecision::NeedsFollowUp(FollowUp {
                    disclosure: input.disclosure,
                    question,
                }))
            }
            TriageClassification::Direct => Ok(TriageDecision::Ready(ReadyContext {
                context: input.disclosure,
                merged: false,
            })),
        }
    }

    /// Merges a follow-up answer into a pending decision.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::NotAwaitingFollowUp`] for a ready decision and
    /// [`TriageError::EmptyAnswer`] for a blank answer.
    pub fn continue_with(
        &self,
        decision: TriageDecision,
        answer: &str,
    ) -> Result<ReadyContext, TriageError> {
        let TriageDecision::NeedsFollowUp(follow_up) = decision else {
            return Err(TriageError::NotAwaitingFollowUp);
        };
        if answer.trim().is_empty() {
            return Err(TriageError::EmptyAnswer);
        }
        let mut context = follow_up.disclosure;
        context.push_str(&self.separator);
        context.push_str(answer);
        Ok(ReadyContext {
            context,
            merged: true,
        })
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Triage state for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriageState {
    /// No disclosure classified yet.
    #[default]
    AwaitingInitial,
    /// A clarifying question is pending.
    AwaitingFollowUp(FollowUp),
    /// Context is ready for final generation (terminal).
    Ready(ReadyContext),
}

/// Caller-owned triage session enforcing state transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSession {
    /// Current state.
    state: TriageState,
}

impl TriageSession {
    /// Creates a session awaiting its initial disclosure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &TriageState {
        &self.state
    }

    /// Returns the ready context once the session is terminal.
    #[must_use]
    pub const fn ready_context(&self) -> Option<&ReadyContext> {
        match &self.state {
            TriageState::Ready(ready) => Some(ready),
            TriageState::AwaitingInitial | TriageState::AwaitingFollowUp(_) => None,
        }
    }

    /// Classifies the initial disclosure. Failures leave the session unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::AlreadyStarted`] outside `AwaitingInitial`, or
    /// any error from [`Triage::start`].
    pub async fn start(
        &mut self,
        triage: &Triage,
        ctx: &ContractContext<'_>,
        disclosure: &str,
    ) -> Result<&TriageState, TriageError> {
        if self.state != TriageState::AwaitingInitial {
            return Err(TriageError::AlreadyStarted);
        }
        self.state = match triage.start(ctx, disclosure).await? {
            TriageDecision::NeedsFollowUp(follow_up) => TriageState::AwaitingFollowUp(follow_up),
            TriageDecision::Ready(ready) => TriageState::Ready(ready),
        };
        Ok(&self.state)
    }

    /// Supplies the single follow-up answer.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::NotAwaitingFollowUp`] outside `AwaitingFollowUp`,
    /// or [`TriageError::EmptyAnswer`] for a blank answer.
    pub fn answer(&mut self, triage: &Triage, answer: &str) -> Result<&ReadyContext, TriageError> {
        let TriageState::AwaitingFollowUp(follow_up) = &self.state else {
            return Err(TriageError::NotAwaitingFollowUp);
        };
        let ready =
            triage.continue_with(TriageDecision::NeedsFollowUp(follow_up.clone()), answer)?;
        self.state = TriageState::Ready(ready);
        self.ready_context().ok_or(TriageError::NotAwaitingFollowUp)
    }
}
