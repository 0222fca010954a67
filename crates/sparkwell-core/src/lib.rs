// crates/sparkwell-core/src/lib.rs
// ============================================================================
// Module: Sparkwell Core Library
// Description: Public API surface for the Sparkwell core.
// Purpose: Expose shapes, prompt contracts, the gateway boundary, and triage.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Sparkwell core turns free-form model output into validated, typed values.
//! Prompt contracts bind an instruction template to input and output shapes,
//! the generation gateway hides every provider detail, and triage decides
//! whether a disclosure needs one clarifying question before generation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ContractEvent;
pub use interfaces::ContractObserver;
pub use interfaces::ContractPhase;
pub use interfaces::GatewayError;
pub use interfaces::GenerationGateway;
pub use interfaces::NoopObserver;
pub use runtime::ContractContext;
pub use runtime::ContractError;
pub use runtime::DEFAULT_FOLLOW_UP_SEPARATOR;
pub use runtime::DEFAULT_MAX_DISCLOSURE_CHARS;
pub use runtime::FollowUp;
pub use runtime::GatewayCall;
pub use runtime::JsonLineObserver;
pub use runtime::PromptContract;
pub use runtime::ReadyContext;
pub use runtime::ScriptedGateway;
pub use runtime::Triage;
pub use runtime::TriageClassification;
pub use runtime::TriageDecision;
pub use runtime::TriageError;
pub use runtime::TriageSession;
pub use runtime::TriageState;
