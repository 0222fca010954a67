// crates/sparkwell-core/src/runtime/mod.rs
// ============================================================================
// Module: Sparkwell Runtime
// Description: Prompt contract invocation, triage, and in-tree gateway helpers.
// Purpose: Execute prompt contracts against a generation gateway.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules turn contract descriptors into gateway calls and enforce
//! output shapes before any value reaches the caller. Every flow in the
//! workspace goes through [`PromptContract::invoke`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod contract;
pub mod observer;
pub mod scripted;
pub mod triage;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use contract::ContractContext;
pub use contract::ContractError;
pub use contract::PromptContract;
pub use observer::JsonLineObserver;
pub use scripted::GatewayCall;
pub use scripted::ScriptedGateway;
pub use triage::DEFAULT_FOLLOW_UP_SEPARATOR;
pub use triage::DEFAULT_MAX_DISCLOSURE_CHARS;
pub use triage::DisclosureInput;
pub use triage::FollowUp;
pub use triage::ReadyContext;
pub use triage::TRIAGE_CONTRACT_ID;
pub use triage::Triage;
pub use triage::TriageClassification;
pub use triage::TriageDecision;
pub use triage::TriageError;
pub use triage::TriageSession;
pub use triage::TriageState;
