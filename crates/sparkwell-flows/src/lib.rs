// crates/sparkwell-flows/src/lib.rs
// ============================================================================
// Module: Sparkwell Flows Library
// Description: Concrete wellness flows and the Companion facade.
// Purpose: Expose every user-facing action behind one validated entry point.
// Dependencies: crate::{audio, avatar, companion, echo, error, reflection, spark}
// ============================================================================

//! ## Overview
//! Each flow is either a prompt contract (cognitive spark, reflection,
//! future-self echo) or a gateway chain (narration, text to speech,
//! soundscape, avatar). [`Companion`] wires them to one gateway, one
//! observer, and one validated configuration.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audio;
pub mod avatar;
pub mod companion;
pub mod echo;
pub mod error;
pub mod reflection;
pub mod spark;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audio::soundscape_instruction;
pub use avatar::avatar_instruction;
pub use avatar::generate_avatar;
pub use companion::Companion;
pub use echo::EchoInput;
pub use echo::FUTURE_SELF_ECHO_CONTRACT_ID;
pub use echo::FutureSelfEcho;
pub use echo::FutureSelfEchoContract;
pub use echo::future_self_echo_contract;
pub use error::FlowError;
pub use reflection::REFLECTION_CONTRACT_ID;
pub use reflection::Reflection;
pub use reflection::ReflectionContract;
pub use reflection::check_thought;
pub use reflection::reflection_contract;
pub use spark::COGNITIVE_SPARK_CONTRACT_ID;
pub use spark::CognitiveSparkContract;
pub use spark::NARRATION_SEPARATOR;
pub use spark::SparkInput;
pub use spark::cognitive_spark_contract;
pub use spark::narration_script;
