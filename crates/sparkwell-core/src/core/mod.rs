// crates/sparkwell-core/src/core/mod.rs
// ============================================================================
// Module: Sparkwell Core Types
// Description: Shapes, templates, media payloads, and artifact types.
// Purpose: Provide the pure data model shared by every Sparkwell crate.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types are pure, immutable descriptors and values. Nothing here
//! performs I/O or holds cross-call state.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod artifact;
pub mod failure;
pub mod identifiers;
pub mod media;
pub mod shape;
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifact::CopingStrategy;
pub use artifact::MusicSuggestion;
pub use artifact::MusicTitle;
pub use artifact::TherapeuticArtifact;
pub use failure::ErrorKind;
pub use identifiers::ContractId;
pub use media::DEFAULT_BIT_DEPTH;
pub use media::DEFAULT_CHANNELS;
pub use media::DEFAULT_SAMPLE_RATE;
pub use media::GeneratedImage;
pub use media::PcmBuffer;
pub use media::PcmFormat;
pub use media::VoiceParams;
pub use shape::Field;
pub use shape::PrimitiveKind;
pub use shape::Shape;
pub use shape::Violation;
pub use shape::validate;
pub use template::INPUT_BINDING;
pub use template::PromptTemplate;
pub use template::TemplateError;
