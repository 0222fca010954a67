// crates/sparkwell-flows/src/error.rs
// ============================================================================
// Module: Sparkwell Flow Errors
// Description: Single error surface for every companion flow.
// Purpose: Keep each underlying failure inspectable while classifying it once.
// Dependencies: sparkwell-config, sparkwell-core, sparkwell-media, thiserror
// ============================================================================

//! ## Overview
//! [`FlowError`] wraps the error of whichever stage failed and adds the
//! caller-input checks the flows perform before any gateway call.
//! [`FlowError::kind`] forwards to the wrapped error's classification.

use sparkwell_config::ConfigError;
use sparkwell_core::ContractError;
use sparkwell_core::ErrorKind;
use sparkwell_core::GatewayError;
use sparkwell_core::TemplateError;
use sparkwell_core::TriageError;
use sparkwell_media::DataUriError;
use sparkwell_media::SpeechError;
use thiserror::Error;

/// Companion flow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A built-in instruction template failed to parse.
    #[error("flow template is invalid: {0}")]
    Template(#[from] TemplateError),
    /// A required text input was blank.
    #[error("{field} is empty")]
    EmptyInput {
        /// Name of the blank input.
        field: &'static str,
    },
    /// A thought fell outside the configured length bounds.
    #[error("thought must be between {min} and {max} characters ({actual})")]
    ThoughtLength {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
        /// Actual trimmed length.
        actual: usize,
    },
    /// Triage failed.
    #[error(transparent)]
    Triage(#[from] TriageError),
    /// A structured contract failed.
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Speech synthesis failed.
    #[error(transparent)]
    Speech(#[from] SpeechError),
    /// Image generation failed.
    #[error("image generation failed: {0}")]
    Image(#[source] GatewayError),
    /// The image backend returned no bytes.
    #[error("failed to generate avatar: no image data returned")]
    NoImage,
    /// Image bytes could not be packaged.
    #[error(transparent)]
    Packaging(#[from] DataUriError),
}

impl FlowError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_)
            | Self::Template(_)
            | Self::EmptyInput { .. }
            | Self::ThoughtLength { .. } => ErrorKind::CallerInput,
            Self::Triage(err) => err.kind(),
            Self::Contract(err) => err.kind(),
            Self::Speech(err) => err.kind(),
            Self::Image(_) | Self::NoImage => ErrorKind::GenerationFailure,
            Self::Packaging(err) => err.kind(),
        }
    }
}
