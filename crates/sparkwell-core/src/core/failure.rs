// crates/sparkwell-core/src/core/failure.rs
// ============================================================================
// Module: Sparkwell Failure Classification
// Description: Stable failure kinds shared by every Sparkwell error type.
// Purpose: Let callers map any failure to a user-appropriate message.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every error raised by Sparkwell crates classifies itself into one
//! [`ErrorKind`]. Kinds are stable labels: observers record them and the UI
//! collaborator chooses its message from them.

use serde::Deserialize;
use serde::Serialize;

/// Failure classification shared across Sparkwell crates.
///
/// # Invariants
/// - Variants and labels are stable for telemetry and UI mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input supplied by the caller (caller bug or empty disclosure).
    CallerInput,
    /// The generation backend returned a structurally invalid response.
    SchemaViolation,
    /// The generation backend was unavailable, errored, or returned nothing.
    GenerationFailure,
    /// PCM parameters or payload could not be encoded.
    EncodingError,
    /// A data URI could not be parsed or built.
    MalformedUri,
}

impl ErrorKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CallerInput => "caller_input",
            Self::SchemaViolation => "schema_violation",
            Self::GenerationFailure => "generation_failure",
            Self::EncodingError => "encoding_error",
            Self::MalformedUri => "malformed_uri",
        }
    }

    /// Returns true when repeating the same request may succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::SchemaViolation | Self::GenerationFailure)
    }

    /// Returns the message a user-facing collaborator should present.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::CallerInput => "Please describe what you're going through first.",
            Self::SchemaViolation | Self::GenerationFailure => {
                "Something went wrong on our side. Please try again."
            }
            Self::EncodingError | Self::MalformedUri => {
                "We couldn't prepare the audio or image. Please try again later."
            }
        }
    }
}
