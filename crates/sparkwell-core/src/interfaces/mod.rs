// crates/sparkwell-core/src/interfaces/mod.rs
// ============================================================================
// Module: Sparkwell Interfaces
// Description: Backend-agnostic interfaces for generation and observability.
// Purpose: Define the contract surfaces the Sparkwell runtime depends on.
// Dependencies: crate::core, async-trait, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Sparkwell reaches a generative backend without
//! embedding provider details. The gateway call is the only suspension point
//! in the runtime; retries, timeouts, model choice, and quotas belong to the
//! implementation behind [`GenerationGateway`], never to Sparkwell itself.
//! Observers receive sizes, identifiers, and error kinds only, never user text
//! or model output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::ContractId;
use crate::core::ErrorKind;
use crate::core::GeneratedImage;
use crate::core::PcmBuffer;
use crate::core::Shape;
use crate::core::VoiceParams;

// ============================================================================
// SECTION: Generation Gateway
// ============================================================================

/// Generation gateway errors.
///
/// # Invariants
/// - Every variant classifies as [`ErrorKind::GenerationFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Backend could not be reached or refused the request.
    #[error("generation backend unavailable: {0}")]
    Unavailable(String),
    /// Backend answered without a usable payload.
    #[error("generation backend returned an empty response")]
    EmptyResponse,
    /// Backend reported an error.
    #[error("generation backend error: {0}")]
    Backend(String),
}

impl GatewayError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::GenerationFailure
    }
}

/// Opaque capability that produces structured, audio, or image output.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generates a structured value intended to satisfy `output_shape`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend fails.
    async fn generate_structured(
        &self,
        instruction: &str,
        output_shape: &Shape,
    ) -> Result<Value, GatewayError>;

    /// Synthesizes speech for the instruction as raw PCM.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend fails.
    async fn generate_audio(
        &self,
        instruction: &str,
        voice: &VoiceParams,
    ) -> Result<PcmBuffer, GatewayError>;

    /// Generates an image for the instruction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the backend fails.
    async fn generate_image(&self, instruction: &str) -> Result<GeneratedImage, GatewayError>;
}

// ============================================================================
// SECTION: Contract Observer
// ============================================================================

/// Lifecycle phase of a prompt contract invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractPhase {
    /// Input validated and instruction rendered; gateway about to be called.
    Invoked,
    /// Output validated and returned.
    Completed,
    /// Invocation failed.
    Failed,
}

/// Observer event emitted for each contract phase.
///
/// # Invariants
/// - Carries no user text or model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractEvent {
    /// Contract identifier.
    pub contract_id: ContractId,
    /// Invocation phase.
    pub phase: ContractPhase,
    /// Failure classification for [`ContractPhase::Failed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Rendered instruction length in characters, when rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_chars: Option<usize>,
}

/// Observability sink for contract invocations.
pub trait ContractObserver: Send + Sync {
    /// Records a contract event.
    fn record(&self, event: &ContractEvent);
}

/// No-op observer.
///
/// # Invariants
/// - Events are intentionally discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ContractObserver for NoopObserver {
    fn record(&self, _event: &ContractEvent) {}
}
