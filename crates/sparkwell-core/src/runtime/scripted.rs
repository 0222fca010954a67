// crates/sparkwell-core/src/runtime/scripted.rs
// ============================================================================
// Module: Sparkwell Scripted Gateway
// Description: In-memory generation gateway replaying queued responses.
// Purpose: Drive contracts, triage, and flows deterministically in tests and demos.
// Dependencies: crate::{core, interfaces}, async-trait, serde_json
// ============================================================================

//! ## Overview
//! [`ScriptedGateway`] keeps one FIFO queue per modality and records every
//! call it receives. An exhausted queue answers with
//! [`GatewayError::Unavailable`]. Clones share the same queues and call log.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::GeneratedImage;
use crate::core::PcmBuffer;
use crate::core::Shape;
use crate::core::VoiceParams;
use crate::interfaces::GatewayError;
use crate::interfaces::GenerationGateway;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Queue of scripted results for one modality.
type Script<T> = Arc<Mutex<VecDeque<Result<T, GatewayError>>>>;

/// Call received by a [`ScriptedGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// Structured generation request.
    Structured {
        /// Rendered instruction.
        instruction: String,
    },
    /// Speech synthesis request.
    Audio {
        /// Text to speak.
        instruction: String,
        /// Requested voice.
        voice: VoiceParams,
    },
    /// Image generation request.
    Image {
        /// Image prompt.
        instruction: String,
    },
}

impl GatewayCall {
    /// Returns the instruction carried by the call.
    #[must_use]
    pub fn instruction(&self) -> &str {
        match self {
            Self::Structured { instruction }
            | Self::Audio { instruction, .. }
            | Self::Image { instruction } => instruction,
        }
    }
}

/// Gateway that replays queued responses in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGateway {
    /// Structured responses.
    structured: Script<Value>,
    /// Audio responses.
    audio: Script<PcmBuffer>,
    /// Image responses.
    images: Script<GeneratedImage>,
    /// Calls received, in order.
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl ScriptedGateway {
    /// Creates a gateway with empty scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a structured response.
    #[must_use]
    pub fn with_structured(self, value: Value) -> Self {
        enqueue(&self.structured, Ok(value));
        self
    }

    /// Queues an audio response.
    #[must_use]
    pub fn with_audio(self, pcm: PcmBuffer) -> Self {
        enqueue(&self.audio, Ok(pcm));
        self
    }

    /// Queues an image response.
    #[must_use]
    pub fn with_image(self, image: GeneratedImage) -> Self {
        enqueue(&self.images, Ok(image));
        self
    }

    /// Queues a structured failure.
    #[must_use]
    pub fn with_structured_error(self, error: GatewayError) -> Self {
        enqueue(&self.structured, Err(error));
        self
    }

    /// Queues an audio failure.
    #[must_use]
    pub fn with_audio_error(self, error: GatewayError) -> Self {
        enqueue(&self.audio, Err(error));
        self
    }

    /// Queues an image failure.
    #[must_use]
    pub fn with_image_error(self, error: GatewayError) -> Self {
        enqueue(&self.images, Err(error));
        self
    }

    /// Returns the calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Records a call.
    fn record(&self, call: GatewayCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

/// Appends a result to a script.
fn enqueue<T>(script: &Script<T>, result: Result<T, GatewayError>) {
    if let Ok(mut queue) = script.lock() {
        queue.push_back(result);
    }
}

/// Pops the next result from a script.
fn dequeue<T>(script: &Script<T>, modality: &str) -> Result<T, GatewayError> {
    let mut queue = script
        .lock()
        .map_err(|_| GatewayError::Unavailable("scripted gateway mutex poisoned".to_string()))?;
    queue.pop_front().unwrap_or_else(|| {
        Err(GatewayError::Unavailable(format!("no scripted {modality} response")))
    })
}

// ============================================================================
// SECTION: Gateway Implementation
// ============================================================================

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn generate_structured(
        &self,
        instruction: &str,
        _output_shape: &Shape,
    ) -> Result<Value, GatewayError> {
        self.record(GatewayCall::Structured {
            instruction: instruction.to_string(),
        });
        dequeue(&self.structured, "structured")
    }

    async fn generate_audio(
        &self,
        instruction: &str,
        voice: &VoiceParams,
    ) -> Result<PcmBuffer, GatewayError> {
        self.record(GatewayCall::Audio {
            instruction: instruction.to_string(),
            voice: voice.clone(),
        });
        dequeue(&self.audio, "audio")
    }

    async fn generate_image(&self, instruction: &str) -> Result<GeneratedImage, GatewayError> {
        self.record(GatewayCall::Image {
            instruction: instruction.to_string(),
        });
        dequeue(&self.images, "image")
    }
}
