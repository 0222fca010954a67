// crates/sparkwell-core/src/core/media.rs
// ============================================================================
// Module: Sparkwell Media Types
// Description: Raw media payloads exchanged with the generation gateway.
// Purpose: Carry PCM sample streams, voice parameters, and image bytes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! These types are produced by a [`crate::GenerationGateway`] and consumed
//! by the media encoders. They hold raw bytes plus the parameters needed to
//! interpret them; no encoding happens here.

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: PCM
// ============================================================================

/// Default synthesis sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;
/// Default synthesis channel count (mono).
pub const DEFAULT_CHANNELS: u16 = 1;
/// Default synthesis bit depth.
pub const DEFAULT_BIT_DEPTH: u16 = 16;

/// Interpretation parameters for a PCM sample stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Bits per sample.
    pub bit_depth: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            bit_depth: DEFAULT_BIT_DEPTH,
        }
    }
}

/// Raw little-endian interleaved PCM samples.
///
/// # Invariants
/// - `bytes` is used unmodified as the audio payload of an encoded container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    /// Sample bytes.
    pub bytes: Vec<u8>,
    /// Stream parameters.
    pub format: PcmFormat,
}

impl PcmBuffer {
    /// Creates a buffer with the given format.
    #[must_use]
    pub const fn new(bytes: Vec<u8>, format: PcmFormat) -> Self {
        Self { bytes, format }
    }

    /// Returns true when the buffer carries no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ============================================================================
// SECTION: Voice
// ============================================================================

/// Voice selection for speech synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceParams {
    /// Prebuilt voice name understood by the backend.
    pub voice_name: String,
    /// PCM format the backend is expected to return.
    pub format: PcmFormat,
}

impl VoiceParams {
    /// Creates voice parameters using the default PCM format.
    #[must_use]
    pub fn new(voice_name: impl Into<String>) -> Self {
        Self {
            voice_name: voice_name.into(),
            format: PcmFormat::default(),
        }
    }

    /// Overrides the expected PCM format.
    #[must_use]
    pub fn with_format(mut self, format: PcmFormat) -> Self {
        self.format = format;
        self
    }
}

// ============================================================================
// SECTION: Images
// ============================================================================

/// Image bytes returned by the gateway with their declared mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Declared mime type, e.g. `image/png`.
    pub mime_type: String,
}
