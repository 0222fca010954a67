// crates/sparkwell-media/src/speech.rs
// ============================================================================
// Module: Sparkwell Speech Synthesis
// Description: Gateway audio -> WAV container -> data URI chain.
// Purpose: Produce playable speech assets from text in one call.
// Dependencies: crate::{data_uri, wav}, sparkwell-core, thiserror
// ============================================================================

//! ## Overview
//! [`Synthesizer::synthesize`] asks the gateway for raw PCM, wraps it in a
//! canonical WAV container, and packages the result as an `audio/wav` data
//! URI. The gateway call is the only suspension point; encoding and packaging
//! are pure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sparkwell_core::ErrorKind;
use sparkwell_core::GatewayError;
use sparkwell_core::GenerationGateway;
use sparkwell_core::PcmBuffer;
use sparkwell_core::PcmFormat;
use sparkwell_core::VoiceParams;
use thiserror::Error;

use crate::data_uri::DataUri;
use crate::data_uri::DataUriError;
use crate::wav::EncodingError;
use crate::wav::WAV_MIME;
use crate::wav::encode;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Speech synthesis errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// Text to speak was empty or whitespace.
    #[error("text to synthesize is empty")]
    EmptyText,
    /// Gateway failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// Gateway returned an empty PCM payload.
    #[error("no media returned by the generation backend")]
    NoAudio,
    /// PCM could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// Container could not be packaged.
    #[error(transparent)]
    Packaging(#[from] DataUriError),
}

impl SpeechError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyText => ErrorKind::CallerInput,
            Self::Gateway(_) | Self::NoAudio => ErrorKind::GenerationFailure,
            Self::Encoding(_) => ErrorKind::EncodingError,
            Self::Packaging(_) => ErrorKind::MalformedUri,
        }
    }
}

// ============================================================================
// SECTION: Synthesizer
// ============================================================================

/// Text-to-speech chain bound to one voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesizer {
    /// Voice and expected format sent to the gateway.
    voice: VoiceParams,
}

impl Synthesizer {
    /// Creates a synthesizer for the voice.
    #[must_use]
    pub const fn new(voice: VoiceParams) -> Self {
        Self { voice }
    }

    /// Returns the voice parameters.
    #[must_use]
    pub const fn voice(&self) -> &VoiceParams {
        &self.voice
    }

    /// Synthesizes `text` into an `audio/wav` data URI.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError`] for blank text, gateway failures, empty audio,
    /// or an unencodable PCM format.
    pub async fn synthesize(
        &self,
        gateway: &dyn GenerationGateway,
        text: &str,
    ) -> Result<DataUri, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        let pcm = gateway.generate_audio(text, &self.voice).await?;
        if pcm.is_empty() {
            return Err(SpeechError::NoAudio);
        }
        let container = encode(pcm)?;
        Ok(DataUri::pack_verified(container.into_bytes(), WAV_MIME)?)
    }
}

// ============================================================================
// SECTION: Gateway Helpers
// ============================================================================

/// Decodes a gateway media data URI into PCM with the given format.
///
/// The declared mime type is not interpreted; backends label raw PCM in
/// differing ways (for example `audio/L16;codec=pcm;rate=24000`).
///
/// # Errors
///
/// Returns [`DataUriError`] when the URI is malformed.
pub fn media_uri_to_pcm(uri: &str, format: PcmFormat) -> Result<PcmBuffer, DataUriError> {
    let (bytes, _mime_type) = DataUri::unpack(uri)?.into_parts();
    Ok(PcmBuffer::new(bytes, format))
}
