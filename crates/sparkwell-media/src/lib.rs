// crates/sparkwell-media/src/lib.rs
// ============================================================================
// Module: Sparkwell Media Library
// Description: Public API surface for audio containers and data URIs.
// Purpose: Expose the WAV encoder, data-URI packager, and speech chain.
// Dependencies: crate::{data_uri, speech, wav}
// ============================================================================

//! ## Overview
//! Sparkwell media converts raw PCM returned by a speech backend into a
//! canonical WAV file and packages binary payloads as `data:` URIs. All
//! operations except the gateway call inside [`Synthesizer::synthesize`] are
//! pure and deterministic.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod data_uri;
pub mod speech;
pub mod wav;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use data_uri::DATA_SCHEME;
pub use data_uri::DataUri;
pub use data_uri::DataUriError;
pub use data_uri::sniff_mime;
pub use speech::SpeechError;
pub use speech::Synthesizer;
pub use speech::media_uri_to_pcm;
pub use wav::AudioContainer;
pub use wav::EncodingError;
pub use wav::WAV_HEADER_LEN;
pub use wav::WAV_MIME;
pub use wav::WavHeader;
pub use wav::encode;
