// crates/sparkwell-media/src/wav.rs
// ============================================================================
// Module: Sparkwell WAV Container
// Description: Canonical RIFF/WAVE encoder and strict header reader for PCM audio.
// Purpose: Turn raw gateway PCM into a self-contained, playable audio file.
// Dependencies: sparkwell-core, thiserror
// ============================================================================

//! ## Overview
//! The container is the canonical 44-byte header (one `fmt ` chunk, one
//! `data` chunk) followed by the PCM bytes, unmodified.
//!
//! Invariants:
//! - Every size field is recomputed from the actual payload length, so a
//!   truncated or padded buffer still yields a self-consistent header.
//! - Numeric fields are little-endian; tags are 4-byte ASCII.
//! - No RIFF pad byte is appended for odd payload lengths.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sparkwell_core::ErrorKind;
use sparkwell_core::PcmBuffer;
use sparkwell_core::PcmFormat;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical header length in bytes.
pub const WAV_HEADER_LEN: usize = 44;
/// Mime type of encoded containers.
pub const WAV_MIME: &str = "audio/wav";

/// Audio format code for integer PCM.
const PCM_FORMAT_TAG: u16 = 1;
/// Length of the PCM `fmt ` chunk body.
const FMT_CHUNK_LEN: u32 = 16;
/// Bytes counted by the RIFF size field ahead of the payload.
const RIFF_OVERHEAD: u32 = 36;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Container encoding and parsing errors.
///
/// # Invariants
/// - Every variant classifies as [`ErrorKind::EncodingError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The PCM buffer carried no samples.
    #[error("pcm buffer is empty")]
    EmptyPcm,
    /// Sample rate was zero.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    /// Channel count was zero.
    #[error("invalid channel count: {0}")]
    InvalidChannels(u16),
    /// Bit depth was zero or not a whole number of bytes.
    #[error("invalid bit depth: {0}")]
    InvalidBitDepth(u16),
    /// A derived header field does not fit its width.
    #[error("{field} overflows the container header")]
    Overflow {
        /// Name of the overflowing field.
        field: &'static str,
    },
    /// Header bytes were fewer than the canonical length.
    #[error("container truncated: {len} bytes")]
    Truncated {
        /// Actual byte count.
        len: usize,
    },
    /// Header was structurally invalid.
    #[error("malformed container header: {0}")]
    MalformedHeader(String),
}

impl EncodingError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::EncodingError
    }
}

// ============================================================================
// SECTION: Header
// ============================================================================

/// Decoded canonical WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Interleaved channel count.
    pub channels: u16,
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Bytes per second (`sample_rate * block_align`).
    pub byte_rate: u32,
    /// Bytes per sample frame (`channels * bits_per_sample / 8`).
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Declared `data` chunk length.
    pub data_len: u32,
    /// Declared RIFF chunk length (`36 + data_len`).
    pub riff_len: u32,
}

impl WavHeader {
    /// Derives the header for a payload of `data_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] when a parameter is zero, the bit depth is
    /// not a whole number of bytes, or a derived field overflows.
    pub fn for_pcm(format: PcmFormat, data_len: usize) -> Result<Self, EncodingError> {
        if format.sample_rate == 0 {
            return Err(EncodingError::InvalidSampleRate(format.sample_rate));
        }
        if format.channels == 0 {
            return Err(EncodingError::InvalidChannels(format.channels));
        }
        if format.bit_depth == 0 || !format.bit_depth.is_multiple_of(8) {
            return Err(EncodingError::InvalidBitDepth(format.bit_depth));
        }
        let block_align = format
            .channels
            .checked_mul(format.bit_depth / 8)
            .ok_or(EncodingError::Overflow { field: "block align" })?;
        let byte_rate = format
            .sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or(EncodingError::Overflow { field: "byte rate" })?;
        let data_len =
            u32::try_from(data_len).map_err(|_| EncodingError::Overflow { field: "data size" })?;
        let riff_len = data_len
            .checked_add(RIFF_OVERHEAD)
            .ok_or(EncodingError::Overflow { field: "riff size" })?;
        Ok(Self {
            channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: format.bit_depth,
            data_len,
            riff_len,
        })
    }

    /// Returns the PCM format the header describes.
    #[must_use]
    pub const fn format(&self) -> PcmFormat {
        PcmFormat {
            sample_rate: self.sample_rate,
            channels: self.channels,
            bit_depth: self.bits_per_sample,
        }
    }

    /// Serializes the header in canonical field order.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut out = [0u8; WAV_HEADER_LEN];
        let fields: [&[u8]; 13] = [
            b"RIFF",
            &self.riff_len.to_le_bytes(),
            b"WAVE",
            b"fmt ",
            &FMT_CHUNK_LEN.to_le_bytes(),
            &PCM_FORMAT_TAG.to_le_bytes(),
            &self.channels.to_le_bytes(),
            &self.sample_rate.to_le_bytes(),
            &self.byte_rate.to_le_bytes(),
            &self.block_align.to_le_bytes(),
            &self.bits_per_sample.to_le_bytes(),
            b"data",
            &self.data_len.to_le_bytes(),
        ];
        let mut cursor = 0;
        for field in fields {
            let end = cursor + field.len();
            if let Some(slot) = out.get_mut(cursor .. end) {
                slot.copy_from_slice(field);
            }
            cursor = end;
        }
        out
    }

    /// Parses and cross-checks the header of a complete container.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] when the buffer is shorter than the header,
    /// a tag or the format code is wrong, a derived field disagrees, or a
    /// size field does not match the buffer.
    pub fn parse(bytes: &[u8]) -> Result<Self, EncodingError> {
        if bytes.len() < WAV_HEADER_LEN {
            return Err(EncodingError::Truncated { len: bytes.len() });
        }
        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;
        if read_u32(bytes, 16)? != FMT_CHUNK_LEN {
            return Err(malformed("fmt chunk length is not 16"));
        }
        if read_u16(bytes, 20)? != PCM_FORMAT_TAG {
            return Err(malformed("audio format is not integer pcm"));
        }

        let parsed = Self {
            riff_len: read_u32(bytes, 4)?,
            channels: read_u16(bytes, 22)?,
            sample_rate: read_u32(bytes, 24)?,
            byte_rate: read_u32(bytes, 28)?,
            block_align: read_u16(bytes, 32)?,
            bits_per_sample: read_u16(bytes, 34)?,
            data_len: read_u32(bytes, 40)?,
        };
        let expected = Self::for_pcm(parsed.format(), bytes.len() - WAV_HEADER_LEN)?;
        if parsed.block_align != expected.block_align {
            return Err(malformed("block align disagrees with channels and bit depth"));
        }
        if parsed.byte_rate != expected.byte_rate {
            return Err(malformed("byte rate disagrees with sample rate and block align"));
        }
        if parsed.data_len != expected.data_len {
            return Err(malformed("data size does not match payload length"));
        }
        if parsed.riff_len != expected.riff_len {
            return Err(malformed("riff size does not match buffer length"));
        }
        Ok(parsed)
    }
}

/// Builds a malformed-header error.
fn malformed(reason: &str) -> EncodingError {
    EncodingError::MalformedHeader(reason.to_string())
}

/// Reads `N` bytes at `at`.
fn read_array<const N: usize>(bytes: &[u8], at: usize) -> Result<[u8; N], EncodingError> {
    bytes
        .get(at .. at + N)
        .and_then(|slice| <[u8; N]>::try_from(slice).ok())
        .ok_or(EncodingError::Truncated { len: bytes.len() })
}

/// Reads a little-endian `u16` at `at`.
fn read_u16(bytes: &[u8], at: usize) -> Result<u16, EncodingError> {
    read_array(bytes, at).map(u16::from_le_bytes)
}

/// Reads a little-endian `u32` at `at`.
fn read_u32(bytes: &[u8], at: usize) -> Result<u32, EncodingError> {
    read_array(bytes, at).map(u32::from_le_bytes)
}

/// Checks a 4-byte ASCII tag at `at`.
fn expect_tag(bytes: &[u8], at: usize, tag: &[u8; 4]) -> Result<(), EncodingError> {
    if &read_array::<4>(bytes, at)? == tag {
        Ok(())
    } else {
        Err(EncodingError::MalformedHeader(format!(
            "expected {} tag at offset {at}",
            String::from_utf8_lossy(tag)
        )))
    }
}

// ============================================================================
// SECTION: Container
// ============================================================================

/// Encoded WAV file: canonical header followed by the PCM payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioContainer {
    /// Decoded header values.
    header: WavHeader,
    /// Complete file bytes.
    bytes: Vec<u8>,
}

impl AudioContainer {
    /// Returns the header values.
    #[must_use]
    pub const fn header(&self) -> &WavHeader {
        &self.header
    }

    /// Returns the complete file bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the PCM payload following the header.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.bytes.get(WAV_HEADER_LEN ..).unwrap_or_default()
    }

    /// Consumes the container, returning the file bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encodes a PCM buffer into a canonical WAV container.
///
/// # Errors
///
/// Returns [`EncodingError`] when the buffer is empty or its format is invalid.
pub fn encode(pcm: PcmBuffer) -> Result<AudioContainer, EncodingError> {
    if pcm.is_empty() {
        return Err(EncodingError::EmptyPcm);
    }
    let header = WavHeader::for_pcm(pcm.format, pcm.bytes.len())?;
    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + pcm.bytes.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&pcm.bytes);
    Ok(AudioContainer { header, bytes })
}
