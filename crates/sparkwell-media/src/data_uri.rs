// crates/sparkwell-media/src/data_uri.rs
// ============================================================================
// Module: Sparkwell Data URIs
// Description: Base64 `data:` URI packing, unpacking, and payload sniffing.
// Purpose: Transport encoded audio and images inline as strings.
// Dependencies: base64, sparkwell-core, thiserror
// ============================================================================

//! ## Overview
//! A [`DataUri`] owns a mime type and payload bytes and renders as
//! `data:<mime>;base64,<payload>`. Packing and unpacking are exact inverses:
//! `DataUri::unpack(&DataUri::pack(b, m)?.to_string())` yields `(b, m)` for
//! every byte sequence `b`.
//!
//! Security posture: unpacked strings are untrusted; the mime type is
//! validated and the payload must be strict, padded base64.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sparkwell_core::ErrorKind;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// URI scheme prefix, including the colon.
pub const DATA_SCHEME: &str = "data:";

/// Encoding marker preceding the payload separator.
const BASE64_MARKER: &str = ";base64";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Data URI errors.
///
/// # Invariants
/// - Every variant classifies as [`ErrorKind::MalformedUri`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    /// The string is not a base64 data URI.
    #[error("malformed data uri: {0}")]
    Malformed(String),
    /// The mime type is empty or contains forbidden characters.
    #[error("invalid mime type: {0}")]
    InvalidMime(String),
    /// The declared mime type contradicts the payload format.
    #[error("declared mime type {declared} does not match payload format {detected}")]
    MimeMismatch {
        /// Declared mime type.
        declared: String,
        /// Sniffed mime type.
        detected: &'static str,
    },
}

impl DataUriError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedUri
    }
}

// ============================================================================
// SECTION: Data URI
// ============================================================================

/// Inline payload with its mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Declared mime type.
    mime_type: String,
    /// Payload bytes.
    bytes: Vec<u8>,
}

impl DataUri {
    /// Wraps bytes with a declared mime type.
    ///
    /// # Errors
    ///
    /// Returns [`DataUriError::InvalidMime`] when the mime type is empty or
    /// contains whitespace, control characters, or commas.
    pub fn pack(bytes: Vec<u8>, mime_type: &str) -> Result<Self, DataUriError> {
        validate_mime(mime_type)?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// Wraps bytes, rejecting a mime type that contradicts the sniffed format.
    ///
    /// Payloads of unrecognized format are accepted as declared.
    ///
    /// # Errors
    ///
    /// Returns [`DataUriError::InvalidMime`] or [`DataUriError::MimeMismatch`].
    pub fn pack_verified(bytes: Vec<u8>, mime_type: &str) -> Result<Self, DataUriError> {
        let uri = Self::pack(bytes, mime_type)?;
        if let Some(detected) = sniff_mime(&uri.bytes)
            && canonical_mime(mime_type) != detected
        {
            return Err(DataUriError::MimeMismatch {
                declared: mime_type.to_string(),
                detected,
            });
        }
        Ok(uri)
    }

    /// Parses a `data:<mime>;base64,<payload>` string.
    ///
    /// # Errors
    ///
    /// Returns [`DataUriError::Malformed`] when the scheme, base64 marker,
    /// comma separator, or payload encoding is invalid, and
    /// [`DataUriError::InvalidMime`] for a bad mime type.
    pub fn unpack(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .get(.. DATA_SCHEME.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(DATA_SCHEME))
            .and_then(|_| uri.get(DATA_SCHEME.len() ..))
            .ok_or_else(|| DataUriError::Malformed("missing data: scheme".to_string()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| DataUriError::Malformed("missing comma separator".to_string()))?;
        let mime_type = meta
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| DataUriError::Malformed("payload is not base64 encoded".to_string()))?;
        validate_mime(mime_type)?;
        let bytes = STANDARD
            .decode(payload.as_bytes())
            .map_err(|err| DataUriError::Malformed(format!("invalid base64 payload: {err}")))?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// Returns the declared mime type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the URI, returning `(bytes, mime_type)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.mime_type)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DATA_SCHEME}{}{BASE64_MARKER},{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::unpack(s)
    }
}

/// Rejects mime types that cannot round-trip through a data URI.
fn validate_mime(mime_type: &str) -> Result<(), DataUriError> {
    let forbidden = |ch: char| ch.is_whitespace() || ch.is_control() || ch == ',';
    if mime_type.is_empty() || mime_type.chars().any(forbidden) {
        return Err(DataUriError::InvalidMime(mime_type.to_string()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Sniffing
// ============================================================================

/// Detects the mime type of common audio and image payloads.
#[must_use]
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    let riff_form = bytes.get(8 .. 12).filter(|_| bytes.starts_with(b"RIFF"));
    match riff_form {
        Some(b"WAVE") => return Some("audio/wav"),
        Some(b"WEBP") => return Some("image/webp"),
        _ => {}
    }
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else {
        None
    }
}

/// Maps a declared mime type onto the name [`sniff_mime`] reports.
fn canonical_mime(mime_type: &str) -> String {
    let essence = mime_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.as_str() {
        "audio/wave" | "audio/x-wav" | "audio/vnd.wave" => "audio/wav".to_string(),
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        _ => essence,
    }
}
