// crates/sparkwell-media/tests/data_uri.rs
// ============================================================================
// Module: Data URI Tests
// Description: Tests for data URI packing, unpacking, and mime sniffing.
// Purpose: Ensure byte-exact round trips and strict rejection of malformed input.
// Dependencies: sparkwell-core, sparkwell-media
// ============================================================================
//! ## Overview
//! Exercises the packager against known vectors, malformed strings, mime
//! validation, and payload sniffing.
//!
//! Security posture: unpacked URIs are untrusted input.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use sparkwell_core::ErrorKind;
use sparkwell_core::PcmBuffer;
use sparkwell_core::PcmFormat;
use sparkwell_media::DataUri;
use sparkwell_media::DataUriError;
use sparkwell_media::encode;
use sparkwell_media::sniff_mime;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

#[test]
fn three_bytes_round_trip_as_wav() {
    let uri = DataUri::pack(vec![0x01, 0x02, 0x03], "audio/wav").unwrap();
    let text = uri.to_string();
    assert_eq!(text, "data:audio/wav;base64,AQID");

    let (bytes, mime) = DataUri::unpack(&text).unwrap().into_parts();
    assert_eq!(bytes, vec![0x01, 0x02, 0x03]);
    assert_eq!(mime, "audio/wav");
}

#[test]
fn empty_payload_round_trips() {
    let text = DataUri::pack(Vec::new(), "application/octet-stream").unwrap().to_string();
    assert_eq!(text, "data:application/octet-stream;base64,");
    assert!(DataUri::unpack(&text).unwrap().bytes().is_empty());
}

#[test]
fn mime_parameters_are_preserved() {
    let uri: DataUri = "data:audio/L16;codec=pcm;rate=24000;base64,AAE=".parse().unwrap();
    assert_eq!(uri.mime_type(), "audio/L16;codec=pcm;rate=24000");
    assert_eq!(uri.bytes(), &[0x00, 0x01]);
}

#[test]
fn scheme_is_case_insensitive() {
    let uri = DataUri::unpack("DATA:image/gif;base64,R0lGODlh").unwrap();
    assert_eq!(uri.bytes(), b"GIF89a");
}

#[test]
fn malformed_strings_are_rejected() {
    for input in [
        "",
        "audio/wav;base64,AQID",
        "data:audio/wav;base64AQID",
        "data:audio/wav,AQID",
        "data:audio/wav;base64,AQI",
        "data:audio/wav;base64,A Q I D",
        "data:audio/wav;base64,%%%%",
    ] {
        let err = DataUri::unpack(input).unwrap_err();
        assert!(matches!(err, DataUriError::Malformed(_)), "input {input} gave {err}");
        assert_eq!(err.kind(), ErrorKind::MalformedUri);
    }
}

#[test]
fn invalid_mime_types_are_rejected() {
    for mime in ["", "audio wav", "audio/wav,x", "audio/\twav"] {
        assert_eq!(
            DataUri::pack(vec![1], mime).unwrap_err(),
            DataUriError::InvalidMime(mime.to_string())
        );
    }
    assert!(matches!(
        DataUri::unpack("data:;base64,AQID").unwrap_err(),
        DataUriError::InvalidMime(_)
    ));
}

#[test]
fn sniffing_recognizes_common_formats() {
    let wav = encode(PcmBuffer::new(vec![0, 0], PcmFormat::default())).unwrap().into_bytes();
    assert_eq!(sniff_mime(&wav), Some("audio/wav"));
    assert_eq!(sniff_mime(PNG_MAGIC), Some("image/png"));
    assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
    assert_eq!(sniff_mime(b"GIF87a...."), Some("image/gif"));
    assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
    assert_eq!(sniff_mime(b"plain text"), None);
    assert_eq!(sniff_mime(b"RIFF"), None);
}

#[test]
fn verified_pack_rejects_contradicting_mime() {
    let err = DataUri::pack_verified(PNG_MAGIC.to_vec(), "image/jpeg").unwrap_err();
    assert_eq!(
        err,
        DataUriError::MimeMismatch { declared: "image/jpeg".to_string(), detected: "image/png" }
    );
}

#[test]
fn verified_pack_accepts_aliases_and_unknown_payloads() {
    DataUri::pack_verified(vec![0xFF, 0xD8, 0xFF], "image/jpg").unwrap();
    DataUri::pack_verified(PNG_MAGIC.to_vec(), "IMAGE/PNG").unwrap();
    DataUri::pack_verified(b"opaque".to_vec(), "image/png").unwrap();
}
