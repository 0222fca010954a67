// crates/sparkwell-media/tests/wav_container.rs
// ============================================================================
// Module: WAV Container Tests
// Description: Tests for canonical WAV encoding and strict header parsing.
// Purpose: Ensure every header field is derived from the actual payload.
// Dependencies: sparkwell-core, sparkwell-media
// ============================================================================
//! ## Overview
//! Checks byte-level layout against a hand-built header, parameter
//! validation, and the reader's cross-checks.

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
use sparkwell_media::EncodingError;
use sparkwell_media::WAV_HEADER_LEN;
use sparkwell_media::WavHeader;
use sparkwell_media::encode;

fn format(sample_rate: u32, channels: u16, bit_depth: u16) -> PcmFormat {
    PcmFormat { sample_rate, channels, bit_depth }
}

fn expected_header(data_len: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24_000u32.to_le_bytes());
    bytes.extend_from_slice(&48_000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes
}

#[test]
fn default_format_matches_canonical_layout() {
    let samples: Vec<u8> = [100i16, -100, 32_767, -32_768]
        .iter()
        .flat_map(|sample| sample.to_le_bytes())
        .collect();
    let container = encode(PcmBuffer::new(samples.clone(), PcmFormat::default())).unwrap();

    let bytes = container.as_bytes();
    assert_eq!(bytes.len(), WAV_HEADER_LEN + samples.len());
    assert_eq!(&bytes[.. WAV_HEADER_LEN], expected_header(8).as_slice());
    assert_eq!(container.payload(), samples.as_slice());
}

#[test]
fn stereo_24_bit_derives_block_align_and_byte_rate() {
    let container = encode(PcmBuffer::new(vec![0; 12], format(44_100, 2, 24))).unwrap();
    let header = container.header();
    assert_eq!(header.block_align, 6);
    assert_eq!(header.byte_rate, 44_100 * 6);
    assert_eq!(header.data_len, 12);
    assert_eq!(header.riff_len, 48);
}

#[test]
fn truncated_payload_still_yields_consistent_header() {
    let container = encode(PcmBuffer::new(vec![1, 2, 3], PcmFormat::default())).unwrap();
    assert_eq!(container.header().data_len, 3);
    assert_eq!(container.header().riff_len, 39);
    assert_eq!(container.as_bytes().len(), 47);
    WavHeader::parse(container.as_bytes()).unwrap();
}

#[test]
fn empty_pcm_is_an_encoding_error() {
    let err = encode(PcmBuffer::new(Vec::new(), PcmFormat::default())).unwrap_err();
    assert_eq!(err, EncodingError::EmptyPcm);
    assert_eq!(err.kind(), ErrorKind::EncodingError);
}

#[test]
fn non_positive_parameters_are_rejected() {
    assert_eq!(
        encode(PcmBuffer::new(vec![0; 2], format(0, 1, 16))).unwrap_err(),
        EncodingError::InvalidSampleRate(0)
    );
    assert_eq!(
        encode(PcmBuffer::new(vec![0; 2], format(24_000, 0, 16))).unwrap_err(),
        EncodingError::InvalidChannels(0)
    );
    assert_eq!(
        encode(PcmBuffer::new(vec![0; 2], format(24_000, 1, 0))).unwrap_err(),
        EncodingError::InvalidBitDepth(0)
    );
    assert_eq!(
        encode(PcmBuffer::new(vec![0; 2], format(24_000, 1, 12))).unwrap_err(),
        EncodingError::InvalidBitDepth(12)
    );
}

#[test]
fn overflowing_byte_rate_is_rejected() {
    let err = encode(PcmBuffer::new(vec![0; 8], format(u32::MAX, 2, 32))).unwrap_err();
    assert_eq!(err, EncodingError::Overflow { field: "byte rate" });
}

#[test]
fn parse_reads_back_encoded_header() {
    let container = encode(PcmBuffer::new(vec![7; 10], format(16_000, 1, 8))).unwrap();
    let header = WavHeader::parse(container.as_bytes()).unwrap();
    assert_eq!(&header, container.header());
    assert_eq!(header.format(), format(16_000, 1, 8));
}

#[test]
fn parse_rejects_short_buffers() {
    assert_eq!(WavHeader::parse(&[0; 10]).unwrap_err(), EncodingError::Truncated { len: 10 });
}

#[test]
fn parse_rejects_size_mismatch_after_padding() {
    let mut bytes = encode(PcmBuffer::new(vec![1, 2], PcmFormat::default())).unwrap().into_bytes();
    bytes.push(0);
    assert!(matches!(WavHeader::parse(&bytes).unwrap_err(), EncodingError::MalformedHeader(_)));
}

#[test]
fn parse_rejects_wrong_tags_and_format_codes() {
    let original = encode(PcmBuffer::new(vec![1, 2], PcmFormat::default())).unwrap().into_bytes();

    let mut bad_tag = original.clone();
    bad_tag[8 .. 12].copy_from_slice(b"AVI ");
    assert!(matches!(WavHeader::parse(&bad_tag).unwrap_err(), EncodingError::MalformedHeader(_)));

    let mut float_format = original.clone();
    float_format[20 .. 22].copy_from_slice(&3u16.to_le_bytes());
    assert!(matches!(
        WavHeader::parse(&float_format).unwrap_err(),
        EncodingError::MalformedHeader(_)
    ));

    let mut bad_rate = original;
    bad_rate[28 .. 32].copy_from_slice(&1u32.to_le_bytes());
    assert!(matches!(WavHeader::parse(&bad_rate).unwrap_err(), EncodingError::MalformedHeader(_)));
}
