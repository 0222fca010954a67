// crates/sparkwell-media/tests/speech.rs
// ============================================================================
// Module: Speech Chain Tests
// Description: Tests for the gateway -> WAV -> data URI synthesis chain.
// Purpose: Ensure PCM is containerized unmodified and failures are classified.
// Dependencies: sparkwell-core, sparkwell-media, tokio
// ============================================================================
//! ## Overview
//! Drives [`Synthesizer`] with the scripted gateway and decodes the produced
//! data URI back into a container to check the payload and voice routing.

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
use sparkwell_core::GatewayCall;
use sparkwell_core::GatewayError;
use sparkwell_core::PcmBuffer;
use sparkwell_core::PcmFormat;
use sparkwell_core::ScriptedGateway;
use sparkwell_core::VoiceParams;
use sparkwell_media::DataUri;
use sparkwell_media::SpeechError;
use sparkwell_media::Synthesizer;
use sparkwell_media::WAV_HEADER_LEN;
use sparkwell_media::WavHeader;
use sparkwell_media::media_uri_to_pcm;

#[tokio::test]
async fn synthesized_speech_is_a_wav_data_uri() {
    let pcm = vec![0x10, 0x00, 0xF0, 0xFF];
    let gateway =
        ScriptedGateway::new().with_audio(PcmBuffer::new(pcm.clone(), PcmFormat::default()));
    let synthesizer = Synthesizer::new(VoiceParams::new("Alloy"));

    let uri = synthesizer.synthesize(&gateway, "Breathe in slowly.").await.unwrap();
    assert_eq!(uri.mime_type(), "audio/wav");

    let decoded = DataUri::unpack(&uri.to_string()).unwrap();
    let header = WavHeader::parse(decoded.bytes()).unwrap();
    assert_eq!(header.format(), PcmFormat::default());
    assert_eq!(&decoded.bytes()[WAV_HEADER_LEN ..], pcm.as_slice());

    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::Audio {
            instruction: "Breathe in slowly.".to_string(),
            voice: VoiceParams::new("Alloy"),
        }]
    );
}

#[tokio::test]
async fn gateway_declared_format_drives_the_header() {
    let stereo = PcmFormat { sample_rate: 48_000, channels: 2, bit_depth: 16 };
    let gateway = ScriptedGateway::new().with_audio(PcmBuffer::new(vec![0; 8], stereo));
    let synthesizer = Synthesizer::new(VoiceParams::new("Algenib").with_format(stereo));
    let uri = synthesizer.synthesize(&gateway, "rain on leaves").await.unwrap();
    let header = WavHeader::parse(uri.bytes()).unwrap();
    assert_eq!(header.channels, 2);
    assert_eq!(header.byte_rate, 192_000);
}

#[tokio::test]
async fn blank_text_never_reaches_the_gateway() {
    let gateway = ScriptedGateway::new();
    let err = Synthesizer::new(VoiceParams::new("Alloy"))
        .synthesize(&gateway, "  ")
        .await
        .unwrap_err();
    assert_eq!(err, SpeechError::EmptyText);
    assert_eq!(err.kind(), ErrorKind::CallerInput);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn empty_audio_is_a_generation_failure() {
    let gateway =
        ScriptedGateway::new().with_audio(PcmBuffer::new(Vec::new(), PcmFormat::default()));
    let err = Synthesizer::new(VoiceParams::new("Alloy"))
        .synthesize(&gateway, "hello")
        .await
        .unwrap_err();
    assert_eq!(err, SpeechError::NoAudio);
    assert_eq!(err.kind(), ErrorKind::GenerationFailure);
}

#[tokio::test]
async fn gateway_errors_propagate() {
    let gateway = ScriptedGateway::new().with_audio_error(GatewayError::EmptyResponse);
    let err = Synthesizer::new(VoiceParams::new("Alloy"))
        .synthesize(&gateway, "hello")
        .await
        .unwrap_err();
    assert_eq!(err, SpeechError::Gateway(GatewayError::EmptyResponse));
}

#[tokio::test]
async fn invalid_declared_format_is_an_encoding_error() {
    let broken = PcmFormat { sample_rate: 24_000, channels: 0, bit_depth: 16 };
    let gateway = ScriptedGateway::new().with_audio(PcmBuffer::new(vec![1, 2], broken));
    let err = Synthesizer::new(VoiceParams::new("Alloy"))
        .synthesize(&gateway, "hello")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingError);
}

#[test]
fn media_uri_decodes_raw_pcm() {
    let uri = "data:audio/L16;codec=pcm;rate=24000;base64,AQIDBA==";
    let pcm = media_uri_to_pcm(uri, PcmFormat::default()).unwrap();
    assert_eq!(pcm.bytes, vec![1, 2, 3, 4]);
    assert_eq!(pcm.format, PcmFormat::default());
    assert!(media_uri_to_pcm("not a uri", PcmFormat::default()).is_err());
}
