//! Value validation tests for sparkwell-config.
// crates/sparkwell-config/tests/limits_validation.rs
// =============================================================================
// Module: Config Limits Validation Tests
// Description: Validate range, voice, separator, and limit constraints.
// Purpose: Ensure invalid configuration fails closed with a precise message.
// =============================================================================

use sparkwell_config::SparkwellConfig;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn sample_rate_must_be_in_range() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.audio.sample_rate = 4_000;
    assert_invalid(config.validate(), "audio.sample_rate must be between 8000 and 192000")?;
    config.audio.sample_rate = 192_001;
    assert_invalid(config.validate(), "audio.sample_rate")?;
    Ok(())
}

#[test]
fn channels_must_be_mono_or_stereo() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.audio.channels = 0;
    assert_invalid(config.validate(), "audio.channels must be 1 or 2")?;
    config.audio.channels = 6;
    assert_invalid(config.validate(), "audio.channels must be 1 or 2")?;
    Ok(())
}

#[test]
fn bit_depth_must_be_whole_bytes() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.audio.bit_depth = 12;
    assert_invalid(config.validate(), "audio.bit_depth must be one of 8, 16, 24, 32")?;
    Ok(())
}

#[test]
fn voice_names_are_restricted() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.voices.speech = String::new();
    assert_invalid(config.validate(), "voices.speech must be non-empty")?;
    config.voices.speech = "Alloy Voice".to_string();
    assert_invalid(config.validate(), "voices.speech must contain only ASCII")?;
    config.voices.speech = "a".repeat(65);
    assert_invalid(config.validate(), "voices.speech exceeds 64 characters")?;
    config.voices.speech = "Alloy".to_string();
    config.voices.soundscape = "Algenib!".to_string();
    assert_invalid(config.validate(), "voices.soundscape must contain only ASCII")?;
    Ok(())
}

#[test]
fn separator_must_be_bounded() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.triage.follow_up_separator = String::new();
    assert_invalid(config.validate(), "triage.follow_up_separator must be non-empty")?;
    config.triage.follow_up_separator = "-".repeat(257);
    assert_invalid(config.validate(), "triage.follow_up_separator exceeds 256 characters")?;
    Ok(())
}

#[test]
fn limits_must_be_positive_and_ordered() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.limits.max_disclosure_chars = 0;
    assert_invalid(config.validate(), "limits.max_disclosure_chars must be greater than zero")?;
    config.limits.max_disclosure_chars = 100;
    config.limits.whisper_min_chars = 300;
    assert_invalid(
        config.validate(),
        "limits.whisper_min_chars must not exceed limits.whisper_max_chars",
    )?;
    Ok(())
}

#[test]
fn unknown_keys_fail_closed() -> TestResult {
    assert_invalid(SparkwellConfig::from_toml_str("[audio]\nvolume = 3\n"), "config parse error")?;
    assert_invalid(SparkwellConfig::from_toml_str("[network]\n"), "config parse error")?;
    Ok(())
}

#[test]
fn parsed_values_are_validated() -> TestResult {
    assert_invalid(
        SparkwellConfig::from_toml_str("[audio]\nbit_depth = 20\n"),
        "audio.bit_depth",
    )?;
    Ok(())
}
