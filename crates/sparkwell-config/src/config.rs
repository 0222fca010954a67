// crates/sparkwell-config/src/config.rs
// ============================================================================
// Module: Sparkwell Configuration
// Description: Configuration loading and validation for Sparkwell.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: sparkwell-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with a strict size limit. Every
//! section is optional and defaults to the values the synthesis backend and
//! triage flow expect. Invalid values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use sparkwell_core::DEFAULT_BIT_DEPTH;
use sparkwell_core::DEFAULT_CHANNELS;
use sparkwell_core::DEFAULT_FOLLOW_UP_SEPARATOR;
use sparkwell_core::DEFAULT_MAX_DISCLOSURE_CHARS;
use sparkwell_core::DEFAULT_SAMPLE_RATE;
use sparkwell_core::PcmFormat;
use sparkwell_core::VoiceParams;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "sparkwell.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SPARKWELL_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Accepted sample rates in Hz.
const SAMPLE_RATE_RANGE: std::ops::RangeInclusive<u32> = 8_000 ..= 192_000;
/// Accepted channel counts.
const CHANNEL_RANGE: std::ops::RangeInclusive<u16> = 1 ..= 2;
/// Accepted bit depths.
const BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];
/// Maximum voice name length.
const MAX_VOICE_NAME_LENGTH: usize = 64;
/// Maximum follow-up separator length in characters.
const MAX_SEPARATOR_LENGTH: usize = 256;
/// Default speech voice.
const DEFAULT_SPEECH_VOICE: &str = "Alloy";
/// Default soundscape voice.
const DEFAULT_SOUNDSCAPE_VOICE: &str = "Algenib";
/// Default minimum whisper length in characters.
const DEFAULT_WHISPER_MIN_CHARS: usize = 5;
/// Default maximum whisper length in characters.
const DEFAULT_WHISPER_MAX_CHARS: usize = 280;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Sparkwell configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SparkwellConfig {
    /// PCM format expected from the speech backend.
    #[serde(default)]
    pub audio: AudioConfig,
    /// Voice selection.
    #[serde(default)]
    pub voices: VoiceConfig,
    /// Triage settings.
    #[serde(default)]
    pub triage: TriageConfig,
    /// Input length limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl SparkwellConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, `SPARKWELL_CONFIG`, `sparkwell.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.audio.validate()?;
        self.voices.validate()?;
        self.triage.validate()?;
        self.limits.validate()
    }

    /// Returns the configured PCM format.
    #[must_use]
    pub const fn pcm_format(&self) -> PcmFormat {
        PcmFormat {
            sample_rate: self.audio.sample_rate,
            channels: self.audio.channels,
            bit_depth: self.audio.bit_depth,
        }
    }

    /// Returns the voice used for narration and text to speech.
    #[must_use]
    pub fn speech_voice(&self) -> VoiceParams {
        VoiceParams::new(self.voices.speech.clone()).with_format(self.pcm_format())
    }

    /// Returns the voice used for soundscapes.
    #[must_use]
    pub fn soundscape_voice(&self) -> VoiceParams {
        VoiceParams::new(self.voices.soundscape.clone()).with_format(self.pcm_format())
    }
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// PCM format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Channel count.
    #[serde(default = "default_channels")]
    pub channels: u16,
    /// Bits per sample.
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            bit_depth: default_bit_depth(),
        }
    }
}

impl AudioConfig {
    /// Validates audio configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !SAMPLE_RATE_RANGE.contains(&self.sample_rate) {
            return Err(ConfigError::Invalid(format!(
                "audio.sample_rate must be between {} and {}",
                SAMPLE_RATE_RANGE.start(),
                SAMPLE_RATE_RANGE.end()
            )));
        }
        if !CHANNEL_RANGE.contains(&self.channels) {
            return Err(ConfigError::Invalid("audio.channels must be 1 or 2".to_string()));
        }
        if !BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(ConfigError::Invalid(
                "audio.bit_depth must be one of 8, 16, 24, 32".to_string(),
            ));
        }
        Ok(())
    }
}

/// Voice configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceConfig {
    /// Voice for narration and text to speech.
    #[serde(default = "default_speech_voice")]
    pub speech: String,
    /// Voice for soundscapes.
    #[serde(default = "default_soundscape_voice")]
    pub soundscape: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            speech: default_speech_voice(),
            soundscape: default_soundscape_voice(),
        }
    }
}

impl VoiceConfig {
    /// Validates voice configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_voice_name("voices.speech", &self.speech)?;
        validate_voice_name("voices.soundscape", &self.soundscape)
    }
}

/// Triage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Phrase placed between a disclosure and its follow-up answer.
    #[serde(default = "default_follow_up_separator")]
    pub follow_up_separator: String,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            follow_up_separator: default_follow_up_separator(),
        }
    }
}

impl TriageConfig {
    /// Validates triage configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.follow_up_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "triage.follow_up_separator must be non-empty".to_string(),
            ));
        }
        if self.follow_up_separator.chars().count() > MAX_SEPARATOR_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "triage.follow_up_separator exceeds {MAX_SEPARATOR_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

/// Input length limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum disclosure length in characters.
    #[serde(default = "default_max_disclosure_chars")]
    pub max_disclosure_chars: usize,
    /// Minimum whisper length in characters.
    #[serde(default = "default_whisper_min_chars")]
    pub whisper_min_chars: usize,
    /// Maximum whisper length in characters.
    #[serde(default = "default_whisper_max_chars")]
    pub whisper_max_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_disclosure_chars: default_max_disclosure_chars(),
            whisper_min_chars: default_whisper_min_chars(),
            whisper_max_chars: default_whisper_max_chars(),
        }
    }
}

impl LimitsConfig {
    /// Validates limit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("limits.max_disclosure_chars", self.max_disclosure_chars),
            ("limits.whisper_min_chars", self.whisper_min_chars),
            ("limits.whisper_max_chars", self.whisper_max_chars),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
            }
        }
        if self.whisper_min_chars > self.whisper_max_chars {
            return Err(ConfigError::Invalid(
                "limits.whisper_min_chars must not exceed limits.whisper_max_chars".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
///
/// The length limit applies to explicit and environment paths alike.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let resolved = match path {
        Some(path) => path.to_path_buf(),
        None => env::var_os(CONFIG_ENV_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from),
    };
    if resolved.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    Ok(resolved)
}

/// Validates a prebuilt voice name.
fn validate_voice_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if name.len() > MAX_VOICE_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "{field} exceeds {MAX_VOICE_NAME_LENGTH} characters"
        )));
    }
    if !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_') {
        return Err(ConfigError::Invalid(format!(
            "{field} must contain only ASCII letters, digits, '-' or '_'"
        )));
    }
    Ok(())
}

/// Default sample rate.
const fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

/// Default channel count.
const fn default_channels() -> u16 {
    DEFAULT_CHANNELS
}

/// Default bit depth.
const fn default_bit_depth() -> u16 {
    DEFAULT_BIT_DEPTH
}

/// Default speech voice name.
fn default_speech_voice() -> String {
    DEFAULT_SPEECH_VOICE.to_string()
}

/// Default soundscape voice name.
fn default_soundscape_voice() -> String {
    DEFAULT_SOUNDSCAPE_VOICE.to_string()
}

/// Default follow-up separator.
fn default_follow_up_separator() -> String {
    DEFAULT_FOLLOW_UP_SEPARATOR.to_string()
}

/// Default maximum disclosure length.
const fn default_max_disclosure_chars() -> usize {
    DEFAULT_MAX_DISCLOSURE_CHARS
}

/// Default minimum whisper length.
const fn default_whisper_min_chars() -> usize {
    DEFAULT_WHISPER_MIN_CHARS
}

/// Default maximum whisper length.
const fn default_whisper_max_chars() -> usize {
    DEFAULT_WHISPER_MAX_CHARS
}
