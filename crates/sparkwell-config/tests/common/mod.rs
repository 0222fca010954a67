// crates/sparkwell-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for sparkwell-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use sparkwell_config::ConfigError;
use sparkwell_config::SparkwellConfig;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<SparkwellConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<SparkwellConfig, toml::de::Error> {
    config_from_toml("")
}

/// Asserts that a result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
