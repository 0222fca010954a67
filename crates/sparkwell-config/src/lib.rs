// crates/sparkwell-config/src/lib.rs
// ============================================================================
// Module: Sparkwell Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for sparkwell.toml semantics.
// Dependencies: sparkwell-core, serde, toml
// ============================================================================

//! ## Overview
//! `sparkwell-config` defines the configuration model for Sparkwell: the PCM
//! format expected from the speech backend, voice names, the triage merge
//! separator, and input length limits. Validation is strict and fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
