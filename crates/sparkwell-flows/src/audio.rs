// crates/sparkwell-flows/src/audio.rs
// ============================================================================
// Module: Sparkwell Audio Flows
// Description: Instruction shaping for soundscape synthesis.
// Purpose: Keep the soundscape framing in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Soundscapes reuse the speech backend with a neutral voice; the user's
//! prompt is framed so the backend renders an ambient piece instead of
//! reading the text aloud. Narration and text to speech send their text
//! unchanged.

/// Builds the soundscape instruction for a user prompt.
#[must_use]
pub fn soundscape_instruction(prompt: &str) -> String {
    format!(
        "(Soundscape) {prompt}. Synthesize a short, calming audio experience based on this \
         description."
    )
}
