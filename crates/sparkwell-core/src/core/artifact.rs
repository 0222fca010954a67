// crates/sparkwell-core/src/core/artifact.rs
// ============================================================================
// Module: Sparkwell Therapeutic Artifact
// Description: Final structured response produced for a user disclosure.
// Purpose: Define the artifact type and the shape a model response must satisfy.
// Dependencies: crate::core::shape, serde
// ============================================================================

//! ## Overview
//! A [`TherapeuticArtifact`] is the multi-part response shown to the user:
//! reassurance, a titled exercise, realizations, an instant coping strategy,
//! and an optional music suggestion from a closed list. The wire form uses
//! camelCase field names; [`TherapeuticArtifact::shape`] describes it.

use serde::Deserialize;
use serde::Serialize;

use crate::core::shape::Field;
use crate::core::shape::Shape;

// ============================================================================
// SECTION: Music Suggestions
// ============================================================================

/// Closed set of music suggestions a model may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTitle {
    /// 432 Hz healing frequency.
    #[serde(rename = "432Hz Healing Frequency")]
    HealingFrequency432,
    /// Binaural beats for focus.
    #[serde(rename = "Binaural Beats for Focus")]
    BinauralBeatsForFocus,
    /// 528 Hz solfeggio frequency.
    #[serde(rename = "528Hz Solfeggio Frequency")]
    SolfeggioFrequency528,
    /// Delta waves for deep sleep.
    #[serde(rename = "Deep Sleep Delta Waves")]
    DeepSleepDeltaWaves,
    /// Theta waves for meditation.
    #[serde(rename = "Theta Waves for Meditation")]
    ThetaWavesForMeditation,
}

impl MusicTitle {
    /// Every title, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::HealingFrequency432,
        Self::BinauralBeatsForFocus,
        Self::SolfeggioFrequency528,
        Self::DeepSleepDeltaWaves,
        Self::ThetaWavesForMeditation,
    ];

    /// Returns the display title, identical to the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HealingFrequency432 => "432Hz Healing Frequency",
            Self::BinauralBeatsForFocus => "Binaural Beats for Focus",
            Self::SolfeggioFrequency528 => "528Hz Solfeggio Frequency",
            Self::DeepSleepDeltaWaves => "Deep Sleep Delta Waves",
            Self::ThetaWavesForMeditation => "Theta Waves for Meditation",
        }
    }
}

/// Optional music suggestion attached to an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicSuggestion {
    /// Suggested track family.
    pub title: MusicTitle,
    /// Why the suggestion fits the situation.
    pub description: String,
}

/// Titled coping strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopingStrategy {
    /// Strategy title.
    pub title: String,
    /// Strategy description.
    pub description: String,
}

// ============================================================================
// SECTION: Artifact
// ============================================================================

/// Final therapeutic response for a disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapeuticArtifact {
    /// Title of the primary coping exercise.
    pub title: String,
    /// Validating, empathetic opening message.
    pub reassurance: String,
    /// Step-by-step exercise text.
    pub exercise: String,
    /// Short perspective-shifting realizations, in order.
    pub realizations: Vec<String>,
    /// Quick alternative strategy.
    pub instant_coping_strategy: CopingStrategy,
    /// Optional music suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_suggestion: Option<MusicSuggestion>,
}

impl TherapeuticArtifact {
    /// Returns the shape a model response must satisfy.
    #[must_use]
    pub fn shape() -> Shape {
        let titles: Vec<&str> = MusicTitle::ALL.iter().map(|title| title.as_str()).collect();
        Shape::object(vec![
            Field::required("title", Shape::string())
                .describe("A short, engaging title for the main coping exercise."),
            Field::required("reassurance", Shape::string()).describe(
                "A short, empathetic, validating message that acknowledges the user's feelings.",
            ),
            Field::required("exercise", Shape::string())
                .describe("A clear, step-by-step guide for a practical coping exercise."),
            Field::required("realizations", Shape::array_min(Shape::string(), 1)).describe(
                "Two or three short sentences that offer perspective or normalize the experience.",
            ),
            Field::required(
                "instantCopingStrategy",
                Shape::object(vec![
                    Field::required("title", Shape::string()),
                    Field::required("description", Shape::string()),
                ]),
            )
            .describe("A quick alternative strategy if the main exercise does not help."),
            Field::optional(
                "musicSuggestion",
                Shape::object(vec![
                    Field::required("title", Shape::one_of_strings(&titles)),
                    Field::required("description", Shape::string()),
                ]),
            )
            .describe("An optional calming music suggestion and why it fits."),
        ])
    }
}
