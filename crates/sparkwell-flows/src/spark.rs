// crates/sparkwell-flows/src/spark.rs
// ============================================================================
// Module: Sparkwell Cognitive Spark
// Description: Final therapeutic artifact contract and its read-aloud script.
// Purpose: Turn a ready triage context into a validated therapeutic artifact.
// Dependencies: sparkwell-core, serde
// ============================================================================

//! ## Overview
//! The cognitive spark contract receives the context produced by triage and
//! asks the model for a [`TherapeuticArtifact`]. [`narration_script`] flattens
//! an artifact into the text read aloud by the narration flow.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use sparkwell_core::Field;
use sparkwell_core::PromptContract;
use sparkwell_core::Shape;
use sparkwell_core::TemplateError;
use sparkwell_core::TherapeuticArtifact;

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Contract identifier of the cognitive spark flow.
pub const COGNITIVE_SPARK_CONTRACT_ID: &str = "flows.cognitive_spark";

/// Separator between narration segments.
pub const NARRATION_SEPARATOR: &str = ". ";

/// Artifact instruction.
const COGNITIVE_SPARK_TEMPLATE: &str = r#"You are a wellness coach for young adults. Your tone is direct, empathetic, and human. Give practical, actionable advice that genuinely helps.

Respond to the user's situation with encouragement, a practical exercise, and a realistic alternative. The response should feel like it comes from someone who understands and cares.

User's situation:
"{{{situation}}}"

Generate the following:

1. reassurance: A direct, empathetic, validating message. Acknowledge the feelings without downplaying them.
2. title: A clear, actionable title for the primary coping exercise.
3. exercise: A step-by-step guide for a practical coping exercise, such as a CBT or mindfulness technique, relevant to the situation.
4. realizations: Two or three short insights that shift perspective, normalize the feelings, and empower the user.
5. instantCopingStrategy: A realistic alternative with a title and description for when the primary exercise is not feasible or does not help. Be honest here; a reality check is fine when the situation calls for it, always with the user's well-being in mind.
6. musicSuggestion (optional): One calming track family from the allowed titles and why it fits."#;

/// Input of the cognitive spark contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SparkInput {
    /// Context text: the disclosure, possibly merged with a follow-up answer.
    pub situation: String,
}

/// Cognitive spark contract type.
pub type CognitiveSparkContract = PromptContract<SparkInput, TherapeuticArtifact>;

/// Builds the cognitive spark contract.
///
/// # Errors
///
/// Returns [`TemplateError`] when the instruction template is invalid.
pub fn cognitive_spark_contract() -> Result<CognitiveSparkContract, TemplateError> {
    PromptContract::new(
        COGNITIVE_SPARK_CONTRACT_ID,
        Shape::object(vec![
            Field::required("situation", Shape::string())
                .describe("The situation the user is facing."),
        ]),
        TherapeuticArtifact::shape(),
        COGNITIVE_SPARK_TEMPLATE,
    )
}

// ============================================================================
// SECTION: Narration
// ============================================================================

/// Builds the read-aloud script for an artifact.
///
/// Segments, in order: reassurance, exercise heading, exercise, realizations
/// heading, each realization, coping strategy heading, coping strategy
/// description. The music suggestion is not narrated.
#[must_use]
pub fn narration_script(artifact: &TherapeuticArtifact) -> String {
    let mut segments = Vec::with_capacity(artifact.realizations.len() + 6);
    segments.push(artifact.reassurance.clone());
    segments.push(format!("Cognitive Exercise: {}", artifact.title));
    segments.push(artifact.exercise.clone());
    segments.push("Key Realizations".to_string());
    segments.extend(artifact.realizations.iter().cloned());
    segments.push(format!(
        "Instant Coping Strategy: {}",
        artifact.instant_coping_strategy.title
    ));
    segments.push(artifact.instant_coping_strategy.description.clone());
    segments.join(NARRATION_SEPARATOR)
}
