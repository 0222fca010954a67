// crates/sparkwell-flows/src/companion.rs
// ============================================================================
// Module: Sparkwell Companion
// Description: Facade bundling configuration, gateway, observer, and every flow.
// Purpose: Give the UI collaborator one entry point per user-facing action.
// Dependencies: crate::{audio, avatar, echo, error, reflection, spark}, sparkwell-*
// ============================================================================

//! ## Overview
//! A [`Companion`] is built once at startup. Construction validates the
//! configuration and parses every instruction template; afterwards the value
//! is immutable and can be shared across any number of concurrent sessions.
//!
//! Invariants:
//! - The companion holds no per-conversation state. Triage decisions and
//!   sessions are owned by the caller.
//! - Caller-input checks run before the gateway is called.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use sparkwell_config::SparkwellConfig;
use sparkwell_core::ContractContext;
use sparkwell_core::ContractObserver;
use sparkwell_core::GenerationGateway;
use sparkwell_core::NoopObserver;
use sparkwell_core::ReadyContext;
use sparkwell_core::TherapeuticArtifact;
use sparkwell_core::Triage;
use sparkwell_core::TriageDecision;
use sparkwell_media::DataUri;
use sparkwell_media::Synthesizer;

use crate::audio::soundscape_instruction;
use crate::avatar::generate_avatar;
use crate::echo::EchoInput;
use crate::echo::FutureSelfEcho;
use crate::echo::FutureSelfEchoContract;
use crate::echo::future_self_echo_contract;
use crate::error::FlowError;
use crate::reflection::Reflection;
use crate::reflection::ReflectionContract;
use crate::reflection::check_thought;
use crate::reflection::reflection_contract;
use crate::spark::CognitiveSparkContract;
use crate::spark::SparkInput;
use crate::spark::cognitive_spark_contract;
use crate::spark::narration_script;

// ============================================================================
// SECTION: Companion
// ============================================================================

/// Wellness companion facade.
pub struct Companion {
    /// Validated configuration.
    config: SparkwellConfig,
    /// Generation backend.
    gateway: Arc<dyn GenerationGateway>,
    /// Contract observability sink.
    observer: Arc<dyn ContractObserver>,
    /// Clarify-or-proceed step.
    triage: Triage,
    /// Final artifact contract.
    spark: CognitiveSparkContract,
    /// Whisper reflection contract.
    reflection: ReflectionContract,
    /// Future-self echo contract.
    echo: FutureSelfEchoContract,
    /// Speech voice chain for narration and text to speech.
    speech: Synthesizer,
    /// Neutral voice chain for soundscapes.
    soundscape: Synthesizer,
}

impl Companion {
    /// Builds a companion that discards observer events.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the configuration is invalid or a template
    /// fails to parse.
    pub fn new(
        config: SparkwellConfig,
        gateway: Arc<dyn GenerationGateway>,
    ) -> Result<Self, FlowError> {
        Self::with_observer(config, gateway, Arc::new(NoopObserver))
    }

    /// Builds a companion with an explicit observer.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the configuration is invalid or a template
    /// fails to parse.
    pub fn with_observer(
        config: SparkwellConfig,
        gateway: Arc<dyn GenerationGateway>,
        observer: Arc<dyn ContractObserver>,
    ) -> Result<Self, FlowError> {
        config.validate()?;
        let triage = Triage::with_settings(
            config.triage.follow_up_separator.clone(),
            config.limits.max_disclosure_chars,
        )?;
        let speech = Synthesizer::new(config.speech_voice());
        let soundscape = Synthesizer::new(config.soundscape_voice());
        Ok(Self {
            triage,
            spark: cognitive_spark_contract()?,
            reflection: reflection_contract()?,
            echo: future_self_echo_contract()?,
            speech,
            soundscape,
            config,
            gateway,
            observer,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SparkwellConfig {
        &self.config
    }

    /// Returns the triage step, for callers driving a
    /// [`TriageSession`](sparkwell_core::TriageSession).
    #[must_use]
    pub const fn triage(&self) -> &Triage {
        &self.triage
    }

    /// Returns the invocation context bound to this companion's collaborators.
    #[must_use]
    pub fn context(&self) -> ContractContext<'_> {
        ContractContext::with_observer(self.gateway.as_ref(), self.observer.as_ref())
    }

    // ------------------------------------------------------------------------
    // Triage
    // ------------------------------------------------------------------------

    /// Classifies an initial disclosure.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Triage`] for blank or oversized disclosures and
    /// classification failures.
    pub async fn start_triage(&self, disclosure: &str) -> Result<TriageDecision, FlowError> {
        Ok(self.triage.start(&self.context(), disclosure).await?)
    }

    /// Merges the follow-up answer into a pending decision.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Triage`] for a ready decision or a blank answer.
    pub fn continue_triage(
        &self,
        decision: TriageDecision,
        answer: &str,
    ) -> Result<ReadyContext, FlowError> {
        Ok(self.triage.continue_with(decision, answer)?)
    }

    // ------------------------------------------------------------------------
    // Structured Flows
    // ------------------------------------------------------------------------

    /// Generates the therapeutic artifact for a ready context.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Contract`] when generation or validation fails.
    pub async fn cognitive_spark(
        &self,
        context: &ReadyContext,
    ) -> Result<TherapeuticArtifact, FlowError> {
        let input = SparkInput {
            situation: context.as_str().to_string(),
        };
        Ok(self.spark.invoke(&self.context(), &input).await?)
    }

    /// Reflects on a single shared thought.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the thought is out of bounds or the
    /// contract fails.
    pub async fn reflect_on_thought(&self, thought: &str) -> Result<Reflection, FlowError> {
        check_thought(&self.config.limits, thought)?;
        Ok(self.reflection.invoke(&self.context(), &thought.trim().to_string()).await?)
    }

    /// Writes a message from the user's future self.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] for a blank situation or a contract failure.
    pub async fn future_self_echo(
        &self,
        situation: &str,
        goal: Option<&str>,
    ) -> Result<FutureSelfEcho, FlowError> {
        if situation.trim().is_empty() {
            return Err(FlowError::EmptyInput { field: "situation" });
        }
        let input = EchoInput::new(situation, goal);
        Ok(self.echo.invoke(&self.context(), &input).await?)
    }

    // ------------------------------------------------------------------------
    // Media Flows
    // ------------------------------------------------------------------------

    /// Reads an artifact aloud with the speech voice.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Speech`] when synthesis fails.
    pub async fn narrate(&self, artifact: &TherapeuticArtifact) -> Result<DataUri, FlowError> {
        let script = narration_script(artifact);
        Ok(self.speech.synthesize(self.gateway.as_ref(), &script).await?)
    }

    /// Generates an avatar for an emotional-state description.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] when the description is blank, generation fails,
    /// or the image cannot be packaged.
    pub async fn avatar(&self, description: &str) -> Result<DataUri, FlowError> {
        generate_avatar(self.gateway.as_ref(), description).await
    }

    /// Synthesizes a calming soundscape from a prompt.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] for a blank prompt or a synthesis failure.
    pub async fn soundscape(&self, prompt: &str) -> Result<DataUri, FlowError> {
        if prompt.trim().is_empty() {
            return Err(FlowError::EmptyInput { field: "prompt" });
        }
        let instruction = soundscape_instruction(prompt.trim());
        Ok(self.soundscape.synthesize(self.gateway.as_ref(), &instruction).await?)
    }

    /// Speaks arbitrary text with the speech voice.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Speech`] for blank text or a synthesis failure.
    pub async fn text_to_speech(&self, text: &str) -> Result<DataUri, FlowError> {
        Ok(self.speech.synthesize(self.gateway.as_ref(), text).await?)
    }
}
