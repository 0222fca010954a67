// crates/sparkwell-core/src/runtime/contract.rs
// ============================================================================
// Module: Sparkwell Prompt Contracts
// Description: Instruction template + input shape + output shape bound into one invocable unit.
// Purpose: Render instructions, call the gateway, and fail loudly on shape violations.
// Dependencies: crate::{core, interfaces}, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`PromptContract`] is built once at startup and never mutated. Each
//! invocation:
//! 1. validates the caller's input against the input shape (caller bug on failure),
//! 2. renders the instruction template from the input,
//! 3. calls the [`GenerationGateway`] with the instruction and output shape,
//! 4. validates the raw response against the output shape,
//! 5. deserializes and returns the typed value.
//!
//! Invariants:
//! - No retries happen here; retry policy belongs to the gateway or caller.
//! - Nothing is returned until the output has passed validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::ContractId;
use crate::core::ErrorKind;
use crate::core::INPUT_BINDING;
use crate::core::PromptTemplate;
use crate::core::Shape;
use crate::core::TemplateError;
use crate::core::Violation;
use crate::core::validate;
use crate::interfaces::ContractEvent;
use crate::interfaces::ContractObserver;
use crate::interfaces::ContractPhase;
use crate::interfaces::GatewayError;
use crate::interfaces::GenerationGateway;
use crate::interfaces::NoopObserver;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Prompt contract invocation errors.
///
/// # Invariants
/// - Each variant maps to exactly one [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Caller input failed the input shape.
    #[error("contract {contract}: invalid input at {violation}")]
    CallerInput {
        /// Contract identifier.
        contract: ContractId,
        /// First input violation.
        violation: Violation,
    },
    /// Gateway output failed the output shape.
    #[error("contract {contract}: schema violation at {violation}")]
    SchemaViolation {
        /// Contract identifier.
        contract: ContractId,
        /// First output violation.
        violation: Violation,
    },
    /// Gateway failed or returned nothing.
    #[error("contract {contract}: {source}")]
    Generation {
        /// Contract identifier.
        contract: ContractId,
        /// Underlying gateway failure.
        #[source]
        source: GatewayError,
    },
}

impl ContractError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CallerInput { .. } => ErrorKind::CallerInput,
            Self::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            Self::Generation { .. } => ErrorKind::GenerationFailure,
        }
    }

    /// Returns the contract that raised the error.
    #[must_use]
    pub const fn contract(&self) -> &ContractId {
        match self {
            Self::CallerInput { contract, .. }
            | Self::SchemaViolation { contract, .. }
            | Self::Generation { contract, .. } => contract,
        }
    }

    /// Returns the shape violation, when the error carries one.
    #[must_use]
    pub const fn violation(&self) -> Option<&Violation> {
        match self {
            Self::CallerInput { violation, .. } | Self::SchemaViolation { violation, .. } => {
                Some(violation)
            }
            Self::Generation { .. } => None,
        }
    }
}

// ============================================================================
// SECTION: Invocation Context
// ============================================================================

/// Request-scoped collaborators for a contract invocation.
#[derive(Clone, Copy)]
pub struct ContractContext<'a> {
    /// Generation backend.
    gateway: &'a dyn GenerationGateway,
    /// Observability sink.
    observer: &'a dyn ContractObserver,
}

impl<'a> ContractContext<'a> {
    /// Creates a context that discards observer events.
    #[must_use]
    pub fn new(gateway: &'a dyn GenerationGateway) -> Self {
        Self {
            gateway,
            observer: &NoopObserver,
        }
    }

    /// Creates a context with an explicit observer.
    #[must_use]
    pub fn with_observer(
        gateway: &'a dyn GenerationGateway,
        observer: &'a dyn ContractObserver,
    ) -> Self {
        Self { gateway, observer }
    }

    /// Returns the gateway.
    #[must_use]
    pub fn gateway(&self) -> &'a dyn GenerationGateway {
        self.gateway
    }

    /// Returns the observer.
    #[must_use]
    pub fn observer(&self) -> &'a dyn ContractObserver {
        self.observer
    }
}

// ============================================================================
// SECTION: Prompt Contract
// ============================================================================

/// Bound instruction template, input shape, and output shape.
///
/// # Invariants
/// - The template only references fields the input shape declares.
pub struct PromptContract<I, O> {
    /// Contract identifier for diagnostics.
    id: ContractId,
    /// Shape of valid caller input.
    input_shape: Shape,
    /// Shape of valid gateway output.
    output_shape: Shape,
    /// Parsed instruction template.
    template: PromptTemplate,
    /// Input and output type markers.
    types: PhantomData<fn(&I) -> O>,
}

impl<I, O> PromptContract<I, O>
where
    I: Serialize + Sync,
    O: DeserializeOwned,
{
    /// Builds a contract, parsing the template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed or references
    /// fields the input shape does not declare.
    pub fn new(
        id: impl Into<ContractId>,
        input_shape: Shape,
        output_shape: Shape,
        template: &str,
    ) -> Result<Self, TemplateError> {
        let template = PromptTemplate::parse(template)?;
        let mut declared = BTreeSet::new();
        declared_roots(&input_shape, &mut declared);
        if let Some(field) =
            template.referenced_fields().into_iter().find(|field| !declared.contains(field))
        {
            return Err(TemplateError::UndeclaredField { field });
        }
        Ok(Self {
            id: id.into(),
            input_shape,
            output_shape,
            template,
            types: PhantomData,
        })
    }

    /// Returns the contract identifier.
    #[must_use]
    pub const fn id(&self) -> &ContractId {
        &self.id
    }

    /// Returns the input shape.
    #[must_use]
    pub const fn input_shape(&self) -> &Shape {
        &self.input_shape
    }

    /// Returns the output shape.
    #[must_use]
    pub const fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    /// Validates the input and renders the instruction without calling the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::CallerInput`] when the input fails its shape.
    pub fn render(&self, input: &I) -> Result<String, ContractError> {
        let value = serde_json::to_value(input).map_err(|err| ContractError::CallerInput {
            contract: self.id.clone(),
            violation: Violation::new("", format!("input is not serializable: {err}")),
        })?;
        validate(&self.input_shape, &value).map_err(|violation| ContractError::CallerInput {
            contract: self.id.clone(),
            violation,
        })?;
        Ok(self.template.render(&value))
    }

    /// Invokes the contract against the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when input, generation, or output validation fails.
    pub async fn invoke(&self, ctx: &ContractContext<'_>, input: &I) -> Result<O, ContractError> {
        let result = self.run(ctx, input).await;
        let (phase, error_kind) = match &result {
            Ok(_) => (ContractPhase::Completed, None),
            Err(err) => (ContractPhase::Failed, Some(err.kind())),
        };
        ctx.observer().record(&ContractEvent {
            contract_id: self.id.clone(),
            phase,
            error_kind,
            instruction_chars: None,
        });
        result
    }

    /// Runs the invocation steps.
    async fn run(&self, ctx: &ContractContext<'_>, input: &I) -> Result<O, ContractError> {
        let instruction = self.render(input)?;
        ctx.observer().record(&ContractEvent {
            contract_id: self.id.clone(),
            phase: ContractPhase::Invoked,
            error_kind: None,
            instruction_chars: Some(instruction.chars().count()),
        });

        let raw = ctx
            .gateway()
            .generate_structured(&instruction, &self.output_shape)
            .await
            .map_err(|source| self.generation_error(source))?;
        if raw.is_null() {
            return Err(self.generation_error(GatewayError::EmptyResponse));
        }

        validate(&self.output_shape, &raw).map_err(|violation| ContractError::SchemaViolation {
            contract: self.id.clone(),
            violation,
        })?;
        serde_json::from_value(raw).map_err(|err| ContractError::SchemaViolation {
            contract: self.id.clone(),
            violation: Violation::new("", err.to_string()),
        })
    }

    /// Wraps a gateway failure with the contract identifier.
    fn generation_error(&self, source: GatewayError) -> ContractError {
        ContractError::Generation {
            contract: self.id.clone(),
            source,
        }
    }
}

/// Collects the template field names an input shape makes available.
fn declared_roots(shape: &Shape, declared: &mut BTreeSet<String>) {
    match shape {
        Shape::Object(fields) => {
            declared.extend(fields.iter().map(|field| field.name.clone()));
        }
        Shape::Union(alternatives) => {
            for alternative in alternatives {
                declared_roots(alternative, declared);
            }
        }
        Shape::Primitive(_) | Shape::Array { .. } | Shape::Literal(_) => {
            declared.insert(INPUT_BINDING.to_string());
        }
    }
}
