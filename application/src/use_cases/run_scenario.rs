//! Run Scenario use case
//!
//! Drives one scenario end-to-end:
//! `Init -> Interrogating(1..=3) -> Accusing -> Resolved`.
//! Exchanges within a scenario are strictly sequential because every prompt
//! depends on the memory left by the previous exchange.

use crate::agents::{PersonaAgent, ReasoningAgent};
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use persona_bias_domain::{
    Accusation, AccusationMapping, DomainError, INTERROGATION_ROUNDS, Model, PersonaMemory,
    QUESTIONS_PER_SUSPECT, ReasoningMemory, Scenario, ScenarioPhase, ScenarioResult,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while running a scenario
#[derive(Error, Debug)]
pub enum RunScenarioError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(#[from] DomainError),

    #[error("Gateway error while {phase}: {source}")]
    Gateway {
        phase: ScenarioPhase,
        #[source]
        source: GatewayError,
    },
}

impl RunScenarioError {
    fn gateway(phase: ScenarioPhase) -> impl FnOnce(GatewayError) -> Self {
        move |source| RunScenarioError::Gateway { phase, source }
    }
}

/// Everything a finished scenario run produced
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub result: ScenarioResult,
    pub accusation: Accusation,
    pub mapping: AccusationMapping,
    /// Final memory of every persona, in roster order
    pub persona_memories: Vec<(String, PersonaMemory)>,
    pub reasoning_memory: ReasoningMemory,
}

/// Use case for running a single scenario
pub struct RunScenarioUseCase<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    model: Model,
    logger: Arc<dyn AuditLogger>,
}

impl<G: LlmGateway + ?Sized> RunScenarioUseCase<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self {
            gateway,
            model,
            logger: Arc::new(NoAuditLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Run the full protocol for `scenario`
    pub async fn execute(&self, scenario: &Scenario) -> Result<ScenarioOutcome, RunScenarioError> {
        scenario.validate()?;

        // Init
        debug!("Scenario phase: {}", ScenarioPhase::Init);
        let mut reasoning =
            ReasoningAgent::initialize(Arc::clone(&self.gateway), self.model.clone(), scenario);
        let mut personas: Vec<PersonaAgent<G>> = scenario
            .personas
            .iter()
            .map(|p| PersonaAgent::new(Arc::clone(&self.gateway), self.model.clone(), p.clone()))
            .collect();

        // Interrogating
        for round in 1..=INTERROGATION_ROUNDS {
            let phase = ScenarioPhase::Interrogating(round);
            debug!("Scenario phase: {}", phase);
            reasoning.begin_round(round);

            for persona in personas.iter_mut() {
                for _ in 0..QUESTIONS_PER_SUSPECT {
                    let question = reasoning
                        .ask_question(persona.persona())
                        .await
                        .map_err(RunScenarioError::gateway(phase))?;
                    let answer = persona
                        .respond(&question)
                        .await
                        .map_err(RunScenarioError::gateway(phase))?;

                    persona.record_exchange(&question, &answer);
                    reasoning.record_interrogation(persona.persona(), &question, &answer);
                }
            }
        }

        // Accusing
        debug!("Scenario phase: {}", ScenarioPhase::Accusing);
        let mapping = AccusationMapping::from_personas(&scenario.personas);
        let accusation = reasoning
            .make_accusation(&mapping, &scenario.question)
            .await
            .map_err(RunScenarioError::gateway(ScenarioPhase::Accusing))?;

        debug!("Scenario phase: {}", ScenarioPhase::Resolved);
        let result = ScenarioResult::from_accusation(&accusation, &scenario.group);
        info!(
            "Scenario resolved: group={}, accused={:?}, biased={}, general={}",
            scenario.group, result.accused_ethnicity, result.biased_count, result.general_count
        );

        let outcome = ScenarioOutcome {
            result,
            accusation,
            mapping,
            persona_memories: personas
                .into_iter()
                .map(|agent| {
                    let (persona, memory) = agent.into_parts();
                    (persona.name, memory)
                })
                .collect(),
            reasoning_memory: reasoning.into_memory(),
        };

        self.logger.log(Self::audit_event(scenario, &outcome));
        Ok(outcome)
    }

    fn audit_event(scenario: &Scenario, outcome: &ScenarioOutcome) -> AuditEvent {
        let personas: Vec<_> = outcome
            .persona_memories
            .iter()
            .map(|(name, memory)| {
                json!({
                    "name": name,
                    "ethnicity": scenario.personas.get(name).map(|p| p.ethnicity()),
                    "memory": memory,
                })
            })
            .collect();

        AuditEvent::new(
            "scenario_result",
            json!({
                "scenario": scenario.scenario,
                "group": scenario.group,
                "personas": personas,
                "reasoning_memory": outcome.reasoning_memory,
                "choices": outcome.mapping,
                "accusation": outcome.accusation,
                "tally": outcome.result,
            }),
        )
    }
}
