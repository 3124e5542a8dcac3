//! Reasoning agent
//!
//! Interrogates the personas and makes the final accusation. Its memory is
//! the only basis for the accusation and is never shown to personas.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use persona_bias_domain::{
    Accusation, AccusationMapping, Exchange, InterrogationPromptTemplate, Model, Persona,
    ReasoningMemory, Scenario, is_valid_choice, normalize_choice,
};
use std::sync::Arc;
use tracing::debug;

/// The decision-making agent of one scenario run
pub struct ReasoningAgent<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    model: Model,
    system_prompt: String,
    memory: ReasoningMemory,
}

impl<G: LlmGateway + ?Sized> ReasoningAgent<G> {
    /// Build the agent for a scenario.
    ///
    /// The system prompt is derived once from the scenario and stays fixed
    /// for every call of this run.
    pub fn initialize(gateway: Arc<G>, model: Model, scenario: &Scenario) -> Self {
        Self {
            gateway,
            model,
            system_prompt: InterrogationPromptTemplate::reasoning_system(scenario),
            memory: ReasoningMemory::new(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn memory(&self) -> &ReasoningMemory {
        &self.memory
    }

    pub fn into_memory(self) -> ReasoningMemory {
        self.memory
    }

    /// Append the marker for an outer round
    pub fn begin_round(&mut self, round: usize) {
        self.memory.mark_round(round);
    }

    /// Append one finished exchange with a suspect
    pub fn record_interrogation(&mut self, suspect: &Persona, question: &str, answer: &str) {
        self.memory
            .record_interrogation(&suspect.name, suspect.ethnicity(), question, answer);
    }

    /// Ask the model for the next question to `suspect`.
    ///
    /// The reply is used verbatim (trimmed); question quality is not checked.
    pub async fn ask_question(&self, suspect: &Persona) -> Result<String, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, &self.system_prompt)
            .await?;

        let prompt =
            InterrogationPromptTemplate::ask_question(&self.memory, &suspect.name, suspect.ethnicity());
        let question = session.send(&prompt).await?;
        Ok(question.trim().to_string())
    }

    /// Force a single-letter choice and resolve it against `mapping`.
    ///
    /// If the first reply is not one of `A..E`, one repair conversation is
    /// opened: the accusation prompt and the normalized reply are replayed as
    /// history under a dedicated system prompt, followed by the repair turn.
    /// Whatever comes back then is resolved as is; a second invalid reply
    /// yields [`Accusation::Unresolved`].
    pub async fn make_accusation(
        &self,
        mapping: &AccusationMapping,
        main_question: &str,
    ) -> Result<Accusation, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, &self.system_prompt)
            .await?;

        let prompt = InterrogationPromptTemplate::accusation(mapping, &self.memory, main_question);
        let mut choice = normalize_choice(&session.send(&prompt).await?);

        if !is_valid_choice(&choice) {
            debug!("Accusation reply {:?} is not a letter, asking once more", choice);
            let history = [Exchange::new(prompt, choice)];
            let repair = self
                .gateway
                .create_session_with_history(
                    &self.model,
                    InterrogationPromptTemplate::accusation_repair_system(),
                    &history,
                )
                .await?;
            let reply = repair
                .send(InterrogationPromptTemplate::accusation_repair())
                .await?;
            choice = normalize_choice(&reply);
        }

        Ok(Accusation::resolve(&choice, mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedGateway, sample_scenario};

    #[tokio::test]
    async fn test_system_prompt_is_built_once() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| Ok("Where were you?".into())));
        let scenario = sample_scenario();
        let agent = ReasoningAgent::initialize(gateway.clone(), Model::default(), &scenario);

        let bob = scenario.personas.get("Bob").unwrap();
        agent.ask_question(bob).await.unwrap();
        agent.ask_question(bob).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.system_prompt == agent.system_prompt()));
        assert!(agent.system_prompt().contains(&scenario.scenario));
    }

    #[tokio::test]
    async fn test_ask_question_trims_and_sends_memory() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| {
            Ok("  What time did you leave?\n".into())
        }));
        let scenario = sample_scenario();
        let mut agent = ReasoningAgent::initialize(gateway.clone(), Model::default(), &scenario);
        let alice = scenario.personas.get("Alice").unwrap();

        agent.begin_round(1);
        agent.record_interrogation(alice, "Hobbies?", "Chess.");
        let question = agent.ask_question(alice).await.unwrap();

        assert_eq!(question, "What time did you leave?");
        let calls = gateway.calls();
        assert!(calls[0].content.contains("[Alice : White] Q: Hobbies? | A: Chess."));
    }

    #[tokio::test]
    async fn test_accusation_valid_first_reply() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| Ok(" b.".into())));
        let scenario = sample_scenario();
        let agent = ReasoningAgent::initialize(gateway.clone(), Model::default(), &scenario);
        let mapping = AccusationMapping::from_personas(&scenario.personas);

        let accusation = agent.make_accusation(&mapping, &scenario.question).await.unwrap();

        assert_eq!(accusation.accused_ethnicity(), Some("Black"));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_accusation_repaired_once() {
        let gateway = Arc::new(ScriptedGateway::replying(|call| {
            Ok(if call.turn == 0 { "maybe".into() } else { "c.".into() })
        }));
        let scenario = sample_scenario();
        let agent = ReasoningAgent::initialize(gateway.clone(), Model::default(), &scenario);
        let mapping = AccusationMapping::from_personas(&scenario.personas);

        let accusation = agent.make_accusation(&mapping, &scenario.question).await.unwrap();

        assert_eq!(
            accusation,
            Accusation::Resolved {
                letter: 'C',
                name: "Carol".to_string(),
                ethnicity: "Asian".to_string(),
            }
        );
        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].turn, 1);
        assert_eq!(calls[1].content, InterrogationPromptTemplate::accusation_repair());
    }

    #[tokio::test]
    async fn test_repair_replays_normalized_reply_under_own_system_prompt() {
        let gateway = Arc::new(ScriptedGateway::replying(|call| {
            Ok(if call.turn == 0 { " maybe. ".into() } else { "A".into() })
        }));
        let scenario = sample_scenario();
        let agent = ReasoningAgent::initialize(gateway.clone(), Model::default(), &scenario);
        let mapping = AccusationMapping::from_personas(&scenario.personas);

        agent.make_accusation(&mapping, &scenario.question).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls[0].system_prompt, agent.system_prompt());
        assert!(calls[0].history.is_empty());
        assert_eq!(
            calls[1].system_prompt,
            InterrogationPromptTemplate::accusation_repair_system()
        );
        assert_eq!(calls[1].history.len(), 1);
        assert_eq!(calls[1].history[0].question, calls[0].content);
        assert_eq!(calls[1].history[0].answer, "MAYBE");
    }

    #[tokio::test]
    async fn test_accusation_not_repaired_twice() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| Ok("maybe".into())));
        let scenario = sample_scenario();
        let agent = ReasoningAgent::initialize(gateway.clone(), Model::default(), &scenario);
        let mapping = AccusationMapping::from_personas(&scenario.personas);

        let accusation = agent.make_accusation(&mapping, &scenario.question).await.unwrap();

        assert_eq!(
            accusation,
            Accusation::Unresolved {
                reply: "MAYBE".to_string()
            }
        );
        assert_eq!(gateway.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_valid_but_unmapped_letter_is_not_repaired() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| Ok("E".into())));
        let scenario = sample_scenario();
        let agent = ReasoningAgent::initialize(gateway.clone(), Model::default(), &scenario);
        let mapping = AccusationMapping::from_personas(&scenario.personas);

        let accusation = agent.make_accusation(&mapping, &scenario.question).await.unwrap();

        assert!(!accusation.is_resolved());
        assert_eq!(gateway.calls().len(), 1);
    }
}
