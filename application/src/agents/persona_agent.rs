//! Persona agent
//!
//! Answers the reasoning agent's questions in character. Each persona only
//! sees its own previous exchanges.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use persona_bias_domain::{InterrogationPromptTemplate, Model, Persona, PersonaMemory};
use std::sync::Arc;

/// One interviewed persona of a scenario run
pub struct PersonaAgent<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    model: Model,
    persona: Persona,
    memory: PersonaMemory,
}

impl<G: LlmGateway + ?Sized> PersonaAgent<G> {
    /// Create the agent with an empty memory
    pub fn new(gateway: Arc<G>, model: Model, persona: Persona) -> Self {
        Self {
            gateway,
            model,
            persona,
            memory: PersonaMemory::new(),
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn memory(&self) -> &PersonaMemory {
        &self.memory
    }

    pub fn into_parts(self) -> (Persona, PersonaMemory) {
        (self.persona, self.memory)
    }

    /// Answer `question` given this persona's identity and prior exchanges
    pub async fn respond(&self, question: &str) -> Result<String, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(
                &self.model,
                InterrogationPromptTemplate::persona_system(),
            )
            .await?;

        let prompt =
            InterrogationPromptTemplate::persona_response(&self.persona, &self.memory, question);
        let answer = session.send(&prompt).await?;
        Ok(answer.trim().to_string())
    }

    /// Append the exchange to this persona's memory
    pub fn record_exchange(&mut self, question: &str, answer: &str) {
        self.memory.record_exchange(question, answer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedGateway;

    #[tokio::test]
    async fn test_respond_uses_identity_and_memory() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| Ok(" I was at work. ".into())));
        let persona = Persona::new("Bob", "Black", "Works nights at a warehouse.");
        let mut agent = PersonaAgent::new(gateway.clone(), Model::default(), persona);

        agent.record_exchange("Your job?", "Warehouse.");
        let answer = agent.respond("Where were you?").await.unwrap();

        assert_eq!(answer, "I was at work.");
        let calls = gateway.calls();
        assert_eq!(calls[0].system_prompt, InterrogationPromptTemplate::persona_system());
        assert!(calls[0].content.contains("Works nights at a warehouse."));
        assert!(calls[0].content.contains("Q: Your job?\nA: Warehouse."));
        assert!(calls[0].content.contains("Where were you?"));
    }

    #[tokio::test]
    async fn test_respond_does_not_record() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| Ok("Yes.".into())));
        let agent = PersonaAgent::new(
            gateway,
            Model::default(),
            Persona::new("Ann", "White", "Teacher."),
        );

        agent.respond("Were you there?").await.unwrap();
        assert!(agent.memory().is_empty());
    }

    #[test]
    fn test_record_exchange_appends_in_order() {
        let gateway = Arc::new(ScriptedGateway::replying(|_| Ok(String::new())));
        let mut agent = PersonaAgent::new(
            gateway,
            Model::default(),
            Persona::new("Ann", "White", "Teacher."),
        );

        agent.record_exchange("q1", "a1");
        agent.record_exchange("q2", "a2");

        let (persona, memory) = agent.into_parts();
        assert_eq!(persona.name, "Ann");
        let questions: Vec<_> = memory.exchanges().iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["q1", "q2"]);
    }
}
