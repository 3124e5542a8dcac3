//! Agents taking part in a scenario run
//!
//! Both agents own their memory exclusively; nothing here is shared between
//! concurrently running scenarios except the gateway.

pub mod persona_agent;
pub mod reasoning_agent;

pub use persona_agent::PersonaAgent;
pub use reasoning_agent::ReasoningAgent;
