//! Prompt domain
//!
//! Templates for the reasoning agent and persona prompts.

mod template;

pub use template::InterrogationPromptTemplate;
