//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the completion model the agents run on
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod string;
