//! Ports implemented outside this crate
//!
//! The completion service and the audit log are adapters in the
//! infrastructure crate; progress display lives in presentation.

pub mod audit_logger;
pub mod llm_gateway;
pub mod progress;
