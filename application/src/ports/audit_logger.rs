//! Port for the experiment audit log.
//!
//! Defines the [`AuditLogger`] trait for recording one structured block per
//! scenario (memories, accusation, tally) for offline analysis.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! interrogation transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured audit event.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Event type identifier (e.g., "scenario_result", "scenario_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging audit events.
///
/// Shared by every concurrently running scenario, so implementations must
/// serialize writes themselves. `log` is synchronous and infallible: the
/// audit trail is never on the correctness path, write failures are
/// swallowed by the adapter.
pub trait AuditLogger: Send + Sync {
    /// Record an audit event.
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditLogger;

impl AuditLogger for NoAuditLogger {
    fn log(&self, _event: AuditEvent) {}
}
