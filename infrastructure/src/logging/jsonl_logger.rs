//! JSONL file writer for audit events.
//!
//! Each [`AuditEvent`] becomes one JSON line carrying its payload plus
//! `type` and `timestamp` fields. Payloads that are not objects, or that
//! already use one of those keys, are nested under `data` instead. The file
//! is opened in append mode, so several experiments can share one audit log.

use persona_bias_application::ports::audit_logger::{AuditEvent, AuditLogger};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Keys the logger adds to every record
const RESERVED_KEYS: [&str; 2] = ["type", "timestamp"];

/// Append-only JSONL audit logger.
///
/// Concurrent scenarios share one instance; the `Mutex` keeps each record on
/// its own line. Flushes after every record and on `Drop`.
pub struct JsonlAuditLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditLogger {
    /// Open (or create) the log at `path` for appending.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_record(event: AuditEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        match event.payload {
            Value::Object(mut map) if !RESERVED_KEYS.iter().any(|k| map.contains_key(*k)) => {
                map.insert(
                    "type".to_string(),
                    Value::String(event.event_type.to_string()),
                );
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

impl AuditLogger for JsonlAuditLogger {
    fn log(&self, event: AuditEvent) {
        let Ok(line) = serde_json::to_string(&Self::to_record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Failed to write audit record to {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlAuditLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::new(&path).unwrap();

        logger.log(AuditEvent::new(
            "scenario_result",
            json!({
                "group": "Black",
                "tally": {"accused_ethnicity": "Black", "biased": 1, "general": 0}
            }),
        ));
        logger.log(AuditEvent::new(
            "scenario_failed",
            json!({"index": 3, "error": "Timeout"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "scenario_result");
        assert_eq!(records[0]["tally"]["biased"], 1);
        assert!(records[0]["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(records[1]["type"], "scenario_failed");
        assert_eq!(records[1]["index"], 3);
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        for run in 0..2 {
            let logger = JsonlAuditLogger::new(&path).unwrap();
            logger.log(AuditEvent::new("scenario_result", json!({ "run": run })));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["run"], 1);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("audit.jsonl");

        let logger = JsonlAuditLogger::new(&path).unwrap();

        assert_eq!(logger.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::new(&path).unwrap();

        logger.log(AuditEvent::new("note", json!("cancelled by user")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "cancelled by user");
    }

    #[test]
    fn test_payload_with_reserved_keys_is_nested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::new(&path).unwrap();

        logger.log(AuditEvent::new(
            "scenario_result",
            json!({"type": "heist", "timestamp": "1999", "group": "Black"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "scenario_result");
        assert_ne!(records[0]["timestamp"], "1999");
        assert_eq!(records[0]["data"]["type"], "heist");
        assert_eq!(records[0]["data"]["timestamp"], "1999");
        assert_eq!(records[0]["data"]["group"], "Black");
    }

    #[test]
    fn test_concurrent_writers_keep_lines_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = std::sync::Arc::new(JsonlAuditLogger::new(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for j in 0..25 {
                        logger.log(AuditEvent::new("scenario_result", json!({ "i": i, "j": j })));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(logger);

        assert_eq!(read_lines(&path).len(), 200);
    }
}
