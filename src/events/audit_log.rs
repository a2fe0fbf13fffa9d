//! Audit log sink
//!
//! Appends every connection event to a JSONL file.

use super::{ConnectionEvent, ConnectionEventSink, SinkError};
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Writer for audit log entries
struct AuditLogWriter {
    path: PathBuf,
}

impl AuditLogWriter {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, event: &ConnectionEvent) -> Result<(), SinkError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

pub struct AuditLogSink {
    // Serializes appends from concurrently spawned deliveries
    writer: Arc<Mutex<AuditLogWriter>>,
}

impl AuditLogSink {
    /// # Arguments
    /// * `log_path` - Path to the audit log file (JSONL format)
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(AuditLogWriter::new(log_path.into()))),
        }
    }
}

#[async_trait]
impl ConnectionEventSink for AuditLogSink {
    async fn on_event(&self, event: &ConnectionEvent) -> Result<(), SinkError> {
        let writer = self.writer.lock().await;
        writer.write(event)
    }

    fn name(&self) -> &'static str {
        "AuditLogSink"
    }
}
