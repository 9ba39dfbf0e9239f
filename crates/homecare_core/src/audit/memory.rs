//! In-process audit sink.

use super::{AuditEntry, AuditError, AuditSink};
use std::sync::Mutex;

/// Keeps audit entries in memory, in append order.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded entries.
    pub fn entries(&self) -> Vec<AuditEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().len(), |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AuditError::Unavailable("memory sink lock poisoned".to_string()))?;
        entries.push(entry.clone());
        Ok(())
    }
}
