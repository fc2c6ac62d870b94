//! Audit recorder implementation.
//!
//! Provides the `AuditRecorder`, shared by the pre and post hook stages.
//! Recording is best-effort: [`AuditRecorder::append`] never reports failure,
//! so a broken log can never change whether a tool runs.

use warden_core::{AuditConfig, InvocationRecord};

use crate::error::AuditError;
use crate::handle::AuditLogHandle;
use crate::storage;

/// Appends invocation records to per-session log files.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    enabled: bool,
}

impl AuditRecorder {
    /// Create a recorder with the given configuration.
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            enabled: config.enabled,
        }
    }

    /// Create a disabled (no-op) recorder.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if recording is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append a record to the log, swallowing any failure.
    pub fn append(&self, handle: &AuditLogHandle, record: &InvocationRecord) {
        if let Err(e) = self.try_append(handle, record) {
            tracing::warn!(
                error = %e,
                session = %handle.session_id(),
                stage = %handle.stage(),
                "Failed to record invocation"
            );
        }
    }

    /// Append a record to the log.
    ///
    /// Existing contents that cannot be read or parsed are replaced. Returns
    /// the number of records in the log afterwards (0 when disabled).
    pub fn try_append(
        &self,
        handle: &AuditLogHandle,
        record: &InvocationRecord,
    ) -> Result<usize, AuditError> {
        if !self.enabled {
            return Ok(0);
        }

        let path = handle.path();
        let mut records = storage::load_or_empty(&path);
        records.push(record.to_value());
        storage::store(&path, &records)?;

        tracing::debug!(
            path = %path.display(),
            records = records.len(),
            "Invocation recorded"
        );
        Ok(records.len())
    }

    /// Read back every record in a log, in arrival order.
    pub fn read(&self, handle: &AuditLogHandle) -> Result<Vec<serde_json::Value>, AuditError> {
        storage::load(&handle.path())
    }
}
