//! # warden-audit
//!
//! Audit logging for the Warden hook stages.
//!
//! Every invocation the agent submits is appended to a per-session log file,
//! one file per stage:
//!
//! | File | Written by |
//! |------|------------|
//! | `pre_tool_use_<session>.json` | `warden pre`, before the guard decides |
//! | `post_tool_use_<session>.json` | `warden post`, after the tool ran |
//!
//! Each file holds a JSON array of the raw records in arrival order,
//! pretty-printed with a 2-space indent. Files grow without bound.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use warden_audit::{AuditLogHandle, AuditRecorder};
//! use warden_core::{AuditConfig, InvocationRecord, Stage};
//!
//! let input = r#"{"sessionId":"abc","tool":"Bash","command":"ls"}"#;
//! let record = InvocationRecord::from_json(input)?;
//! let handle = AuditLogHandle::new(".claude/logs", record.session_id(), Stage::Pre);
//!
//! // Never fails; problems are logged through `tracing`.
//! AuditRecorder::new(&AuditConfig::default()).append(&handle, &record);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod handle;
pub mod logger;
pub mod storage;

pub use error::AuditError;
pub use handle::AuditLogHandle;
pub use logger::AuditRecorder;
