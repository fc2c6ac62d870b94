//! # warden-core
//!
//! Types shared by every Warden crate:
//! - [`InvocationRecord`]: one proposed (or completed) tool call, as delivered
//!   by the agent on stdin
//! - [`Stage`]: which interception point produced a record
//! - [`config`]: YAML configuration for the guard and the audit logs

// Configuration types shared across all Warden crates
pub mod config;
pub mod record;

pub use config::{AuditConfig, ConfigError, GuardConfig, WardenConfig};
pub use record::{InvocationRecord, RecordError, Stage, UNKNOWN_SESSION};
