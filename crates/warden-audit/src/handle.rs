//! Log file handles.
//!
//! A handle names one audit log: the logs directory, the session and the
//! stage. Both hook stages receive a handle instead of resolving paths from
//! the working directory themselves.

use std::path::{Path, PathBuf};
use warden_core::{Stage, UNKNOWN_SESSION};

/// Location of one (session, stage) audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogHandle {
    directory: PathBuf,
    session_id: String,
    stage: Stage,
}

impl AuditLogHandle {
    pub fn new(directory: impl Into<PathBuf>, session_id: &str, stage: Stage) -> Self {
        Self {
            directory: directory.into(),
            session_id: sanitize_session_id(session_id),
            stage,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Session id as used in the file name.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// `pre_tool_use_<session>.json` or `post_tool_use_<session>.json`.
    pub fn file_name(&self) -> String {
        format!("{}_tool_use_{}.json", self.stage, self.session_id)
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name())
    }
}

/// Make a session id safe to embed in a file name.
///
/// Bytes outside `[A-Za-z0-9_.-]` are percent-encoded, `%` included, so ids
/// containing path separators stay inside the logs directory and distinct
/// ids never share a file.
fn sanitize_session_id(session_id: &str) -> String {
    if session_id.is_empty() {
        return UNKNOWN_SESSION.to_string();
    }
    let mut encoded = String::with_capacity(session_id.len());
    for byte in session_id.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}
