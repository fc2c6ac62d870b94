//! Invocation records.
//!
//! A record is kept exactly as the agent sent it: the audit log must hold the
//! raw payload, so the record wraps the JSON object instead of mapping it onto
//! a fixed struct. Accessors pull out the handful of fields the guard needs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Session id used when the payload does not carry one.
pub const UNKNOWN_SESSION: &str = "unknown";

/// Keys under which some agents nest the tool parameters instead of sending
/// them at the top level.
const NESTED_PARAMETER_KEYS: &[&str] = &["parameters", "tool_input"];

/// Errors produced while decoding an invocation record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The payload was not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload was valid JSON but not an object.
    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Interception point that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Before the tool runs; the guard evaluates these.
    Pre,
    /// After the tool ran; logged only.
    Post,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pre => "pre",
            Stage::Post => "post",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pre" => Ok(Stage::Pre),
            "post" => Ok(Stage::Post),
            other => Err(format!("unknown stage '{other}' (expected 'pre' or 'post')")),
        }
    }
}

/// One tool invocation as submitted for interception.
///
/// Serializes back to the exact object it was decoded from, including fields
/// Warden does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationRecord {
    raw: Map<String, Value>,
}

impl InvocationRecord {
    /// Decode a record from the raw stdin payload.
    pub fn from_json(input: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Wrap an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(raw) => Ok(Self { raw }),
            Value::Null => Err(RecordError::NotAnObject("null")),
            Value::Bool(_) => Err(RecordError::NotAnObject("a boolean")),
            Value::Number(_) => Err(RecordError::NotAnObject("a number")),
            Value::String(_) => Err(RecordError::NotAnObject("a string")),
            Value::Array(_) => Err(RecordError::NotAnObject("an array")),
        }
    }

    /// Build a record for a tool call from its parts.
    ///
    /// Used by `warden check`, which evaluates a synthetic invocation.
    pub fn new(
        session_id: impl Into<String>,
        tool: impl Into<String>,
        parameters: Map<String, Value>,
    ) -> Self {
        let mut raw = Map::new();
        raw.insert("sessionId".to_string(), Value::String(session_id.into()));
        raw.insert("tool".to_string(), Value::String(tool.into()));
        raw.extend(parameters);
        Self { raw }
    }

    /// Session the record belongs to, `"unknown"` when absent.
    pub fn session_id(&self) -> &str {
        self.raw
            .get("sessionId")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_SESSION)
    }

    /// Name of the invoked tool, empty when absent.
    pub fn tool(&self) -> &str {
        self.raw.get("tool").and_then(Value::as_str).unwrap_or("")
    }

    /// Look up a tool parameter.
    ///
    /// Top-level keys win; otherwise the nested parameter objects are
    /// searched in order.
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.raw.get(key) {
            return Some(value);
        }
        NESTED_PARAMETER_KEYS
            .iter()
            .filter_map(|nested| self.raw.get(*nested).and_then(Value::as_object))
            .find_map(|params| params.get(key))
    }

    /// String-valued parameter, `None` if no location holds a string.
    ///
    /// Locations are tried in the same order as [`Self::parameter`], skipping
    /// any whose value is not a string.
    pub fn str_parameter(&self, key: &str) -> Option<&str> {
        std::iter::once(&self.raw)
            .chain(
                NESTED_PARAMETER_KEYS
                    .iter()
                    .filter_map(|nested| self.raw.get(*nested).and_then(Value::as_object)),
            )
            .find_map(|params| params.get(key).and_then(Value::as_str))
    }

    /// Shell command text for shell tools, empty when absent.
    pub fn command(&self) -> &str {
        self.str_parameter("command").unwrap_or("")
    }

    /// Target path for file tools, empty when absent.
    pub fn file_path(&self) -> &str {
        self.str_parameter("file_path")
            .or_else(|| self.str_parameter("filePath"))
            .unwrap_or("")
    }

    /// The record as a JSON value, for the audit log.
    pub fn to_value(&self) -> Value {
        Value::Object(self.raw.clone())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults_when_fields_missing() {
        let record = InvocationRecord::from_json("{}").unwrap();
        assert_eq!(record.session_id(), "unknown");
        assert_eq!(record.tool(), "");
        assert_eq!(record.command(), "");
        assert_eq!(record.file_path(), "");
    }

    #[test]
    fn test_non_string_session_falls_back() {
        let record = InvocationRecord::from_value(json!({"sessionId": 42})).unwrap();
        assert_eq!(record.session_id(), "unknown");
    }

    #[test]
    fn test_top_level_parameters() {
        let record = InvocationRecord::from_value(json!({
            "sessionId": "s1",
            "tool": "Bash",
            "command": "ls -la"
        }))
        .unwrap();
        assert_eq!(record.session_id(), "s1");
        assert_eq!(record.tool(), "Bash");
        assert_eq!(record.command(), "ls -la");
    }

    #[test]
    fn test_nested_parameters() {
        let record = InvocationRecord::from_value(json!({
            "tool": "Edit",
            "tool_input": {"file_path": "src/main.rs"}
        }))
        .unwrap();
        assert_eq!(record.file_path(), "src/main.rs");

        let record = InvocationRecord::from_value(json!({
            "tool": "Edit",
            "parameters": {"filePath": "README.md"}
        }))
        .unwrap();
        assert_eq!(record.file_path(), "README.md");
    }

    #[test]
    fn test_top_level_wins_over_nested() {
        let record = InvocationRecord::from_value(json!({
            "command": "echo top",
            "parameters": {"command": "echo nested"}
        }))
        .unwrap();
        assert_eq!(record.command(), "echo top");
    }

    #[test]
    fn test_non_string_top_level_falls_through_to_nested() {
        let record = InvocationRecord::from_value(json!({
            "command": null,
            "file_path": 7,
            "tool_input": {"command": "rm -rf /", "file_path": ".env"}
        }))
        .unwrap();
        assert_eq!(record.command(), "rm -rf /");
        assert_eq!(record.file_path(), ".env");
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(matches!(
            InvocationRecord::from_json("not json"),
            Err(RecordError::Json(_))
        ));
        assert!(matches!(
            InvocationRecord::from_json("[1, 2]"),
            Err(RecordError::NotAnObject("an array"))
        ));
        assert!(matches!(
            InvocationRecord::from_json("null"),
            Err(RecordError::NotAnObject("null"))
        ));
    }

    #[test]
    fn test_serializes_raw_payload_in_order() {
        let input = r#"{"tool":"Bash","zeta":1,"command":"ls","alpha":{"x":true}}"#;
        let record = InvocationRecord::from_json(input).unwrap();
        assert_eq!(serde_json::to_string(&record).unwrap(), input);
    }

    #[test]
    fn test_new_builds_flat_record() {
        let mut params = Map::new();
        params.insert("command".to_string(), json!("cat .env"));
        let record = InvocationRecord::new("check", "Bash", params);
        assert_eq!(
            record.to_value(),
            json!({"sessionId": "check", "tool": "Bash", "command": "cat .env"})
        );
    }

    #[test]
    fn test_stage_parse_and_display() {
        assert_eq!("pre".parse::<Stage>().unwrap(), Stage::Pre);
        assert_eq!("POST".parse::<Stage>().unwrap(), Stage::Post);
        assert!("during".parse::<Stage>().is_err());
        assert_eq!(Stage::Post.to_string(), "post");
    }
}
