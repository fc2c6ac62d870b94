//! JSON array log files.
//!
//! Each log file holds one pretty-printed JSON array of records. Appending
//! rewrites the whole file; there is no locking and the last writer wins.

use crate::error::AuditError;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read the records stored at `path`.
///
/// A missing file is an empty log. Unreadable files and files that do not
/// hold a JSON array are errors.
pub fn load(path: &Path) -> Result<Vec<Value>, AuditError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(AuditError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(_) => Err(AuditError::Corrupt {
            path: path.to_path_buf(),
            reason: "top-level value is not an array".to_string(),
        }),
        Err(e) => Err(AuditError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Read the records stored at `path`, treating any failure as an empty log.
pub fn load_or_empty(path: &Path) -> Vec<Value> {
    load(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding unreadable audit log contents");
        Vec::new()
    })
}

/// Replace the contents of `path` with `records`, pretty-printed.
///
/// Creates the parent directory if needed.
pub fn store(path: &Path, records: &[Value]) -> Result<(), AuditError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| AuditError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|source| AuditError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_empty());
    }

    #[test]
    fn test_object_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, r#"{"tool": "Bash"}"#).unwrap();
        assert!(matches!(load(&path), Err(AuditError::Corrupt { .. })));
        assert!(load_or_empty(&path).is_empty());
    }

    #[test]
    fn test_store_pretty_prints_with_two_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.json");
        store(&path, &[json!({"tool": "Bash"})]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  {\n    \"tool\": \"Bash\"\n  }\n]");
    }
}
