//! Test-suite loading.
//!
//! A suite is a JSON array of `{ "name": ..., "payload": {...} }` objects.
//! The payload is opaque: it is forwarded to the generate endpoint verbatim,
//! so any backend-specific generation parameters pass through untouched.

use anyhow::Context;
use serde_json::{Map, Value};
use std::path::Path;

/// Label used when a test case has no `name` field.
pub const UNNAMED_TASK: &str = "Unnamed Task";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TestCase {
    #[serde(default = "unnamed")]
    pub name: String,
    /// Request body sent verbatim; key order is preserved.
    pub payload: Map<String, Value>,
}

fn unnamed() -> String {
    UNNAMED_TASK.to_string()
}

impl TestCase {
    /// Model named by the payload, if any. Used to pick the pre-warm target.
    pub fn model(&self) -> Option<&str> {
        self.payload.get("model").and_then(Value::as_str)
    }
}

/// Load a suite from disk. A missing file and malformed JSON are both fatal
/// to the caller; there is nothing sensible to benchmark without a suite.
pub fn load(path: &Path) -> anyhow::Result<Vec<TestCase>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("{} not found", path.display()))?;
    let cases: Vec<TestCase> = serde_json::from_str(&text)
        .with_context(|| format!("invalid test suite in {}", path.display()))?;
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn suite_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_cases_in_file_order() {
        let f = suite_file(
            r#"[
                {"name": "b", "payload": {"model": "m", "prompt": "2"}},
                {"name": "a", "payload": {"model": "m", "prompt": "1"}}
            ]"#,
        );
        let cases = load(f.path()).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "b");
        assert_eq!(cases[1].name, "a");
    }

    #[test]
    fn name_defaults_when_absent() {
        let f = suite_file(r#"[{"payload": {"model": "m"}}]"#);
        let cases = load(f.path()).unwrap();
        assert_eq!(cases[0].name, UNNAMED_TASK);
    }

    #[test]
    fn payload_passes_through_unknown_fields() {
        let f = suite_file(
            r#"[{"name": "t", "payload": {"model": "m", "num_ctx": 8192, "options": {"temperature": 0}}}]"#,
        );
        let cases = load(f.path()).unwrap();
        assert_eq!(cases[0].payload.get("num_ctx"), Some(&serde_json::json!(8192)));
        assert!(cases[0].payload.get("options").is_some());
    }

    #[test]
    fn model_extracted_from_payload() {
        let f = suite_file(r#"[{"name": "t", "payload": {"model": "granite3.3:2b"}}]"#);
        let cases = load(f.path()).unwrap();
        assert_eq!(cases[0].model(), Some("granite3.3:2b"));
    }

    #[test]
    fn model_is_none_when_not_a_string() {
        let f = suite_file(r#"[{"name": "t", "payload": {"model": 7}}]"#);
        let cases = load(f.path()).unwrap();
        assert_eq!(cases[0].model(), None);
    }

    #[test]
    fn missing_payload_is_an_error() {
        let f = suite_file(r#"[{"name": "no body"}]"#);
        assert!(load(f.path()).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let f = suite_file("[{");
        assert!(load(f.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load(Path::new("/nonexistent/suite.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
