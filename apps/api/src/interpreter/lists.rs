//! Array-of-strings shape (skill stems, core work areas).

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::{decode_json_span, lines, DecodeError};

fn quoted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""(.*?)""#).expect("quoted pattern is valid"))
}

/// Runs the list cascade: JSON array → quoted substrings → lines.
pub fn interpret_string_list(raw: &str) -> Result<Vec<String>, DecodeError> {
    if raw.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    decode_json_list(raw)
        .or_else(|e| {
            debug!("List JSON decode failed ({e}); trying quoted substrings");
            extract_quoted(raw)
        })
        .or_else(|e| {
            debug!("Quoted extraction failed ({e}); falling back to lines");
            lines::split_lines(raw, None)
        })
        .map_err(|_| DecodeError::FallbackExhausted)
}

/// Stage 1. Accepts a top-level array, or an object wrapping the list
/// (`{"skills": [...]}`). With several array fields the alphabetically first
/// key wins, since `serde_json::Map` is ordered by key.
pub fn decode_json_list(raw: &str) -> Result<Vec<String>, DecodeError> {
    let value = decode_json_span(raw, '[', ']')?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| DecodeError::NotJson("object has no array field".to_string()))?,
        other => {
            return Err(DecodeError::NotJson(format!(
                "expected an array, got {}",
                json_kind(&other)
            )))
        }
    };

    if items.is_empty() {
        return Ok(Vec::new());
    }

    let strings: Vec<String> = items.into_iter().filter_map(scalar_to_string).collect();
    if strings.is_empty() {
        return Err(DecodeError::NotJson(
            "array holds no string-like elements".to_string(),
        ));
    }
    Ok(strings)
}

/// Stage 2. Every `"..."` substring in order; blank matches are dropped.
pub fn extract_quoted(raw: &str) -> Result<Vec<String>, DecodeError> {
    let items: Vec<String> = quoted_re()
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if items.is_empty() {
        Err(DecodeError::NoMatches)
    } else {
        Ok(items)
    }
}

/// Strings pass through untouched, numbers and booleans are rendered,
/// `null` and nested values are skipped.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_is_returned_verbatim_in_order() {
        let raw = r#"["ERP Rollout", "  Vendor Management", "SQL Reporting", "ERP Rollout"]"#;
        let expected: Vec<String> = serde_json::from_str(raw).unwrap();
        assert_eq!(interpret_string_list(raw).unwrap(), expected);
    }

    #[test]
    fn test_fenced_json_array() {
        let raw = "```json\n[\"Agile\", \"Scrum\"]\n```";
        assert_eq!(interpret_string_list(raw).unwrap(), vec!["Agile", "Scrum"]);
    }

    #[test]
    fn test_empty_json_array_is_empty_list() {
        assert_eq!(interpret_string_list("[]").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_object_wrapping_array() {
        let raw = r#"{"skills": ["Python", "SQL"]}"#;
        assert_eq!(interpret_string_list(raw).unwrap(), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_object_with_several_arrays_uses_first_key() {
        let raw = r#"{"skills": ["SQL"], "core_work": ["Finance Ops"]}"#;
        assert_eq!(decode_json_list(raw).unwrap(), vec!["Finance Ops"]);
    }

    #[test]
    fn test_non_string_elements_are_normalized() {
        let raw = r#"["SQL", 5, true, null, {"name": "x"}, ["nested"]]"#;
        assert_eq!(interpret_string_list(raw).unwrap(), vec!["SQL", "5", "true"]);
    }

    #[test]
    fn test_quoted_fallback_in_order() {
        let raw = r#"Here: "Agile", "ERP", "SQL""#;
        assert_eq!(interpret_string_list(raw).unwrap(), vec!["Agile", "ERP", "SQL"]);
    }

    #[test]
    fn test_truncated_json_uses_quoted_substrings() {
        let raw = r#"["Data Migration", "Stakeholder Alignment", "Budget Tra"#;
        assert_eq!(
            interpret_string_list(raw).unwrap(),
            vec!["Data Migration", "Stakeholder Alignment"]
        );
    }

    #[test]
    fn test_line_fallback_strips_bullets() {
        let raw = "  - ERP Rollout \n* Vendor Management\n\nSQL Reporting";
        assert_eq!(
            interpret_string_list(raw).unwrap(),
            vec!["ERP Rollout", "Vendor Management", "SQL Reporting"]
        );
    }

    #[test]
    fn test_blank_input_is_empty_error() {
        assert_eq!(interpret_string_list(""), Err(DecodeError::Empty));
        assert_eq!(interpret_string_list(" \n\t "), Err(DecodeError::Empty));
    }

    #[test]
    fn test_markers_only_exhausts_cascade() {
        assert_eq!(
            interpret_string_list("-\n*\n"),
            Err(DecodeError::FallbackExhausted)
        );
    }

    #[test]
    fn test_interpretation_is_deterministic() {
        let raw = r#"Skills: "Forecasting", "Excel""#;
        assert_eq!(interpret_string_list(raw), interpret_string_list(raw));
    }
}
