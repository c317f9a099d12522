//! Labeled key:value shape (job analysis).

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::{decode_json_span, lines::strip_bullet, DecodeError};
use crate::models::job::{JobAnalysis, Seniority};

/// Found fields, keyed by the requested key exactly as the caller spelled it.
pub type FieldMap = BTreeMap<String, String>;

pub const JOB_ANALYSIS_KEYS: [&str; 3] = ["Industry", "Domain", "Seniority"];

/// Runs the field cascade: JSON object → `Key: value` lines → `Key - value` lines.
/// Succeeds when at least one requested key was found.
pub fn interpret_fields(raw: &str, keys: &[&str]) -> Result<FieldMap, DecodeError> {
    if raw.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    decode_json_fields(raw, keys)
        .or_else(|e| {
            debug!("Field JSON decode failed ({e}); trying labeled lines");
            extract_labeled_fields(raw, keys)
        })
        .or_else(|e| {
            debug!("Labeled extraction failed ({e}); trying separated lines");
            extract_separated_fields(raw, keys)
        })
        .map_err(|_| DecodeError::FallbackExhausted)
}

/// Job analysis on top of the field cascade. Fields the model left out take
/// their individual default; a response with no recognizable field is an error.
pub fn interpret_job_analysis(raw: &str) -> Result<JobAnalysis, DecodeError> {
    let fields = interpret_fields(raw, &JOB_ANALYSIS_KEYS)?;
    let defaults = JobAnalysis::default();

    Ok(JobAnalysis {
        industry: fields.get("Industry").cloned().unwrap_or(defaults.industry),
        domain: fields.get("Domain").cloned().unwrap_or(defaults.domain),
        seniority: fields
            .get("Seniority")
            .and_then(|s| Seniority::from_label(s))
            .unwrap_or(defaults.seniority),
    })
}

/// Stage 1. Keys match object members case-insensitively.
pub fn decode_json_fields(raw: &str, keys: &[&str]) -> Result<FieldMap, DecodeError> {
    let Value::Object(map) = decode_json_span(raw, '{', '}')? else {
        return Err(DecodeError::NotJson("expected an object".to_string()));
    };

    let mut fields = FieldMap::new();
    for key in keys {
        let value = map
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|v| !v.is_empty());

        if let Some(value) = value {
            fields.insert(key.to_string(), value);
        }
    }

    non_empty(fields)
}

/// Stage 2. `^<Key>:\s*(.*)` per key, anchored at line start; the label may
/// carry list or bold markers (`- **Industry:** Retail`). First non-empty match wins.
pub fn extract_labeled_fields(raw: &str, keys: &[&str]) -> Result<FieldMap, DecodeError> {
    let mut fields = FieldMap::new();

    for key in keys {
        let pattern = format!(r"(?mi)^[ \t>*\-]*{}[ \t*]*:[ \t]*(.*)$", regex::escape(key));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };

        let value = re
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| clean_value(m.as_str()))
            .find(|v| !v.is_empty());

        if let Some(value) = value {
            fields.insert(key.to_string(), value);
        }
    }

    non_empty(fields)
}

/// Stage 3. Line heuristic for answers like `Industry - Retail` or `Domain = ERP`.
pub fn extract_separated_fields(raw: &str, keys: &[&str]) -> Result<FieldMap, DecodeError> {
    let mut fields = FieldMap::new();

    for line in raw.lines().map(strip_bullet).filter(|l| !l.is_empty()) {
        for key in keys {
            if fields.contains_key(*key) {
                continue;
            }
            let starts_with_key = line
                .get(..key.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(key));
            if !starts_with_key {
                continue;
            }

            let rest = line[key.len()..].trim_start_matches(['*', ' ', '\t']);
            if let Some(value) = rest.strip_prefix(['-', '–', '=', '|']) {
                let value = clean_value(value);
                if !value.is_empty() {
                    fields.insert(key.to_string(), value);
                }
            }
        }
    }

    non_empty(fields)
}

fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_matches(['*', '"', '`'])
        .trim()
        .to_string()
}

fn non_empty(fields: FieldMap) -> Result<FieldMap, DecodeError> {
    if fields.is_empty() {
        Err(DecodeError::NoMatches)
    } else {
        Ok(fields)
    }
}
