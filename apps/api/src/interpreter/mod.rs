//! Response interpreter. Turns raw model text into structured values.
//!
//! Every response shape runs the same fixed cascade:
//!
//! 1. strict JSON decode (fences stripped, then the first bracketed span),
//! 2. pattern extraction (`Key: value` lines or `"quoted"` substrings),
//! 3. line heuristics (split, strip one bullet marker, drop blanks),
//! 4. `Err(DecodeError::FallbackExhausted)`.
//!
//! The shape is chosen by the prompt that produced the response, never by
//! sniffing content. Each stage returns `Result<_, DecodeError>`; nothing here
//! substitutes defaults. The flow controller picks the default on `Err` so the
//! degrade decision stays visible at the call site.

pub mod fields;
pub mod lines;
pub mod lists;
pub mod text;

use serde_json::Value;
use thiserror::Error;

pub use fields::{interpret_fields, interpret_job_analysis, FieldMap};
pub use lines::{split_lines, strip_bullet, substantive_lines};
pub use lists::interpret_string_list;
pub use text::interpret_text_blob;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    #[error("response was empty")]
    Empty,

    #[error("response is not the expected JSON: {0}")]
    NotJson(String),

    #[error("no pattern matched the response")]
    NoMatches,

    #[error("every decode strategy came up empty")]
    FallbackExhausted,
}

/// Strips a surrounding Markdown code fence, with or without an info string
/// (```` ```json ````, ```` ```markdown ````, bare ```` ``` ````).
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    let body = match rest.split_once('\n') {
        Some((info, body)) if is_info_string(info) => body,
        _ => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parses `text` as JSON; on failure retries on the span between the first
/// `open` and the last `close` delimiter, which tolerates chatty preambles.
pub(crate) fn decode_json_span(text: &str, open: char, close: char) -> Result<Value, DecodeError> {
    let text = strip_code_fences(text);
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let span = text
                .find(open)
                .zip(text.rfind(close))
                .filter(|(start, end)| start < end)
                .map(|(start, end)| &text[start..=end]);

            match span {
                Some(span) => serde_json::from_str::<Value>(span)
                    .map_err(|e| DecodeError::NotJson(e.to_string())),
                None => Err(DecodeError::NotJson(first_err.to_string())),
            }
        }
    }
}
