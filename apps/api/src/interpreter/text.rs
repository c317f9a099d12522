//! Free-text shape (generated projects, backstories). The blob stays opaque.

use super::{strip_code_fences, DecodeError};

/// Returns the response with any wrapping code fence removed, or `Empty`.
pub fn interpret_text_blob(raw: &str) -> Result<String, DecodeError> {
    let text = strip_code_fences(raw);
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_is_kept_verbatim() {
        let raw = "### Inventory Forecasting Revamp\n- Context: Stockouts at 14 stores\n- Outcome: 18% fewer stockouts\n";
        assert_eq!(
            interpret_text_blob(raw).unwrap(),
            raw.trim_end().to_string()
        );
    }

    #[test]
    fn test_fenced_blob_is_unwrapped() {
        let raw = "```markdown\n### Project A\n- Tools: SQL\n```";
        assert_eq!(interpret_text_blob(raw).unwrap(), "### Project A\n- Tools: SQL");
    }

    #[test]
    fn test_blank_blob_is_empty() {
        assert_eq!(interpret_text_blob("  \n "), Err(DecodeError::Empty));
        assert_eq!(interpret_text_blob("```\n```"), Err(DecodeError::Empty));
    }
}
