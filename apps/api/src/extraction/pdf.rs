//! PDF text extraction backed by `pdf-extract`.
//!
//! `pdf-extract` returns the whole document as one string with form feeds
//! between pages; pages are split on that separator and trimmed. No layout,
//! column order or heading detection is attempted.

use bytes::Bytes;
use tracing::{debug, warn};

use super::{ExtractedText, ExtractionError};

const PAGE_SEPARATOR: char = '\x0C';

/// True when the payload starts with the `%PDF` magic bytes.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    data.len() > 4 && &data[0..4] == b"%PDF"
}

/// Extracts linear text from PDF bytes.
///
/// The parse is CPU-bound and `pdf-extract` can panic on malformed input, so it
/// runs inside `spawn_blocking`; a panic surfaces as `ExtractionError::Malformed`.
pub async fn extract_text(data: Bytes) -> Result<ExtractedText, ExtractionError> {
    let byte_len = data.len();
    let result = tokio::task::spawn_blocking(move || extract_text_sync(&data))
        .await
        .map_err(|e| {
            warn!("PDF extraction task failed: {e}");
            ExtractionError::Malformed(format!("PDF parser aborted: {e}"))
        })?;

    match &result {
        Ok(extracted) => debug!(
            "Extracted {} chars from {} page(s) ({} bytes)",
            extracted.text.len(),
            extracted.page_count,
            byte_len
        ),
        Err(e) => warn!("PDF extraction yielded no text ({byte_len} bytes): {e}"),
    }

    result
}

fn extract_text_sync(data: &[u8]) -> Result<ExtractedText, ExtractionError> {
    if !looks_like_pdf(data) {
        return Err(ExtractionError::Malformed(
            "missing %PDF header".to_string(),
        ));
    }

    let raw = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

    let extracted = ExtractedText::from_pages(split_pages(&raw));
    if extracted.text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(extracted)
}

/// Splits raw extractor output into trimmed page texts.
fn split_pages(raw: &str) -> Vec<String> {
    raw.split(PAGE_SEPARATOR)
        .map(|page| page.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_pdf() {
        assert!(looks_like_pdf(b"%PDF-1.7\n..."));
        assert!(!looks_like_pdf(b"PK\x03\x04 docx"));
        assert!(!looks_like_pdf(b"%PD"));
    }

    #[test]
    fn test_split_pages_trims_and_keeps_blank_pages() {
        let pages = split_pages("  Jane Doe\nSkills: SQL \x0C\n\n\x0CExperience: ERP rollout\n");
        assert_eq!(
            pages,
            vec![
                "Jane Doe\nSkills: SQL".to_string(),
                String::new(),
                "Experience: ERP rollout".to_string(),
            ]
        );
    }

    #[test]
    fn test_from_pages_joins_with_newlines() {
        let extracted = ExtractedText::from_pages(vec!["a".into(), String::new(), "b".into()]);
        assert_eq!(extracted.text, "a\n\nb");
        assert_eq!(extracted.page_count, 3);
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_are_malformed() {
        let result = extract_text(Bytes::from_static(b"plain text resume")).await;
        assert!(matches!(result, Err(ExtractionError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_garbage_after_header_does_not_panic() {
        let result = extract_text(Bytes::from_static(b"%PDF-1.4\nthis is not a pdf body")).await;
        assert!(result.is_err());
    }
}
