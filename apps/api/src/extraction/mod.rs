// Document Text Extractor: uploaded PDF bytes → linear text.
// Extraction failures are values, never panics or fatal errors; the flow
// controller decides what to show the user.

pub mod pdf;
pub mod sections;

use thiserror::Error;

pub use pdf::{extract_text, looks_like_pdf};
pub use sections::{labeled_sections, ResumeSections};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("no text could be recovered from the document")]
    Empty,

    #[error("the document could not be parsed: {0}")]
    Malformed(String),
}

/// Text recovered from a document, pages joined in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

impl ExtractedText {
    /// Joins page texts with newlines. Pages that yielded nothing contribute `""`.
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self {
            page_count: pages.len(),
            text: pages.join("\n"),
        }
    }
}

/// An upload as handed to the flow controller: its size and the extraction outcome.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub byte_len: usize,
    pub extraction: Result<ExtractedText, ExtractionError>,
}

impl UploadedDocument {
    pub fn is_empty(&self) -> bool {
        self.byte_len == 0
    }
}
