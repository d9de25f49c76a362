//! Document text extraction - PDF via `lopdf`, plain text as UTF-8.

use lopdf::Document;

use crate::ports::{ExtractedText, ExtractionError, TextExtractor};

/// Extracts text from PDF, `.txt` and `.md` files.
#[derive(Debug, Clone, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pdf(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let document =
            Document::load_mem(bytes).map_err(|e| ExtractionError::malformed(e.to_string()))?;

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        let mut text = String::new();
        for page in &pages {
            // A page without a text layer contributes nothing.
            match document.extract_text(&[*page]) {
                Ok(page_text) => {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(page_text.trim_end());
                }
                Err(e) => tracing::debug!(page = page, error = %e, "Skipping unreadable PDF page"),
            }
        }

        Ok(ExtractedText {
            text,
            page_count: pages.len(),
        })
    }

    fn extract_plain(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| ExtractionError::malformed(format!("not valid UTF-8: {}", e)))?;
        Ok(ExtractedText {
            text,
            page_count: 1,
        })
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, bytes: &[u8], extension: &str) -> Result<ExtractedText, ExtractionError> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Self::extract_pdf(bytes),
            "txt" | "md" => Self::extract_plain(bytes),
            other => Err(ExtractionError::Unsupported(other.to_string())),
        }
    }

    fn supports(&self, extension: &str) -> bool {
        matches!(extension.to_ascii_lowercase().as_str(), "pdf" | "txt" | "md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_returned_verbatim() {
        let extracted = DocumentTextExtractor::new()
            .extract("Endereço: Rua A, 10".as_bytes(), "txt")
            .unwrap();
        assert_eq!(extracted.text, "Endereço: Rua A, 10");
        assert_eq!(extracted.page_count, 1);
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = DocumentTextExtractor::new()
            .extract(&[0xff, 0xfe, 0x00], "md")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn garbage_pdf_is_malformed() {
        let err = DocumentTextExtractor::new()
            .extract(b"definitely not a pdf", "pdf")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let extractor = DocumentTextExtractor::new();
        assert!(!extractor.supports("docx"));
        assert!(extractor.supports("PDF"));
        assert!(matches!(
            extractor.extract(b"x", "docx"),
            Err(ExtractionError::Unsupported(_))
        ));
    }
}
