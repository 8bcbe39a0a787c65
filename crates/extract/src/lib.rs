//! docsum document extraction
//!
//! Turns uploaded PDF, DOCX and plain-text bytes into text

mod docx;
mod pdf;
mod text;

pub use docsum_common::DocumentKind;
pub use docx::extract_docx;
pub use pdf::extract_pdf;
pub use text::decode_utf8_dropping_invalid;

use docsum_common::{DocsumError, Result};
use tracing::{debug, info};

/// Resolve the extractor for an uploaded filename
pub fn detect_kind(filename: &str) -> Result<DocumentKind> {
    let ext = DocumentKind::extension_of(filename);
    DocumentKind::from_extension(&ext).ok_or_else(|| {
        let shown = if ext.is_empty() {
            "(no extension)".to_string()
        } else {
            format!(".{}", ext)
        };
        DocsumError::UnsupportedFileType(shown)
    })
}

/// Extract text from document bytes
///
/// Whitespace-only output is reported as `EmptyExtraction`.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String> {
    debug!("Extracting {} document ({} bytes)", kind, bytes.len());

    let text = match kind {
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Docx => extract_docx(bytes)?,
        DocumentKind::Txt => decode_utf8_dropping_invalid(bytes),
    };

    if text.trim().is_empty() {
        return Err(DocsumError::EmptyExtraction(kind));
    }

    info!("Extracted {} chars from {} document", text.chars().count(), kind);
    Ok(text)
}

/// Extract text on the blocking thread pool
///
/// PDF parsing is CPU-bound and must not stall the async runtime.
pub async fn extract_text_blocking(kind: DocumentKind, bytes: Vec<u8>) -> Result<String> {
    run_blocking(move || extract_text(kind, &bytes)).await
}

// A failed join is a runtime fault, not a bad document
async fn run_blocking<F, T>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DocsumError::internal(format!("Extraction task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind("paper.PDF").unwrap(), DocumentKind::Pdf);
        assert_eq!(detect_kind("notes.docx").unwrap(), DocumentKind::Docx);
        assert_eq!(detect_kind("plain.txt").unwrap(), DocumentKind::Txt);
    }

    #[test]
    fn test_detect_kind_rejects_unknown() {
        let err = detect_kind("letter.rtf").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .rtf");

        let err = detect_kind("Makefile").unwrap_err();
        assert!(matches!(err, DocsumError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_whitespace_text_is_empty_extraction() {
        let err = extract_text(DocumentKind::Txt, b"  \n\t ").unwrap_err();
        assert!(matches!(err, DocsumError::EmptyExtraction(DocumentKind::Txt)));
    }

    #[test]
    fn test_extract_real_pdf() {
        let text = extract_text(DocumentKind::Pdf, &pdf::tests::single_page_pdf("Hello PDF world.")).unwrap();
        assert_eq!(text.trim(), "Hello PDF world.");
    }

    #[test]
    fn test_pdf_without_text_is_empty_extraction() {
        let err = extract_text(DocumentKind::Pdf, &pdf::tests::single_page_pdf("")).unwrap_err();
        assert!(matches!(err, DocsumError::EmptyExtraction(DocumentKind::Pdf)));
        assert_eq!(err.public_message(), "Could not extract text from PDF");
    }

    #[tokio::test]
    async fn test_extract_text_blocking() {
        let text = extract_text_blocking(DocumentKind::Txt, b"async body".to_vec()).await.unwrap();
        assert_eq!(text, "async body");
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_extraction_error() {
        let err = extract_text_blocking(DocumentKind::Pdf, b"this is not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(err.public_message(), "Could not extract text from PDF");
    }

    #[tokio::test]
    async fn test_failed_task_is_internal_error() {
        let err = run_blocking::<_, String>(|| panic!("worker died")).await.unwrap_err();
        assert!(matches!(err, DocsumError::Internal(_)));
        assert!(!err.is_input_error());
        assert_eq!(err.status_code(), 500);
    }
}
