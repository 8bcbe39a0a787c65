use docsum_common::{DocsumError, DocumentKind, Result};
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Extract text from an in-memory PDF
///
/// Pages are joined with newlines; pages without text are skipped.
pub fn extract_pdf(bytes: &[u8]) -> Result<String> {
    // pdf-extract can panic on malformed input
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| DocsumError::extraction(DocumentKind::Pdf, "PDF parser panicked"))?
    .map_err(|e| DocsumError::extraction(DocumentKind::Pdf, e.to_string()))?;

    debug!("PDF has {} pages", pages.len());
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
