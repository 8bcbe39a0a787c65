use docsum_common::{DocsumError, DocumentKind, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Main document part inside the OOXML package
const DOCUMENT_PART: &str = "word/document.xml";

fn docx_error(reason: impl Into<String>) -> DocsumError {
    DocsumError::extraction(DocumentKind::Docx, reason)
}

/// Extract text from an in-memory DOCX archive
pub fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| docx_error(format!("not a DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| docx_error(format!("missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| docx_error(format!("failed to read {}: {}", DOCUMENT_PART, e)))?;

    document_xml_to_text(&xml)
}

/// Flatten WordprocessingML body text
///
/// Paragraphs end with `\n`; tabs and breaks inside runs map to `\t` and `\n`.
fn document_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" if in_run => out.push('\t'),
                b"w:br" | b"w:cr" if in_run => out.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| docx_error(format!("invalid text in {}: {}", DOCUMENT_PART, e)))?;
                out.push_str(&text);
            }
            Ok(Event::CData(c)) if in_text => out.push_str(&String::from_utf8_lossy(&c)),
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(docx_error(format!("malformed {}: {}", DOCUMENT_PART, e))),
            _ => {}
        }
    }

    Ok(out)
}
