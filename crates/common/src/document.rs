use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported upload formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Resolve the kind from a lowercase extension without the dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Extension of a filename, lowercased, or an empty string if there is none
    pub fn extension_of(filename: &str) -> String {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Display label used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(DocumentKind::from_extension("pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_extension("txt"), Some(DocumentKind::Txt));
        assert_eq!(DocumentKind::from_extension("rtf"), None);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(DocumentKind::extension_of("Report.PDF"), "pdf");
        assert_eq!(DocumentKind::extension_of("archive.tar.gz"), "gz");
        assert_eq!(DocumentKind::extension_of("README"), "");
    }
}
