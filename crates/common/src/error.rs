use crate::document::DocumentKind;

/// docsum error types
#[derive(Debug, thiserror::Error)]
pub enum DocsumError {
    /// LLM related error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Network/HTTP error talking to the generation service
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upload extension has no extractor
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Extractor failed to read the document
    #[error("Could not extract text from {kind}: {reason}")]
    Extraction { kind: DocumentKind, reason: String },

    /// Extractor succeeded but produced no text
    #[error("Could not extract text from {0}")]
    EmptyExtraction(DocumentKind),

    /// Upload body exceeded the configured limit
    #[error("Upload exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocsumError {
    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create extraction error
    pub fn extraction<S: Into<String>>(kind: DocumentKind, reason: S) -> Self {
        Self::Extraction {
            kind,
            reason: reason.into(),
        }
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller supplied bad input (as opposed to a downstream failure)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::UnsupportedFileType(_)
                | Self::Extraction { .. }
                | Self::EmptyExtraction(_)
                | Self::PayloadTooLarge(_)
        )
    }

    /// Message shown to API clients in the `error` field
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::Extraction { kind, .. } | Self::EmptyExtraction(kind) => {
                format!("Could not extract text from {}", kind)
            }
            Self::UnsupportedFileType(_) | Self::PayloadTooLarge(_) => self.to_string(),
            Self::Network(_) => "Failed to contact the generation service".to_string(),
            _ => "Error during summarization".to_string(),
        }
    }
}

// HTTP response conversion
impl DocsumError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::UnsupportedFileType(_) => 400,
            Self::Extraction { .. } => 400,
            Self::EmptyExtraction(_) => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::Llm(_) => 500,
            Self::Network(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 500,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_client_errors() {
        let errors = [
            DocsumError::invalid_input("No text or file provided"),
            DocsumError::UnsupportedFileType(".rtf".to_string()),
            DocsumError::EmptyExtraction(DocumentKind::Pdf),
            DocsumError::extraction(DocumentKind::Docx, "bad zip"),
        ];
        for err in errors {
            assert!(err.is_input_error());
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            DocsumError::UnsupportedFileType(".rtf".to_string()).public_message(),
            "Unsupported file type: .rtf"
        );
        assert_eq!(
            DocsumError::EmptyExtraction(DocumentKind::Pdf).public_message(),
            "Could not extract text from PDF"
        );
        assert_eq!(
            DocsumError::extraction(DocumentKind::Pdf, "xref").public_message(),
            "Could not extract text from PDF"
        );
        assert_eq!(
            DocsumError::network("connection refused").public_message(),
            "Failed to contact the generation service"
        );
        assert_eq!(
            DocsumError::llm("empty").public_message(),
            "Error during summarization"
        );
    }

    #[test]
    fn test_downstream_errors_are_server_errors() {
        assert_eq!(DocsumError::network("refused").status_code(), 500);
        assert_eq!(DocsumError::llm("boom").status_code(), 500);
        assert!(!DocsumError::network("refused").is_input_error());
        assert_eq!(DocsumError::PayloadTooLarge(10).status_code(), 413);
    }
}
