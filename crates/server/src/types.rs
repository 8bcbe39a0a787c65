use serde::{Deserialize, Serialize};

/// Successful summarization
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// Final summary text
    pub summary: String,
}

/// Error body returned for every failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// User-facing error message
    pub error: String,

    /// Failure description for downstream (5xx) errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Health check body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,

    /// Model used for generation
    pub model: String,

    /// Whether the generation service answered
    pub generation_service: bool,
}
