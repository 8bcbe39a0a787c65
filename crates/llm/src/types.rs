use serde::{Deserialize, Serialize};

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g., "qwen2.5", "llama3.2")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Request a streamed (NDJSON) response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl GenerateRequest {
    /// Streaming request for `prompt`
    pub fn streaming(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: Some(true),
        }
    }
}

/// One line of a streamed Ollama generate response
///
/// Every field is optional: the service mixes text fragments, the final
/// `done` record and `error` records in the same stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateFragment {
    /// Model name
    #[serde(default)]
    pub model: Option<String>,

    /// Incremental piece of generated text
    #[serde(default)]
    pub response: Option<String>,

    /// Whether generation is complete
    #[serde(default)]
    pub done: bool,

    /// Error reported in-band by the service
    #[serde(default)]
    pub error: Option<String>,
}
