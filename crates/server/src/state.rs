use docsum_common::{AppConfig, Result};
use docsum_llm::{LlmClient, OllamaClient, OllamaConfig, Summarizer, SummarizerOptions};
use std::sync::Arc;

/// Shared application state
///
/// Immutable after startup; requests share nothing mutable.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Generation service client
    pub client: Arc<dyn LlmClient>,

    /// Chunk-and-merge summarizer over `client`
    pub summarizer: Summarizer,
}

impl AppState {
    /// Create new application state backed by Ollama
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = OllamaClient::new(OllamaConfig::from_app_config(&config))?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create state around an existing client
    pub fn with_client(config: AppConfig, client: Arc<dyn LlmClient>) -> Self {
        let options = SummarizerOptions {
            max_chunk_chars: config.max_chunk_chars,
            ..Default::default()
        };
        let summarizer = Summarizer::with_options(client.clone(), options);

        Self {
            config,
            client,
            summarizer,
        }
    }
}
