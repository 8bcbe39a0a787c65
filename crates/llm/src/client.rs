use async_trait::async_trait;
use docsum_common::{AppConfig, DocsumError, Result};
use futures::TryStreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::stream::collect_response;
use crate::types::GenerateRequest;

/// Connection settings for the Ollama generate endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Base URL, e.g. `http://localhost:11434`
    pub base_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Per-request timeout enforced by the HTTP client
    pub timeout: Duration,
}

impl OllamaConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Derive client settings from the application configuration
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.ollama_base_url.clone(), config.llm_model.clone())
            .with_timeout(Duration::from_secs(config.llm_timeout_secs))
    }
}

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!(
            "Ollama client initialized: {} (model: {}, timeout: {:?})",
            config.base_url, config.model, config.timeout
        );
        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Generate text with streaming, returning the trimmed concatenation
    pub async fn generate_stream(&self, request: GenerateRequest) -> Result<String> {
        let url = self.endpoint("/api/generate");

        let mut request = request;
        request.stream = Some(true);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocsumError::network(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Ollama error body: {}", body);
            return Err(DocsumError::network(format!(
                "Ollama API error: {} returned {}",
                url, status
            )));
        }

        let byte_stream = response
            .bytes_stream()
            .map_err(|e| DocsumError::network(format!("Failed to read response stream: {}", e)));

        let output = collect_response(byte_stream).await?;

        debug!("Received response from Ollama - Length: {}", output.len());

        Ok(output.trim().to_string())
    }

    /// Test connection to Ollama
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.endpoint("/api/tags");

        let response = self.client.get(&url).send().await
            .map_err(|e| DocsumError::network(format!("Failed to connect to Ollama: {}", e)))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::streaming(self.config.model.clone(), prompt);
        self.generate_stream(request).await
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn test_connection(&self) -> Result<bool> {
        OllamaClient::test_connection(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig::default();
        let config = OllamaConfig::from_app_config(&app);
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "qwen2.5");
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OllamaClient::new(OllamaConfig::new("http://localhost:11434/", "qwen2.5")).unwrap();
        assert_eq!(client.endpoint("/api/generate"), "http://localhost:11434/api/generate");
    }
}
