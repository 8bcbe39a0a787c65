use async_trait::async_trait;
use docsum_common::Result;

/// Common trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a prompt, returning the trimmed completion
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier used for generation
    fn model(&self) -> &str;

    /// Test connection/availability
    async fn test_connection(&self) -> Result<bool>;
}
