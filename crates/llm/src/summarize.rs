use docsum_common::{DocsumError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::chunking::{chunk_text, DEFAULT_MAX_CHUNK_CHARS};
use crate::llm_trait::LlmClient;
use crate::prompts::{chunk_prompt, combine_summaries, merge_prompt};

/// What to do when a completion call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Replace the output with an inline `[ERROR: ...]` marker and keep going
    Contain,
    /// Return the error to the caller
    Propagate,
}

/// Summarizer tuning
#[derive(Debug, Clone)]
pub struct SummarizerOptions {
    /// Maximum chunk length in characters
    pub max_chunk_chars: usize,

    /// Policy for per-chunk completion failures
    pub chunk_failure: FailurePolicy,

    /// Policy for the merge completion failure
    pub merge_failure: FailurePolicy,
}

impl Default for SummarizerOptions {
    // Chunk failures are contained while merge failures propagate.
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            chunk_failure: FailurePolicy::Contain,
            merge_failure: FailurePolicy::Propagate,
        }
    }
}

/// Inline marker substituted for a failed completion
pub fn error_marker(error: &DocsumError) -> String {
    format!("[ERROR: {}]", error)
}

/// Summarizer for long text using chunk-and-merge
pub struct Summarizer {
    client: Arc<dyn LlmClient>,
    options: SummarizerOptions,
}

impl Summarizer {
    /// Create new summarizer with default options
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self::with_options(client, SummarizerOptions::default())
    }

    pub fn with_options(client: Arc<dyn LlmClient>, options: SummarizerOptions) -> Self {
        Self { client, options }
    }

    /// Summarize text of any length
    ///
    /// One completion per chunk, plus one merge completion when there is
    /// more than one chunk. Calls are strictly sequential.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(DocsumError::invalid_input("Cannot summarize empty text"));
        }

        info!(
            "Starting summarization - Text length: {} chars, model: {}",
            text.chars().count(),
            self.client.model()
        );

        let chunks = chunk_text(text, self.options.max_chunk_chars);
        info!("Split text into {} chunks", chunks.len());

        let mut chunk_summaries = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            debug!("Summarizing chunk {}/{}", chunk.index, chunk.total);
            let prompt = chunk_prompt(chunk.index, chunk.total, &chunk.text);
            let summary = match self.client.generate(&prompt).await {
                Ok(summary) => summary,
                Err(e) => match self.options.chunk_failure {
                    FailurePolicy::Contain => {
                        warn!("Chunk {}/{} failed: {}", chunk.index, chunk.total, e);
                        error_marker(&e)
                    }
                    FailurePolicy::Propagate => return Err(e),
                },
            };
            chunk_summaries.push(summary.trim().to_string());
        }

        // Single chunk: its summary is the final summary
        if chunk_summaries.len() == 1 {
            return Ok(chunk_summaries.remove(0));
        }

        info!("Merging {} chunk summaries", chunk_summaries.len());
        let prompt = merge_prompt(&chunk_summaries);
        match self.client.generate(&prompt).await {
            Ok(final_summary) => Ok(final_summary.trim().to_string()),
            Err(e) => match self.options.merge_failure {
                FailurePolicy::Propagate => Err(e),
                FailurePolicy::Contain => {
                    warn!("Merge failed, returning chunk summaries: {}", e);
                    Ok(format!(
                        "{}\n\n{}",
                        combine_summaries(&chunk_summaries),
                        error_marker(&e)
                    ))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and replies from a script; `None` entries fail
    struct ScriptedClient {
        replies: Mutex<Vec<Option<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Option<&str>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().rev().map(|r| r.map(String::from)).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.replies.lock().unwrap().pop() {
                Some(Some(reply)) => Ok(reply),
                Some(None) => Err(DocsumError::network("connection refused")),
                None => Err(DocsumError::llm("script exhausted")),
            }
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        async fn test_connection(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn three_chunk_text() -> String {
        // A 30-char window holds one sentence but never two.
        "Alpha alpha alpha alpha. Bravo bravo bravo bravo. Charl charl charl charl."
            .to_string()
    }

    fn options(max_chunk_chars: usize) -> SummarizerOptions {
        SummarizerOptions {
            max_chunk_chars,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_single_chunk_skips_merge() {
        let client = ScriptedClient::new(vec![Some("  A short summary.  ")]);
        let summarizer = Summarizer::new(client.clone());

        let summary = summarizer.summarize("A short document.").await.unwrap();

        assert_eq!(summary, "A short summary.");
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Chunk 1 of 1:\n\nA short document."));
        assert!(!prompts[0].contains("Final summary:"));
    }

    #[tokio::test]
    async fn test_multi_chunk_issues_n_plus_one_calls() {
        let client = ScriptedClient::new(vec![Some("s1"), Some("s2"), Some("s3"), Some(" merged ")]);
        let summarizer = Summarizer::with_options(client.clone(), options(30));

        let summary = summarizer.summarize(&three_chunk_text()).await.unwrap();

        assert_eq!(summary, "merged");
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].contains("Chunk 1 of 3:\n\nAlpha alpha alpha alpha."));
        assert!(prompts[1].contains("Chunk 2 of 3:\n\nBravo bravo bravo bravo."));
        assert!(prompts[2].contains("Chunk 3 of 3:\n\nCharl charl charl charl."));
        assert!(prompts[3].contains("Chunk 1: s1\nChunk 2: s2\nChunk 3: s3"));
        assert!(prompts[3].ends_with("Final summary:"));
    }

    #[tokio::test]
    async fn test_failed_chunk_is_embedded_in_merge_prompt() {
        let client = ScriptedClient::new(vec![Some("s1"), None, Some("s3"), Some("merged")]);
        let summarizer = Summarizer::with_options(client.clone(), options(30));

        let summary = summarizer.summarize(&three_chunk_text()).await.unwrap();

        assert_eq!(summary, "merged");
        let merge = &client.prompts()[3];
        assert!(merge.contains("Chunk 1: s1\n"));
        assert!(merge.contains("Chunk 2: [ERROR: Network error: connection refused]\n"));
        assert!(merge.contains("Chunk 3: s3"));
    }

    #[tokio::test]
    async fn test_single_failed_chunk_returns_marker() {
        let client = ScriptedClient::new(vec![None]);
        let summarizer = Summarizer::new(client.clone());

        let summary = summarizer.summarize("Short text.").await.unwrap();

        assert_eq!(summary, "[ERROR: Network error: connection refused]");
        assert_eq!(client.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_failure_propagates_by_default() {
        let client = ScriptedClient::new(vec![Some("s1"), Some("s2"), Some("s3"), None]);
        let summarizer = Summarizer::with_options(client.clone(), options(30));

        let err = summarizer.summarize(&three_chunk_text()).await.unwrap_err();

        assert!(matches!(err, DocsumError::Network(_)));
        assert_eq!(client.prompts().len(), 4);
    }

    #[tokio::test]
    async fn test_merge_failure_can_be_contained() {
        let client = ScriptedClient::new(vec![Some("s1"), Some("s2"), Some("s3"), None]);
        let summarizer = Summarizer::with_options(
            client,
            SummarizerOptions {
                merge_failure: FailurePolicy::Contain,
                ..options(30)
            },
        );

        let summary = summarizer.summarize(&three_chunk_text()).await.unwrap();

        assert_eq!(
            summary,
            "Chunk 1: s1\nChunk 2: s2\nChunk 3: s3\n\n[ERROR: Network error: connection refused]"
        );
    }

    #[tokio::test]
    async fn test_chunk_failure_can_propagate() {
        let client = ScriptedClient::new(vec![Some("s1"), None, Some("s3"), Some("merged")]);
        let summarizer = Summarizer::with_options(
            client.clone(),
            SummarizerOptions {
                chunk_failure: FailurePolicy::Propagate,
                ..options(30)
            },
        );

        assert!(summarizer.summarize(&three_chunk_text()).await.is_err());
        assert_eq!(client.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_calls() {
        let client = ScriptedClient::new(vec![]);
        let summarizer = Summarizer::new(client.clone());

        let err = summarizer.summarize(" \n\t ").await.unwrap_err();

        assert!(err.is_input_error());
        assert!(client.prompts().is_empty());
    }
}
