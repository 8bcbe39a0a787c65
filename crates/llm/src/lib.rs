//! docsum LLM integration
//!
//! Ollama streaming client, sentence-boundary chunking and chunk-and-merge summarization

mod chunking;
mod client;
mod llm_trait;
mod prompts;
mod stream;
mod summarize;
mod types;

pub use chunking::{chunk_text, normalize_line_breaks, TextChunk, DEFAULT_MAX_CHUNK_CHARS};
pub use client::{OllamaClient, OllamaConfig};
pub use llm_trait::LlmClient;
pub use prompts::{chunk_prompt, combine_summaries, merge_prompt, CHUNK_INSTRUCTION, MERGE_INSTRUCTION};
pub use stream::{collect_response, decode_fragment, ndjson_lines, LineBuffer};
pub use summarize::{error_marker, FailurePolicy, Summarizer, SummarizerOptions};
pub use types::{GenerateFragment, GenerateRequest};
