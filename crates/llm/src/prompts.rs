//! Prompt templates for summarization

/// Instruction prepended to every per-chunk prompt
pub const CHUNK_INSTRUCTION: &str =
    "Summarize the following text concisely (one paragraph) keeping key points and facts.";

/// Instruction prepended to the merge prompt
pub const MERGE_INSTRUCTION: &str = "You are an expert summarizer. Given the following chunk summaries, \
produce a single concise and coherent summary in 3-6 sentences containing the most important points.";

/// Prompt for chunk summarization
///
/// `index` is 1-based.
pub fn chunk_prompt(index: usize, total: usize, chunk: &str) -> String {
    format!(
        "{} Chunk {} of {}:\n\n{}\n\nSummary:",
        CHUNK_INSTRUCTION, index, total, chunk
    )
}

/// Label chunk summaries by their 1-based position, one per line
pub fn combine_summaries(summaries: &[String]) -> String {
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| format!("Chunk {}: {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for the merge phase (combining chunk summaries)
pub fn merge_prompt(summaries: &[String]) -> String {
    format!(
        "{}\n\n{}\n\nFinal summary:",
        MERGE_INSTRUCTION,
        combine_summaries(summaries)
    )
}
