pub use docsum_common::config::DEFAULT_MAX_CHUNK_CHARS;

/// Text chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// 1-based position in the chunk sequence
    pub index: usize,

    /// Number of chunks in the sequence
    pub total: usize,

    /// Chunk text, trimmed
    pub text: String,

    /// Start offset (in chars) in the normalized text, before trimming
    pub start: usize,

    /// End offset (in chars, exclusive) in the normalized text, before trimming
    pub end: usize,
}

/// Replace every line break (`\r\n`, `\n`, `\r`) with a single space
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(|c: char| c == '\n' || c == '\r', " ")
}

/// Split text into chunks of at most `max_chars` characters
///
/// Cuts after the last period in each window, else after the last
/// semicolon, else at the window end (possibly mid-word). Lengths are
/// counted in chars. Chunks that trim to nothing are dropped, except that
/// text fitting in one window always yields exactly one chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<TextChunk> {
    let max_chars = max_chars.max(1);
    let normalized = normalize_line_breaks(text);
    let chars: Vec<char> = normalized.chars().collect();
    let text_len = chars.len();

    if text_len <= max_chars {
        // Text is short enough, return as single chunk
        return vec![TextChunk {
            index: 1,
            total: 1,
            text: normalized.trim().to_string(),
            start: 0,
            end: text_len,
        }];
    }

    let mut pieces: Vec<(usize, usize, String)> = Vec::new();
    let mut start = 0;

    while start < text_len {
        let end = start + max_chars;

        if end >= text_len {
            push_piece(&mut pieces, &chars, start, text_len);
            break;
        }

        let cut = find_break_point(&chars[start..end])
            .map(|idx| start + idx + 1)
            .unwrap_or(end);

        push_piece(&mut pieces, &chars, start, cut);

        // cut > start always holds, so the loop terminates
        start = cut;
    }

    let total = pieces.len();
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, (start, end, text))| TextChunk {
            index: i + 1,
            total,
            text,
            start,
            end,
        })
        .collect()
}

fn push_piece(pieces: &mut Vec<(usize, usize, String)>, chars: &[char], start: usize, end: usize) {
    let raw: String = chars[start..end].iter().collect();
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        pieces.push((start, end, trimmed.to_string()));
    }
}

/// Index of the sentence boundary within a window, if any
fn find_break_point(window: &[char]) -> Option<usize> {
    window
        .iter()
        .rposition(|&c| c == '.')
        .or_else(|| window.iter().rposition(|&c| c == ';'))
}
