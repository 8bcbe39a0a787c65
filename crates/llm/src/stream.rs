//! NDJSON stream decoding for the generate endpoint
//!
//! The service streams one JSON object per line. Byte chunks from the
//! transport do not respect line boundaries, so lines are reassembled
//! before decoding and folded into a single response string.

use bytes::Bytes;
use docsum_common::{DocsumError, Result};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::collections::VecDeque;
use tracing::warn;

use crate::types::GenerateFragment;

/// Reassembles complete lines from arbitrarily split byte chunks
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append a chunk and return every line it completed (without terminators)
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    /// Take a trailing line that was never newline-terminated
    pub fn take_remaining(&mut self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }
}

/// Turn a byte stream into a lazy stream of lines
///
/// A transport error is yielded once and ends the stream.
pub fn ndjson_lines<S, E>(byte_stream: S) -> impl Stream<Item = std::result::Result<Vec<u8>, E>>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
{
    let state = (byte_stream, LineBuffer::default(), VecDeque::new(), false);

    stream::unfold(state, |(mut inner, mut buffer, mut ready, mut exhausted)| async move {
        loop {
            if let Some(line) = ready.pop_front() {
                return Some((Ok(line), (inner, buffer, ready, exhausted)));
            }
            if exhausted {
                return None;
            }
            match inner.next().await {
                Some(Ok(chunk)) => ready.extend(buffer.push(&chunk)),
                Some(Err(e)) => {
                    exhausted = true;
                    return Some((Err(e), (inner, buffer, ready, exhausted)));
                }
                None => {
                    exhausted = true;
                    ready.extend(buffer.take_remaining());
                }
            }
        }
    })
}

/// Decode one line into its text piece, if it carries one
///
/// Blank lines, invalid UTF-8 and invalid JSON yield `Ok(None)`; the latter two are logged.
/// An `error` record reported in-band by the service fails the response.
pub fn decode_fragment(line: &[u8]) -> Result<Option<String>> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text.trim(),
        Err(e) => {
            warn!("Skipping fragment with invalid UTF-8: {}", e);
            return Ok(None);
        }
    };

    if text.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<GenerateFragment>(text) {
        Ok(GenerateFragment { error: Some(error), .. }) => {
            warn!("Generation service reported an error in stream: {}", error);
            Err(DocsumError::llm(error))
        }
        Ok(fragment) => Ok(fragment.response),
        Err(e) => {
            warn!("Skipping undecodable fragment: {}", e);
            Ok(None)
        }
    }
}

/// Fold a streamed generate response into the concatenated text
///
/// The result is not trimmed; callers decide how to post-process it.
pub async fn collect_response<S>(byte_stream: S) -> Result<String>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    ndjson_lines(byte_stream)
        .try_fold(String::new(), |mut acc, line| {
            let folded = decode_fragment(&line).map(|piece| {
                if let Some(piece) = piece {
                    acc.push_str(&piece);
                }
                acc
            });
            futures::future::ready(folded)
        })
        .await
}
