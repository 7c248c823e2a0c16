//! Line-aligned chunking

use super::token::TokenEstimator;

/// Split `text` into chunks of whole lines whose estimates stay within
/// `max_tokens`. A single line larger than the ceiling becomes its own chunk.
pub fn split_into_chunks(
    text: &str,
    max_tokens: usize,
    estimator: &dyn TokenEstimator,
) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_tokens = 0;

    for line in text.split('\n') {
        let line_tokens = estimator.estimate(line);
        if !current.is_empty() && current_tokens + line_tokens > max_tokens {
            chunks.push(current.join("\n"));
            current.clear();
            current_tokens = 0;
        }
        current.push(line);
        current_tokens += line_tokens;
    }

    if !current.is_empty() {
        let last = current.join("\n");
        if !last.trim().is_empty() || chunks.is_empty() {
            chunks.push(last);
        }
    }

    chunks
}
