use async_trait::async_trait;

use crate::error::CapabilityError;

/// Maximum number of characters of transcript fed to the summarization
/// model; longer input is truncated before the call.
pub const MAX_SUMMARY_INPUT_CHARS: usize = 4000;

/// Interface for call summarization.
///
/// The pipeline never invokes a summarizer with empty text, so
/// implementations may assume non-empty input.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, CapabilityError>;
}

/// Truncate to at most `max_chars` characters, never splitting a
/// multi-byte character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_input() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // four characters, twelve bytes
        assert_eq!(truncate_chars("日本語話", 2), "日本");
    }
}
