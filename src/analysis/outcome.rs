/// Literal substrings whose presence marks a call as resolved.
const RESOLUTION_KEYWORDS: [&str; 6] = [
    "resolved",
    "fixed",
    "thank you",
    "thanks",
    "issue closed",
    "closed",
];

/// Whether the call appears to have concluded with a resolution.
///
/// Plain substring containment over the lower-cased full transcript; no
/// tokenization or negation handling, so "not fixed" still counts.
pub fn detect_resolution(full_text: &str) -> bool {
    let lower = full_text.to_lowercase();
    RESOLUTION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
