use serde::{Deserialize, Serialize};

/// A time-stamped piece of recognized speech.
///
/// Segments arrive ordered by `start` ascending, exactly as the
/// transcription source produced them. They are never mutated after
/// construction; overlapping or back-to-back spans are possible and
/// handled downstream by the fusion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds (always after `start`)
    pub end: f64,
    /// Recognized text for this span
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Everything the transcription source produces for one audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    /// Timestamped segments in source order
    pub segments: Vec<TranscriptSegment>,
    /// The full transcript as a single string
    pub full_text: String,
    /// Detected language code; `None` when detection failed or the
    /// audio produced no text. Callers degrade this to `"unknown"`.
    pub language: Option<String>,
}
