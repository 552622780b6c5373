//! Transcript fusion: mapping transcription segments onto diarization
//! intervals to build one transcript per speaker.

use crate::models::{SpeakerInterval, SpeakerTrack, TranscriptSegment};

/// Per-speaker fusion result with an explicit empty flag.
///
/// A speaker whose intervals overlap no transcript text is a normal
/// outcome, not an error; `found` distinguishes it from a speaker whose
/// fused text happens to be empty for other reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedTranscript {
    pub text: String,
    pub found: bool,
}

impl FusedTranscript {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            found: false,
        }
    }
}

/// Strict overlap between a transcript segment and a speaker interval.
///
/// Half-open semantics: spans that merely touch at an endpoint do not
/// overlap, so `[0,5)` and `[5,10)` are disjoint.
pub fn overlaps(segment: &TranscriptSegment, interval: &SpeakerInterval) -> bool {
    segment.start < interval.end && segment.end > interval.start
}

/// Build one speaker's transcript from the full segment list.
///
/// Every segment overlapping any of the speaker's intervals is
/// collected once (a segment spanning two intervals of the same speaker
/// is not repeated), ordered by its position in the transcript, joined
/// with single spaces, and trimmed. O(segments x intervals), which is
/// fine at call-length scale.
pub fn fuse_track(segments: &[TranscriptSegment], track: &SpeakerTrack) -> FusedTranscript {
    let mut picked: Vec<usize> = Vec::new();

    for interval in &track.intervals {
        for (index, segment) in segments.iter().enumerate() {
            if overlaps(segment, interval) && !picked.contains(&index) {
                picked.push(index);
            }
        }
    }

    if picked.is_empty() {
        return FusedTranscript::empty();
    }

    // Interval order is the source's, not necessarily chronological;
    // the fused text must follow transcript order.
    picked.sort_unstable();

    let text = picked
        .iter()
        .map(|&index| segments[index].text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    FusedTranscript {
        found: !text.is_empty(),
        text,
    }
}
