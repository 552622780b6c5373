use serde::{Deserialize, Serialize};

/// A time interval during which one speaker is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeakerInterval {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
}

impl SpeakerInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// All intervals attributed to a single speaker label.
///
/// Interval order is the order the diarization source emitted them,
/// which is not guaranteed to be chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerTrack {
    /// Opaque label from the diarization source, e.g. `"speaker_0"`
    pub speaker: String,
    pub intervals: Vec<SpeakerInterval>,
}

/// Ordered diarization output for one audio file.
///
/// Track order is the order in which the source first attributed an
/// interval to each speaker. Role mapping depends on this order, so it
/// is an explicit sequence rather than a keyed map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerTimeline {
    tracks: Vec<SpeakerTrack>,
}

impl SpeakerTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute an interval to a speaker, creating the speaker's track
    /// on first sight. Preserves discovery order.
    pub fn push(&mut self, speaker: &str, interval: SpeakerInterval) {
        match self.tracks.iter_mut().find(|t| t.speaker == speaker) {
            Some(track) => track.intervals.push(interval),
            None => self.tracks.push(SpeakerTrack {
                speaker: speaker.to_string(),
                intervals: vec![interval],
            }),
        }
    }

    pub fn tracks(&self) -> &[SpeakerTrack] {
        &self.tracks
    }

    /// Speaker labels in discovery order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|t| t.speaker.as_str())
    }

    pub fn speaker_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl From<Vec<SpeakerTrack>> for SpeakerTimeline {
    fn from(tracks: Vec<SpeakerTrack>) -> Self {
        Self { tracks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_discovery_order() {
        let mut timeline = SpeakerTimeline::new();
        timeline.push("speaker_1", SpeakerInterval::new(0.0, 3.0));
        timeline.push("speaker_0", SpeakerInterval::new(3.0, 6.0));
        timeline.push("speaker_1", SpeakerInterval::new(6.0, 9.0));

        let labels: Vec<&str> = timeline.labels().collect();
        assert_eq!(labels, vec!["speaker_1", "speaker_0"]);
        assert_eq!(timeline.tracks()[0].intervals.len(), 2);
        assert_eq!(timeline.tracks()[1].intervals.len(), 1);
    }

    #[test]
    fn test_serializes_as_ordered_sequence() {
        let mut timeline = SpeakerTimeline::new();
        timeline.push("a", SpeakerInterval::new(0.0, 1.0));
        timeline.push("b", SpeakerInterval::new(1.0, 2.0));

        let json = serde_json::to_value(&timeline).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["speaker"], "a");
        assert_eq!(json[1]["speaker"], "b");
    }
}
