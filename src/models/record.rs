use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RoleMap, SpeakerRole, SpeakerTimeline, TranscriptSegment};

/// Sentiment class derived from a polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        };
        f.write_str(s)
    }
}

/// Sentiment classification with its underlying polarity in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub sentiment: SentimentLabel,
    pub polarity: f64,
}

impl Sentiment {
    /// Default result for text that was never scored.
    pub fn neutral() -> Self {
        Self {
            sentiment: SentimentLabel::Neutral,
            polarity: 0.0,
        }
    }
}

/// Call intent category, exactly one per speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "Exchange request")]
    ExchangeRequest,
    #[serde(rename = "Order status")]
    OrderStatus,
    #[serde(rename = "Product inquiry")]
    ProductInquiry,
    #[serde(rename = "General conversation")]
    GeneralConversation,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::ExchangeRequest => "Exchange request",
            Intent::OrderStatus => "Order status",
            Intent::ProductInquiry => "Product inquiry",
            Intent::GeneralConversation => "General conversation",
        };
        f.write_str(s)
    }
}

/// Analysis of one speaker's share of the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerSpeakerRecord {
    /// Label from the diarization source
    pub speaker: String,
    pub role: SpeakerRole,
    /// Transcript text fused from this speaker's intervals; empty when
    /// no transcript segment overlapped any of them
    pub fused_text: String,
    /// Whether fusion found any text for this speaker
    pub text_found: bool,
    pub sentiment: Sentiment,
    /// Detected intents in priority order (one label under the keyword scheme)
    pub intents: Vec<Intent>,
}

/// The stages of one analysis run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    Transcription,
    LanguageDetection,
    Diarization,
    RoleMapping,
    TranscriptFusion,
    SpeakerAnalysis,
    Summarization,
    OutcomeDetection,
}

impl PipelineStep {
    /// All steps in execution order
    pub const ALL: [PipelineStep; 8] = [
        PipelineStep::Transcription,
        PipelineStep::LanguageDetection,
        PipelineStep::Diarization,
        PipelineStep::RoleMapping,
        PipelineStep::TranscriptFusion,
        PipelineStep::SpeakerAnalysis,
        PipelineStep::Summarization,
        PipelineStep::OutcomeDetection,
    ];
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStep::Transcription => "transcription",
            PipelineStep::LanguageDetection => "language detection",
            PipelineStep::Diarization => "diarization",
            PipelineStep::RoleMapping => "speaker role mapping",
            PipelineStep::TranscriptFusion => "transcript fusion",
            PipelineStep::SpeakerAnalysis => "per-speaker analysis",
            PipelineStep::Summarization => "summarization",
            PipelineStep::OutcomeDetection => "outcome detection",
        };
        f.write_str(s)
    }
}

/// A step is either waiting or finished; there are no intermediate
/// states and no rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Done,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Pending => "pending",
            StepStatus::Done => "done",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepState {
    pub step: PipelineStep,
    pub status: StepStatus,
}

/// Status of every pipeline step for one run, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineStatus {
    steps: Vec<StepState>,
}

impl PipelineStatus {
    /// All steps pending
    pub fn new() -> Self {
        Self {
            steps: PipelineStep::ALL
                .iter()
                .map(|&step| StepState {
                    step,
                    status: StepStatus::Pending,
                })
                .collect(),
        }
    }

    pub fn mark_done(&mut self, step: PipelineStep) {
        if let Some(state) = self.steps.iter_mut().find(|s| s.step == step) {
            state.status = StepStatus::Done;
        }
    }

    pub fn status_of(&self, step: PipelineStep) -> StepStatus {
        self.steps
            .iter()
            .find(|s| s.step == step)
            .map(|s| s.status)
            .unwrap_or(StepStatus::Pending)
    }

    pub fn steps(&self) -> &[StepState] {
        &self.steps
    }
}

impl Default for PipelineStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete record produced by one analysis run.
///
/// Fully JSON-serializable; this is the shape of the exported artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique id for this run
    pub run_id: String,
    /// RFC 3339 UTC timestamp of when the run finished
    pub analyzed_at: String,
    /// Name of the analyzed audio file
    pub file: String,
    /// Detected language code, `"unknown"` when detection failed
    pub language: String,
    /// Full transcript as timestamped segments
    pub segments: Vec<TranscriptSegment>,
    /// Raw diarization timeline
    pub diarization: SpeakerTimeline,
    /// Speaker label to role assignments
    pub speaker_mapping: RoleMap,
    /// Per-speaker analysis records, one per diarized speaker
    pub per_speaker: Vec<PerSpeakerRecord>,
    /// Call summary text, empty when the transcript was empty
    pub summary: String,
    /// Whether the call appears to have concluded with a resolution
    pub resolved: bool,
    /// Step statuses at the end of the run
    pub pipeline_status: PipelineStatus,
}
