pub mod analysis;
pub mod capabilities;
pub mod error;
pub mod fusion;
pub mod io;
pub mod models;
pub mod pipeline;

pub use analysis::{analyze_speaker, classify_polarity, detect_resolution, POLARITY_THRESHOLD};
pub use capabilities::{
    diarization_token_from_env, ClusteringDiarizer, Diarizer, InferenceClient, InferenceConfig,
    IntentDetector, KeywordIntentClassifier, PrimaryDiarizer, SentimentScorer, Summarizer,
    TieredDiarizer, Transcriber, MAX_SUMMARY_INPUT_CHARS,
};
pub use error::{CapabilityError, PipelineError};
pub use fusion::{fuse_track, overlaps, FusedTranscript};
pub use io::{load_result_file, parse_result_json, write_result_json, HumanReport};
pub use models::{
    assign_roles, AnalysisResult, Intent, PerSpeakerRecord, PipelineStatus, PipelineStep, RoleMap,
    Sentiment, SentimentLabel, SpeakerInterval, SpeakerRole, SpeakerTimeline, SpeakerTrack,
    StepStatus, TranscriptSegment, Transcription,
};
pub use pipeline::Pipeline;
