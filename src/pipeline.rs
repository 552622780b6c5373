use std::path::Path;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::analysis::{analyze_speaker, detect_resolution};
use crate::capabilities::{Diarizer, IntentDetector, SentimentScorer, Summarizer, Transcriber};
use crate::error::PipelineError;
use crate::fusion::fuse_track;
use crate::models::{assign_roles, AnalysisResult, PipelineStatus, PipelineStep};

/// The full analysis pipeline over injected external capabilities.
///
/// Stages run strictly in sequence; every capability call completes
/// before the next stage starts, and a failure aborts the run carrying
/// the step statuses accumulated so far. Runs are independent, so
/// separate `Pipeline` values may execute concurrently, but nothing
/// within one run is parallelized.
pub struct Pipeline<T, D, S, P, I> {
    transcriber: T,
    diarizer: D,
    summarizer: S,
    sentiment: P,
    intents: I,
}

impl<T, D, S, P, I> Pipeline<T, D, S, P, I>
where
    T: Transcriber,
    D: Diarizer,
    S: Summarizer,
    P: SentimentScorer,
    I: IntentDetector,
{
    pub fn new(transcriber: T, diarizer: D, summarizer: S, sentiment: P, intents: I) -> Self {
        Self {
            transcriber,
            diarizer,
            summarizer,
            sentiment,
            intents,
        }
    }

    /// Analyze one recorded call end to end.
    pub async fn run(&self, audio: &Path) -> Result<AnalysisResult, PipelineError> {
        // Fail fast on missing or unreadable input, before any stage runs
        std::fs::File::open(audio).map_err(|source| PipelineError::Input {
            path: audio.to_path_buf(),
            source,
        })?;

        let mut status = PipelineStatus::new();

        info!("transcribing {:?}", audio);
        let transcription = self
            .transcriber
            .transcribe(audio)
            .await
            .map_err(|e| PipelineError::step(PipelineStep::Transcription, &status, e))?;
        status.mark_done(PipelineStep::Transcription);
        info!("transcription: {} segments", transcription.segments.len());

        // Detection failure degrades to "unknown", never aborts
        let language = transcription
            .language
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        status.mark_done(PipelineStep::LanguageDetection);
        info!("detected language: {}", language);

        let timeline = self
            .diarizer
            .diarize(audio)
            .await
            .map_err(|e| PipelineError::step(PipelineStep::Diarization, &status, e))?;
        status.mark_done(PipelineStep::Diarization);
        info!("diarization: {} speakers", timeline.speaker_count());

        let roles = assign_roles(timeline.labels());
        status.mark_done(PipelineStep::RoleMapping);

        let fused: Vec<_> = timeline
            .tracks()
            .iter()
            .map(|track| {
                (
                    track.speaker.clone(),
                    fuse_track(&transcription.segments, track),
                )
            })
            .collect();
        status.mark_done(PipelineStep::TranscriptFusion);

        let mut per_speaker = Vec::with_capacity(fused.len());
        for (speaker, fused_text) in &fused {
            let record = analyze_speaker(
                &self.sentiment,
                &self.intents,
                speaker,
                roles.role_of(speaker),
                fused_text,
            )
            .await
            .map_err(|e| PipelineError::step(PipelineStep::SpeakerAnalysis, &status, e))?;
            per_speaker.push(record);
        }
        status.mark_done(PipelineStep::SpeakerAnalysis);

        let summary = if transcription.full_text.trim().is_empty() {
            String::new()
        } else {
            self.summarizer
                .summarize(&transcription.full_text)
                .await
                .map_err(|e| PipelineError::step(PipelineStep::Summarization, &status, e))?
        };
        status.mark_done(PipelineStep::Summarization);

        let resolved = detect_resolution(&transcription.full_text);
        status.mark_done(PipelineStep::OutcomeDetection);
        info!("resolved: {}", resolved);

        Ok(AnalysisResult {
            run_id: Uuid::new_v4().to_string(),
            analyzed_at: Utc::now().to_rfc3339(),
            file: file_name(audio),
            language,
            segments: transcription.segments,
            diarization: timeline,
            speaker_mapping: roles,
            per_speaker,
            summary,
            resolved,
            pipeline_status: status,
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::KeywordIntentClassifier;
    use crate::error::CapabilityError;
    use crate::models::{
        Intent, SentimentLabel, SpeakerInterval, SpeakerRole, SpeakerTimeline, StepStatus,
        TranscriptSegment, Transcription,
    };
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeTranscriber {
        transcription: Transcription,
    }

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(&self, _audio: &Path) -> Result<Transcription, CapabilityError> {
            Ok(self.transcription.clone())
        }
    }

    struct FakeDiarizer {
        timeline: SpeakerTimeline,
    }

    #[async_trait]
    impl Diarizer for FakeDiarizer {
        async fn diarize(&self, _audio: &Path) -> Result<SpeakerTimeline, CapabilityError> {
            Ok(self.timeline.clone())
        }
    }

    struct FakeSummarizer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeSummarizer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String, CapabilityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CapabilityError::Other("summarizer down".to_string()));
            }
            Ok("a short summary".to_string())
        }
    }

    struct CountingScorer {
        calls: AtomicUsize,
        score: f64,
    }

    impl CountingScorer {
        fn new(score: f64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                score,
            }
        }
    }

    #[async_trait]
    impl SentimentScorer for CountingScorer {
        async fn polarity(&self, _text: &str) -> Result<f64, CapabilityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.score)
        }
    }

    fn audio_fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"RIFF....WAVE").unwrap();
        file
    }

    /// 4 segments, 2 speakers: speaker_0 owns [0,4), speaker_1 owns
    /// [4,8), and speaker_2's interval overlaps nothing.
    fn two_speaker_fixture() -> (Transcription, SpeakerTimeline) {
        let transcription = Transcription {
            segments: vec![
                TranscriptSegment::new(0.0, 2.0, "thanks for calling"),
                TranscriptSegment::new(2.0, 4.0, "how can I help"),
                TranscriptSegment::new(4.0, 6.0, "I want a refund"),
                TranscriptSegment::new(6.0, 8.0, "on my order"),
            ],
            full_text: "thanks for calling how can I help I want a refund on my order"
                .to_string(),
            language: Some("en".to_string()),
        };

        let mut timeline = SpeakerTimeline::new();
        timeline.push("speaker_0", SpeakerInterval::new(0.0, 4.0));
        timeline.push("speaker_1", SpeakerInterval::new(4.0, 8.0));
        timeline.push("speaker_2", SpeakerInterval::new(20.0, 25.0));
        (transcription, timeline)
    }

    #[tokio::test]
    async fn test_end_to_end_two_speakers() {
        let (transcription, timeline) = two_speaker_fixture();
        let scorer = CountingScorer::new(0.3);
        let pipeline = Pipeline::new(
            FakeTranscriber { transcription },
            FakeDiarizer { timeline },
            FakeSummarizer::new(),
            scorer,
            KeywordIntentClassifier,
        );

        let audio = audio_fixture();
        let result = pipeline.run(audio.path()).await.unwrap();

        assert_eq!(result.language, "en");
        assert_eq!(result.per_speaker.len(), 3);

        let agent = &result.per_speaker[0];
        assert_eq!(agent.speaker, "speaker_0");
        assert_eq!(agent.role, SpeakerRole::Agent);
        assert_eq!(agent.fused_text, "thanks for calling how can I help");
        assert_eq!(agent.sentiment.sentiment, SentimentLabel::Positive);

        let customer = &result.per_speaker[1];
        assert_eq!(customer.role, SpeakerRole::Customer);
        assert_eq!(customer.fused_text, "I want a refund on my order");
        assert_eq!(customer.intents, vec![Intent::ExchangeRequest]);

        // speaker_2 overlapped nothing: sentinel record, scorer untouched
        let silent = &result.per_speaker[2];
        assert!(!silent.text_found);
        assert_eq!(silent.fused_text, "");
        assert_eq!(silent.sentiment.sentiment, SentimentLabel::Neutral);
        assert_eq!(pipeline.sentiment.calls.load(Ordering::SeqCst), 2);

        // "thanks" appears in the transcript
        assert!(result.resolved);
        assert_eq!(result.summary, "a short summary");

        for state in result.pipeline_status.steps() {
            assert_eq!(state.status, StepStatus::Done);
        }
    }

    #[tokio::test]
    async fn test_missing_audio_fails_fast() {
        let (transcription, timeline) = two_speaker_fixture();
        let pipeline = Pipeline::new(
            FakeTranscriber { transcription },
            FakeDiarizer { timeline },
            FakeSummarizer::new(),
            CountingScorer::new(0.0),
            KeywordIntentClassifier,
        );

        let err = pipeline
            .run(Path::new("/no/such/audio.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Input { .. }));
    }

    #[tokio::test]
    async fn test_stage_failure_names_step_and_keeps_statuses() {
        let (transcription, timeline) = two_speaker_fixture();
        let pipeline = Pipeline::new(
            FakeTranscriber { transcription },
            FakeDiarizer { timeline },
            FakeSummarizer::failing(),
            CountingScorer::new(0.0),
            KeywordIntentClassifier,
        );

        let audio = audio_fixture();
        let err = pipeline.run(audio.path()).await.unwrap_err();

        match err {
            PipelineError::Step { step, status, .. } => {
                assert_eq!(step, PipelineStep::Summarization);
                assert_eq!(
                    status.status_of(PipelineStep::SpeakerAnalysis),
                    StepStatus::Done
                );
                assert_eq!(
                    status.status_of(PipelineStep::Summarization),
                    StepStatus::Pending
                );
                assert_eq!(
                    status.status_of(PipelineStep::OutcomeDetection),
                    StepStatus::Pending
                );
            }
            other => panic!("expected step error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_transcript_degrades_language_and_skips_summary() {
        let transcription = Transcription {
            segments: vec![],
            full_text: String::new(),
            language: None,
        };
        let pipeline = Pipeline::new(
            FakeTranscriber { transcription },
            FakeDiarizer {
                timeline: SpeakerTimeline::new(),
            },
            FakeSummarizer::new(),
            CountingScorer::new(0.0),
            KeywordIntentClassifier,
        );

        let audio = audio_fixture();
        let result = pipeline.run(audio.path()).await.unwrap();

        assert_eq!(result.language, "unknown");
        assert_eq!(result.summary, "");
        assert_eq!(pipeline.summarizer.calls.load(Ordering::SeqCst), 0);
        assert!(!result.resolved);

        // zero speakers: the sentinel role mapping stands alone
        assert!(result.per_speaker.is_empty());
        assert_eq!(
            result.speaker_mapping.role_of("unknown"),
            SpeakerRole::Unknown
        );
    }
}
