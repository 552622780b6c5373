use crate::capabilities::{IntentDetector, SentimentScorer};
use crate::error::CapabilityError;
use crate::fusion::FusedTranscript;
use crate::models::{Intent, PerSpeakerRecord, Sentiment, SentimentLabel, SpeakerRole};

/// Polarity above this is positive, below its negation negative.
///
/// Fixed at 0.1; the looser 0.2 band seen in some sentiment stacks is
/// deliberately not used here.
pub const POLARITY_THRESHOLD: f64 = 0.1;

/// Classify a polarity score into a sentiment label.
pub fn classify_polarity(polarity: f64) -> SentimentLabel {
    if polarity > POLARITY_THRESHOLD {
        SentimentLabel::Positive
    } else if polarity < -POLARITY_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Analyze one speaker's fused transcript.
///
/// Empty fused text short-circuits to neutral defaults without invoking
/// either external capability.
pub async fn analyze_speaker(
    sentiment: &impl SentimentScorer,
    intents: &impl IntentDetector,
    speaker: &str,
    role: SpeakerRole,
    fused: &FusedTranscript,
) -> Result<PerSpeakerRecord, CapabilityError> {
    if !fused.found {
        return Ok(PerSpeakerRecord {
            speaker: speaker.to_string(),
            role,
            fused_text: String::new(),
            text_found: false,
            sentiment: Sentiment::neutral(),
            intents: vec![Intent::GeneralConversation],
        });
    }

    let polarity = sentiment.polarity(&fused.text).await?;
    let intent = intents.detect(&fused.text).await?;

    Ok(PerSpeakerRecord {
        speaker: speaker.to_string(),
        role,
        fused_text: fused.text.clone(),
        text_found: true,
        sentiment: Sentiment {
            sentiment: classify_polarity(polarity),
            polarity,
        },
        intents: vec![intent],
    })
}
