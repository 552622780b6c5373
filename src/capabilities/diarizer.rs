use std::path::Path;

use async_trait::async_trait;
use tracing::warn;

use crate::error::CapabilityError;
use crate::models::SpeakerTimeline;

/// Interface for speaker diarization of a recorded call.
#[async_trait]
pub trait Diarizer: Send + Sync {
    async fn diarize(&self, audio: &Path) -> Result<SpeakerTimeline, CapabilityError>;
}

/// Two-tier diarizer: a high-quality primary method that needs an auth
/// credential, degrading to a lower-quality clustering method when the
/// credential is absent or the primary call fails for any reason.
pub struct TieredDiarizer<P, F> {
    primary: Option<P>,
    fallback: F,
}

impl<P, F> TieredDiarizer<P, F> {
    pub fn new(primary: Option<P>, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: Diarizer, F: Diarizer> Diarizer for TieredDiarizer<P, F> {
    async fn diarize(&self, audio: &Path) -> Result<SpeakerTimeline, CapabilityError> {
        if let Some(primary) = &self.primary {
            match primary.diarize(audio).await {
                Ok(timeline) => return Ok(timeline),
                Err(e) => {
                    warn!("primary diarization failed, falling back to clustering: {e}");
                }
            }
        }
        self.fallback.diarize(audio).await
    }
}
