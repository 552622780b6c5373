use std::path::Path;

use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::models::Transcription;

/// Interface for speech-to-text transcription of a recorded call.
///
/// Implementations own model invocation entirely; the pipeline only
/// depends on the returned segments, full text, and detected language.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> Result<Transcription, CapabilityError>;
}
