use async_trait::async_trait;

use crate::error::CapabilityError;

/// Interface for sentiment scoring.
///
/// Returns the raw polarity in [-1, 1]; classification into a label is
/// the analyzer's job so the thresholds live in exactly one place.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn polarity(&self, text: &str) -> Result<f64, CapabilityError>;
}
