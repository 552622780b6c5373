use std::path::PathBuf;

use thiserror::Error;

use crate::models::{PipelineStatus, PipelineStep};

/// Error type for external capability invocations.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {body}")]
    Endpoint {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("no auth credential available for {0}")]
    MissingCredential(&'static str),
    #[error("cannot read audio file {path:?}: {source}")]
    AudioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Other(String),
}

/// Error type for a whole analysis run.
///
/// Input errors fail fast before any stage runs. A stage failure names
/// the failed step and carries the statuses accumulated so far, so a
/// caller can report exactly how far the run got without a partial
/// record ever being written.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot open input audio {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{step} failed: {source}")]
    Step {
        step: PipelineStep,
        status: PipelineStatus,
        #[source]
        source: CapabilityError,
    },
}

impl PipelineError {
    pub fn step(step: PipelineStep, status: &PipelineStatus, source: CapabilityError) -> Self {
        Self::Step {
            step,
            status: status.clone(),
            source,
        }
    }

    /// Step statuses at the moment of failure, if any stage had started
    pub fn status(&self) -> Option<&PipelineStatus> {
        match self {
            PipelineError::Input { .. } => None,
            PipelineError::Step { status, .. } => Some(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_names_failed_step() {
        let status = PipelineStatus::new();
        let err = PipelineError::step(
            PipelineStep::Summarization,
            &status,
            CapabilityError::Other("model unavailable".to_string()),
        );

        let message = err.to_string();
        assert!(message.contains("summarization failed"));
        assert!(err.status().is_some());
    }

    #[test]
    fn test_input_error_has_no_status() {
        let err = PipelineError::Input {
            path: PathBuf::from("/missing.wav"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.status().is_none());
    }
}
