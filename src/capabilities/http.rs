use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::capabilities::{
    Diarizer, SentimentScorer, Summarizer, Transcriber, MAX_SUMMARY_INPUT_CHARS, truncate_chars,
};
use crate::error::CapabilityError;
use crate::models::{SpeakerInterval, SpeakerTimeline, TranscriptSegment, Transcription};

/// Read the diarization auth credential from the environment.
///
/// Checks `HF_TOKEN` first, then `HUGGINGFACE_TOKEN`. Absence is not an
/// error; the pipeline degrades to the clustering diarizer.
pub fn diarization_token_from_env() -> Option<String> {
    std::env::var("HF_TOKEN")
        .or_else(|_| std::env::var("HUGGINGFACE_TOKEN"))
        .ok()
}

/// Configuration for the model-serving endpoint
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL of the inference service
    pub base_url: String,
    /// Bearer credential for the primary diarization route
    pub auth_token: Option<String>,
}

impl InferenceConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CALLSIGHT_INFERENCE_URL")
            .context("CALLSIGHT_INFERENCE_URL environment variable not set")?;

        Ok(Self {
            base_url,
            auth_token: diarization_token_from_env(),
        })
    }

    /// Create with explicit settings
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token,
        }
    }
}

/// Client for the model-serving endpoints consumed by the pipeline:
/// transcription, diarization, summarization, and sentiment scoring.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    config: InferenceConfig,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn has_auth_token(&self) -> bool {
        self.config.auth_token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn read_audio(path: &Path) -> Result<Vec<u8>, CapabilityError> {
        tokio::fs::read(path)
            .await
            .map_err(|source| CapabilityError::AudioRead {
                path: path.to_path_buf(),
                source,
            })
    }

    /// POST raw audio bytes, optionally with the bearer credential
    async fn post_audio<T: DeserializeOwned>(
        &self,
        path: &str,
        audio: &Path,
        authenticated: bool,
    ) -> Result<T, CapabilityError> {
        let token = if authenticated {
            Some(
                self.config
                    .auth_token
                    .as_ref()
                    .ok_or(CapabilityError::MissingCredential("diarization"))?,
            )
        } else {
            None
        };

        let bytes = Self::read_audio(audio).await?;
        let endpoint = self.endpoint(path);

        let mut request = self
            .client
            .post(&endpoint)
            .header("content-type", "application/octet-stream")
            .body(bytes);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| CapabilityError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        Self::decode(endpoint, response).await
    }

    /// POST a JSON body
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CapabilityError> {
        let endpoint = self.endpoint(path);

        let response = self
            .client
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(|source| CapabilityError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        Self::decode(endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: String,
        response: reqwest::Response,
    ) -> Result<T, CapabilityError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::Endpoint {
                endpoint,
                status,
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|source| CapabilityError::MalformedResponse { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    segments: Vec<TranscriptSegment>,
    text: String,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiarizeResponse {
    turns: Vec<DiarizedTurn>,
}

/// One attributed span as the diarization routes emit it
#[derive(Debug, Deserialize)]
struct DiarizedTurn {
    start: f64,
    end: f64,
    speaker: String,
}

impl DiarizeResponse {
    fn into_timeline(self) -> SpeakerTimeline {
        let mut timeline = SpeakerTimeline::new();
        for turn in self.turns {
            timeline.push(&turn.speaker, SpeakerInterval::new(turn.start, turn.end));
        }
        timeline
    }
}

#[derive(Debug, Serialize)]
struct TextRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    polarity: f64,
}

#[async_trait]
impl Transcriber for InferenceClient {
    async fn transcribe(&self, audio: &Path) -> Result<Transcription, CapabilityError> {
        let response: TranscribeResponse = self.post_audio("/v1/transcribe", audio, false).await?;

        Ok(Transcription {
            segments: response.segments,
            full_text: response.text,
            language: response.language.filter(|lang| !lang.is_empty()),
        })
    }
}

#[async_trait]
impl Summarizer for InferenceClient {
    async fn summarize(&self, text: &str) -> Result<String, CapabilityError> {
        let request = TextRequest {
            text: truncate_chars(text, MAX_SUMMARY_INPUT_CHARS).to_string(),
        };
        let response: SummarizeResponse = self.post_json("/v1/summarize", &request).await?;
        Ok(response.summary)
    }
}

#[async_trait]
impl SentimentScorer for InferenceClient {
    async fn polarity(&self, text: &str) -> Result<f64, CapabilityError> {
        let request = TextRequest {
            text: text.to_string(),
        };
        let response: SentimentResponse = self.post_json("/v1/sentiment", &request).await?;
        Ok(response.polarity)
    }
}

/// High-quality diarization route; requires the bearer credential.
pub struct PrimaryDiarizer {
    client: InferenceClient,
}

impl PrimaryDiarizer {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Diarizer for PrimaryDiarizer {
    async fn diarize(&self, audio: &Path) -> Result<SpeakerTimeline, CapabilityError> {
        let response: DiarizeResponse = self.client.post_audio("/v1/diarize", audio, true).await?;
        Ok(response.into_timeline())
    }
}

/// Clustering-based diarization route; lower quality, no credential needed.
pub struct ClusteringDiarizer {
    client: InferenceClient,
}

impl ClusteringDiarizer {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Diarizer for ClusteringDiarizer {
    async fn diarize(&self, audio: &Path) -> Result<SpeakerTimeline, CapabilityError> {
        let response: DiarizeResponse = self
            .client
            .post_audio("/v1/diarize/cluster", audio, false)
            .await?;
        Ok(response.into_timeline())
    }
}
