use crate::error::BackendError;
use serde_json::json;
use std::time::Duration;

/// Timeout for one synthesis request.
const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the speech-synthesis service.
///
/// `POST {base_url}/tts` with `{text, language}`, returning WAV bytes.
#[derive(Debug, Clone)]
pub struct SynthesisClient {
    http: reqwest::Client,
    base_url: String,
}

impl SynthesisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Synthesizes speech for `text` and returns the WAV payload.
    pub async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, BackendError> {
        tracing::debug!(chars = text.len(), language, "requesting speech synthesis");
        let result = self.request(text, language).await;
        if let Err(error) = &result {
            tracing::warn!(%error, "synthesis request failed");
        }
        result
    }

    async fn request(&self, text: &str, language: &str) -> Result<Vec<u8>, BackendError> {
        let response = self
            .http
            .post(format!("{}/tts", self.base_url))
            .timeout(SYNTHESIS_TIMEOUT)
            .json(&json!({ "text": text, "language": language }))
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
