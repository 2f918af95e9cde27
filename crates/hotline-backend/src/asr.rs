use crate::error::BackendError;
use std::time::Duration;

/// Timeout for one transcription request.
const TRANSCRIPTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the speech-recognition service.
///
/// `POST {base_url}/asr` with a multipart `audio_file` part plus
/// `task=transcribe` / `language=en` fields, returning `{"text": ...}`.
///
/// The webhook turn flow does not call this client — telephony providers
/// deliver already-transcribed speech — but the service is part of the
/// deployment and this adapter covers direct audio submission.
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    http: reqwest::Client,
    base_url: String,
}

impl TranscriptionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Transcribes WAV audio into text.
    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String, BackendError> {
        tracing::debug!(bytes = audio.len(), "requesting transcription");
        let result = self.request(audio).await;
        if let Err(error) = &result {
            tracing::warn!(%error, "transcription request failed");
        }
        result
    }

    async fn request(&self, audio: Vec<u8>) -> Result<String, BackendError> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| BackendError::Malformed(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("audio_file", part)
            .text("task", "transcribe")
            .text("language", "en");

        let response = self
            .http
            .post(format!("{}/asr", self.base_url))
            .timeout(TRANSCRIPTION_TIMEOUT)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let text = body
            .get("text")
            .and_then(|t| t.as_str())
            .ok_or_else(|| BackendError::Malformed("missing `text` field".to_string()))?;
        Ok(text.to_string())
    }
}
