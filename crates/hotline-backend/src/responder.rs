use crate::error::BackendError;
use serde_json::json;
use std::time::Duration;

/// Timeout for one responder request. Language-model generation is slower
/// than synthesis, so this is double the synthesis timeout.
const RESPONDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Model name sent to the direct completion endpoint.
const DIRECT_MODEL: &str = "llama3.1:8b";

/// Sampling temperature for direct completions.
const DIRECT_TEMPERATURE: f64 = 0.7;

/// Token cap for direct completions. Keeps replies short enough to speak.
const DIRECT_MAX_TOKENS: u32 = 150;

/// Which responder endpoint the client talks to.
///
/// Selection is static per process: the configuration either names a workflow
/// flow id (workflow execution) or it does not (direct completion). Both
/// backends conform to the same `(message, history) -> text` contract.
#[derive(Debug, Clone)]
pub enum ResponderBackend {
    /// Direct language-model completion endpoint (`/api/generate`).
    Direct,
    /// Workflow-execution endpoint (`/api/v1/run/{flow_id}`).
    Workflow { flow_id: String },
}

/// Client for the language-model responder.
#[derive(Debug, Clone)]
pub struct ResponderClient {
    http: reqwest::Client,
    base_url: String,
    backend: ResponderBackend,
}

impl ResponderClient {
    pub fn new(base_url: impl Into<String>, backend: ResponderBackend) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            backend,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn backend(&self) -> &ResponderBackend {
        &self.backend
    }

    /// Produces a reply to `message`, constrained by the `persona`
    /// system-instruction text.
    ///
    /// `history` is prior `(user, assistant)` exchanges for callers that
    /// thread conversation context. The webhook turn flow is stateless and
    /// passes `None`.
    pub async fn respond(
        &self,
        message: &str,
        persona: &str,
        history: Option<&[(String, String)]>,
    ) -> Result<String, BackendError> {
        let result = match &self.backend {
            ResponderBackend::Direct => {
                tracing::debug!(chars = message.len(), "requesting direct completion");
                self.respond_direct(message, persona, history).await
            }
            ResponderBackend::Workflow { flow_id } => {
                tracing::debug!(chars = message.len(), flow_id, "requesting workflow run");
                self.respond_workflow(message, flow_id).await
            }
        };
        if let Err(error) = &result {
            tracing::warn!(%error, "responder request failed");
        }
        result
    }

    async fn respond_direct(
        &self,
        message: &str,
        persona: &str,
        history: Option<&[(String, String)]>,
    ) -> Result<String, BackendError> {
        let mut prompt = String::from(persona);
        prompt.push('\n');
        for (user, assistant) in history.unwrap_or_default() {
            prompt.push_str(&format!("\nUser: {}\nAssistant: {}", user, assistant));
        }
        prompt.push_str(&format!("\nUser: {}\nAssistant:", message));

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .timeout(RESPONDER_TIMEOUT)
            .json(&json!({
                "model": DIRECT_MODEL,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": DIRECT_TEMPERATURE,
                    "num_predict": DIRECT_MAX_TOKENS,
                },
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let text = body
            .get("response")
            .and_then(|t| t.as_str())
            .ok_or_else(|| BackendError::Malformed("missing `response` field".to_string()))?;
        Ok(text.trim().to_string())
    }

    async fn respond_workflow(&self, message: &str, flow_id: &str) -> Result<String, BackendError> {
        let response = self
            .http
            .post(format!("{}/api/v1/run/{}", self.base_url, flow_id))
            .timeout(RESPONDER_TIMEOUT)
            .json(&json!({
                "input_value": message,
                "output_type": "chat",
                "input_type": "chat",
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        // The workflow engine nests its reply several levels deep.
        let text = body
            .pointer("/outputs/0/outputs/0/results/message/text")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                BackendError::Malformed("workflow response has no message text".to_string())
            })?;
        Ok(text.trim().to_string())
    }
}
