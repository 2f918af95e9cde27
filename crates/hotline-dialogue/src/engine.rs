use hotline_backend::{ResponderClient, SynthesisClient};
use hotline_store::ArtifactStore;
use hotline_types::{TurnOutcome, Utterance};
use std::sync::Arc;

/// Fixed greeting spoken when a call arrives.
pub const GREETING_TEXT: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Fixed farewell spoken when the caller closes the conversation.
pub const FAREWELL_TEXT: &str = "Thank you for calling! Have a great day. Goodbye!";

/// Fixed re-prompt for a turn that carried no speech.
pub const REPROMPT_TEXT: &str = "I didn't catch that, could you repeat?";

/// Fixed apology substituted when the responder backend fails.
pub const APOLOGY_TEXT: &str = "I'm sorry, I had trouble understanding. Could you repeat that?";

/// Phrases that close the conversation. Matched as case-insensitive
/// substrings of the utterance; this is a heuristic, not intent
/// classification, and false positives are accepted.
const CLOSING_PHRASES: &[&str] = &["goodbye", "bye", "hang up", "end call", "that's all"];

/// Synthesis language for all spoken output.
const SYNTHESIS_LANGUAGE: &str = "en";

/// State-independent turn logic: one utterance in, one [`TurnOutcome`] out.
///
/// Holds long-lived backend clients and the artifact store, injected once at
/// process startup. The engine itself keeps no per-call state.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    responder: Arc<ResponderClient>,
    synthesizer: Arc<SynthesisClient>,
    store: Arc<ArtifactStore>,
    public_url: String,
    persona: String,
}

impl TurnEngine {
    pub fn new(
        responder: Arc<ResponderClient>,
        synthesizer: Arc<SynthesisClient>,
        store: Arc<ArtifactStore>,
        public_url: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            responder,
            synthesizer,
            store,
            public_url: public_url.into(),
            persona: persona.into(),
        }
    }

    /// Produces the greeting outcome for a newly arrived call.
    pub async fn greeting(&self) -> TurnOutcome {
        self.voice(TurnOutcome::speak(GREETING_TEXT)).await
    }

    /// Executes one dialogue turn.
    ///
    /// Silence yields the fixed re-prompt without touching the backends. A
    /// closing phrase yields the farewell with `should_terminate` set. Any
    /// other utterance is answered by the responder backend; responder
    /// failure substitutes the fixed apology and the turn proceeds rather
    /// than aborting the call.
    pub async fn process_turn(&self, utterance: &Utterance) -> TurnOutcome {
        if utterance.is_silent() {
            tracing::info!(call_id = %utterance.call_id, "no speech detected, re-prompting");
            return TurnOutcome::speak(REPROMPT_TEXT);
        }

        if is_closing(&utterance.text) {
            tracing::info!(call_id = %utterance.call_id, "closing phrase detected");
            return self.voice(TurnOutcome::farewell(FAREWELL_TEXT)).await;
        }

        let spoken_text = match self
            .responder
            .respond(&utterance.text, &self.persona, None)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(call_id = %utterance.call_id, error = %e, "responder failed, substituting apology");
                APOLOGY_TEXT.to_string()
            }
        };

        tracing::info!(call_id = %utterance.call_id, reply = %spoken_text, "responder produced reply");
        self.voice(TurnOutcome::speak(spoken_text)).await
    }

    /// Tries to synthesize and store audio for the outcome's spoken text.
    ///
    /// On synthesis or store failure the outcome is returned with
    /// `audio_ref` unset; the provider adapter then falls back to speaking
    /// the text with the provider's native voice.
    async fn voice(&self, outcome: TurnOutcome) -> TurnOutcome {
        let bytes = match self
            .synthesizer
            .synthesize(&outcome.spoken_text, SYNTHESIS_LANGUAGE)
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "synthesis failed, falling back to provider voice");
                return outcome;
            }
        };

        match self.store.put(&bytes).await {
            Ok(name) => {
                let url = format!("{}/audio/{}", self.public_url, name);
                outcome.with_audio_ref(url)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to store audio artifact");
                outcome
            }
        }
    }
}

/// True when the utterance contains any closing phrase, case-insensitively.
fn is_closing(text: &str) -> bool {
    let lowered = text.to_lowercase();
    CLOSING_PHRASES.iter().any(|p| lowered.contains(p))
}
