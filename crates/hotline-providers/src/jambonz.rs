//! Jambonz adapter: JSON verb-sequence documents.

use crate::{ProviderAdapter, NO_SPEECH_TEXT, STILL_THERE_TEXT};
use hotline_types::{TurnOutcome, Utterance};
use serde::{Deserialize, Serialize};

/// Gather timeout in seconds before the provider falls through to the next
/// verb in the sequence.
const GATHER_TIMEOUT_SECS: u32 = 10;

/// Vendor block Jambonz uses to render `say` text itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesizer {
    pub vendor: String,
    pub language: String,
    pub voice: String,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self {
            vendor: "google".to_string(),
            language: "en-US".to_string(),
            voice: "en-US-Wavenet-D".to_string(),
        }
    }
}

/// Vendor block Jambonz uses to transcribe gathered speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognizer {
    pub vendor: String,
    pub language: String,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self {
            vendor: "google".to_string(),
            language: "en-US".to_string(),
        }
    }
}

/// One Jambonz control verb. A document is an ordered array of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verb", rename_all = "lowercase")]
pub enum Verb {
    Play {
        url: String,
    },
    Say {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        synthesizer: Option<Synthesizer>,
    },
    Gather {
        input: Vec<String>,
        #[serde(rename = "actionHook")]
        action_hook: String,
        timeout: u32,
        #[serde(rename = "speechTimeout", skip_serializing_if = "Option::is_none")]
        speech_timeout: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        recognizer: Option<Recognizer>,
    },
    Hangup,
}

/// Inbound Jambonz webhook payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JambonzWebhook {
    pub call_sid: Option<String>,
    pub from: Option<String>,
    pub speech: Option<JambonzSpeech>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JambonzSpeech {
    #[serde(default)]
    pub alternatives: Vec<JambonzAlternative>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JambonzAlternative {
    #[serde(default)]
    pub transcript: String,
}

/// Encodes dialogue outcomes as Jambonz verb arrays and decodes gather
/// callbacks.
#[derive(Debug, Clone)]
pub struct JambonzAdapter {
    /// Public base URL used for the gather action hook.
    base_url: String,
}

impl JambonzAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn gather(&self) -> Verb {
        Verb::Gather {
            input: vec!["speech".to_string()],
            action_hook: format!("{}/jambonz-gather", self.base_url),
            timeout: GATHER_TIMEOUT_SECS,
            speech_timeout: Some("auto".to_string()),
            recognizer: Some(Recognizer::default()),
        }
    }

    fn play_or_say(&self, outcome: &TurnOutcome) -> Verb {
        match &outcome.audio_ref {
            Some(url) => Verb::Play { url: url.clone() },
            None => Verb::Say {
                text: outcome.spoken_text.clone(),
                synthesizer: Some(Synthesizer::default()),
            },
        }
    }
}

impl ProviderAdapter for JambonzAdapter {
    type Inbound = JambonzWebhook;
    type Document = Vec<Verb>;

    fn decode_inbound(&self, inbound: &JambonzWebhook) -> Utterance {
        let text = inbound
            .speech
            .as_ref()
            .and_then(|s| s.alternatives.first())
            .map(|a| a.transcript.clone())
            .unwrap_or_default();
        Utterance::new(
            text,
            inbound
                .call_sid
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        )
    }

    fn encode_greeting(&self, outcome: &TurnOutcome) -> Vec<Verb> {
        vec![
            self.play_or_say(outcome),
            self.gather(),
            Verb::Say {
                text: NO_SPEECH_TEXT.to_string(),
                synthesizer: None,
            },
            Verb::Hangup,
        ]
    }

    fn encode_turn_outcome(&self, outcome: &TurnOutcome) -> Vec<Verb> {
        if outcome.should_terminate {
            vec![self.play_or_say(outcome), Verb::Hangup]
        } else {
            vec![
                self.play_or_say(outcome),
                self.gather(),
                Verb::Say {
                    text: STILL_THERE_TEXT.to_string(),
                    synthesizer: None,
                },
                Verb::Hangup,
            ]
        }
    }
}
