//! Twilio adapter: TwiML markup documents.

use crate::{ProviderAdapter, NO_SPEECH_TEXT, STILL_THERE_TEXT};
use hotline_types::{TurnOutcome, Utterance};
use serde::Deserialize;

/// Voice used for `<Say>` fallbacks rendered by Twilio itself.
const SAY_VOICE: &str = "alice";

/// Inbound Twilio webhook form payload. Twilio posts more fields than these;
/// everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwilioWebhook {
    #[serde(rename = "CallSid")]
    pub call_sid: Option<String>,
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "SpeechResult")]
    pub speech_result: Option<String>,
}

/// Encodes dialogue outcomes as TwiML and decodes Twilio gather callbacks.
#[derive(Debug, Clone)]
pub struct TwimlAdapter {
    /// Public base URL used for the gather action endpoint.
    base_url: String,
}

impl TwimlAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `<Gather>` that re-invokes the turn endpoint with the next transcript.
    fn gather(&self, nested_say: Option<&str>) -> String {
        let open = format!(
            r#"<Gather input="speech" action="{}/gather" method="POST" speechTimeout="auto" language="en-US">"#,
            self.base_url
        );
        match nested_say {
            Some(text) => format!("{}{}</Gather>", open, say(text)),
            None => format!("{}</Gather>", open),
        }
    }

    /// Play when the outcome has audio, else delegate to Twilio's voice.
    fn play_or_say(&self, outcome: &TurnOutcome) -> String {
        match &outcome.audio_ref {
            Some(url) => format!("<Play>{}</Play>", xml_escape(url)),
            None => say(&outcome.spoken_text),
        }
    }

    fn document(&self, body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>{}</Response>",
            body
        )
    }
}

impl ProviderAdapter for TwimlAdapter {
    type Inbound = TwilioWebhook;
    type Document = String;

    fn decode_inbound(&self, inbound: &TwilioWebhook) -> Utterance {
        Utterance::new(
            inbound.speech_result.clone().unwrap_or_default(),
            inbound
                .call_sid
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        )
    }

    fn encode_greeting(&self, outcome: &TurnOutcome) -> String {
        self.document(&format!(
            "{}{}{}<Hangup/>",
            self.play_or_say(outcome),
            self.gather(Some("I'm listening.")),
            say(NO_SPEECH_TEXT)
        ))
    }

    fn encode_turn_outcome(&self, outcome: &TurnOutcome) -> String {
        if outcome.should_terminate {
            self.document(&format!("{}<Hangup/>", self.play_or_say(outcome)))
        } else {
            self.document(&format!(
                "{}{}{}<Hangup/>",
                self.play_or_say(outcome),
                self.gather(None),
                say(STILL_THERE_TEXT)
            ))
        }
    }
}

fn say(text: &str) -> String {
    format!(r#"<Say voice="{}">{}</Say>"#, SAY_VOICE, xml_escape(text))
}

/// Escapes text for embedding in TwiML element content and attributes.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
