//! Telephony provider adapters.
//!
//! Two independent encoders translate the dialogue engine's [`TurnOutcome`]
//! into a provider-specific control document and decode each provider's
//! inbound webhook payload into a normalized [`Utterance`]:
//!
//! - [`TwimlAdapter`] speaks Twilio's XML markup.
//! - [`JambonzAdapter`] speaks Jambonz's JSON verb sequences.
//!
//! Both honor the same contract: a document always leaves the call either
//! gathering further speech or explicitly hung up, and when the outcome
//! carries an `audio_ref` the document plays it, otherwise it delegates the
//! spoken text to the provider's own synthesizer. Never both, never neither.

pub mod jambonz;
pub mod twiml;

use hotline_types::{TurnOutcome, Utterance};

pub use jambonz::{JambonzAdapter, JambonzWebhook, Verb};
pub use twiml::{TwimlAdapter, TwilioWebhook};

/// Fallback prompt spoken by the provider when a post-reply gather times out.
pub const STILL_THERE_TEXT: &str = "Are you still there?";

/// Fallback spoken by the provider when the greeting gather times out.
pub const NO_SPEECH_TEXT: &str = "I didn't hear anything. Goodbye!";

/// Capability set every telephony provider adapter implements.
pub trait ProviderAdapter {
    /// The provider's inbound webhook payload shape.
    type Inbound;
    /// The provider's control document shape.
    type Document;

    /// Extracts the caller's transcribed speech and call identifier from the
    /// provider payload. Missing fields decode to empty text / "unknown",
    /// never an error: the webhook contract expects a well-formed document on
    /// every response regardless of input.
    fn decode_inbound(&self, inbound: &Self::Inbound) -> Utterance;

    /// Control document that greets the caller and gathers the first speech
    /// input, with a spoken fallback plus hangup if none arrives.
    fn encode_greeting(&self, outcome: &TurnOutcome) -> Self::Document;

    /// Control document for one turn outcome: play-or-say then hang up when
    /// terminal, play-or-say then gather again otherwise.
    fn encode_turn_outcome(&self, outcome: &TurnOutcome) -> Self::Document;
}
