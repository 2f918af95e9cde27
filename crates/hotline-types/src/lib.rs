//! Shared data model for the hotline platform.
//!
//! These types sit on the seam between the provider adapters and the dialogue
//! turn engine: an inbound webhook payload is decoded into an [`Utterance`],
//! the engine produces a [`TurnOutcome`], and an adapter encodes that outcome
//! into a provider-specific control document.

use serde::{Deserialize, Serialize};

/// One unit of caller speech, as delivered by a telephony provider webhook.
///
/// Providers transcribe speech themselves; the text here is already a
/// transcript. An empty (or whitespace-only) `text` means the provider's
/// gather timed out without detecting speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Transcribed caller speech. May be empty ("no speech detected").
    pub text: String,
    /// Opaque call identifier supplied by the provider. Used only as a
    /// correlation token for logging; no per-call state is keyed on it.
    pub call_id: String,
}

impl Utterance {
    pub fn new(text: impl Into<String>, call_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            call_id: call_id.into(),
        }
    }

    /// True when the provider delivered no usable speech.
    pub fn is_silent(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The dialogue engine's decision for one turn.
///
/// Invariant: a non-terminal outcome always carries non-empty `spoken_text`.
/// `audio_ref`, when present, is a full retrieval URL for a synthesized
/// artifact; adapters must prefer playing it and fall back to provider-native
/// speech of `spoken_text` when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// The text to speak to the caller this turn.
    pub spoken_text: String,
    /// URL of the synthesized audio for `spoken_text`, if synthesis succeeded.
    pub audio_ref: Option<String>,
    /// Whether the call should be hung up after speaking.
    pub should_terminate: bool,
}

impl TurnOutcome {
    /// A non-terminal outcome that keeps the call listening.
    pub fn speak(spoken_text: impl Into<String>) -> Self {
        Self {
            spoken_text: spoken_text.into(),
            audio_ref: None,
            should_terminate: false,
        }
    }

    /// A terminal outcome: speak, then hang up.
    pub fn farewell(spoken_text: impl Into<String>) -> Self {
        Self {
            spoken_text: spoken_text.into(),
            audio_ref: None,
            should_terminate: true,
        }
    }

    pub fn with_audio_ref(mut self, audio_ref: impl Into<String>) -> Self {
        self.audio_ref = Some(audio_ref.into());
        self
    }
}
