//! Backend HTTP clients for the hotline platform.
//!
//! Three thin request/response adapters over services reached purely over
//! HTTP: speech synthesis, speech recognition, and a language-model
//! responder. Each client wraps one outbound call with a bounded timeout and
//! converts any transport- or status-level failure into a typed
//! [`BackendError`] instead of propagating raw transport errors.
//!
//! Clients never retry internally; retry policy, if any, belongs to the
//! caller. In practice each failure is handled once at the call site via the
//! dialogue engine's fallback paths.

pub mod asr;
pub mod error;
pub mod responder;
pub mod tts;

pub use asr::TranscriptionClient;
pub use error::BackendError;
pub use responder::{ResponderBackend, ResponderClient};
pub use tts::SynthesisClient;
