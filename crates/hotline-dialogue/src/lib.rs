//! Dialogue turn engine for the hotline platform.
//!
//! Given one caller utterance (or none), decides the next spoken output and
//! whether the call should end, then tries to synthesize that output into an
//! audio artifact. The engine is provider-agnostic: it knows nothing about
//! TwiML or verb documents, only [`Utterance`] in and [`TurnOutcome`] out.
//!
//! Every turn is processed independently. No conversation history is
//! accumulated across turns and no repeated-silence escalation is tracked;
//! callers that need either must key it on the provider's call id themselves.

pub mod engine;

pub use engine::{TurnEngine, APOLOGY_TEXT, FAREWELL_TEXT, GREETING_TEXT, REPROMPT_TEXT};
