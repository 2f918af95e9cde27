//! Twilio webhook handlers (TwiML responses).

use crate::AppState;
use axum::{
    body::Bytes,
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
};
use hotline_providers::{ProviderAdapter, TwilioWebhook};
use std::sync::Arc;

/// Wraps a TwiML document in a `text/xml` response.
fn twiml(document: String) -> Response {
    ([(header::CONTENT_TYPE, "text/xml")], document).into_response()
}

/// Decodes the inbound form body, tolerating absent or malformed payloads.
///
/// Twilio must receive a TwiML document on every response, so a body that
/// fails to parse (or arrives without the urlencoded content-type) is
/// treated as an empty payload rather than rejected.
fn decode_body(body: &Bytes) -> TwilioWebhook {
    serde_urlencoded::from_bytes(body).unwrap_or_default()
}

/// Handler for `POST /voice` — called when someone dials the number.
///
/// Greets the caller and gathers the first speech input.
pub async fn voice_handler(Extension(state): Extension<Arc<AppState>>, body: Bytes) -> Response {
    let webhook = decode_body(&body);
    tracing::info!(
        call_sid = webhook.call_sid.as_deref().unwrap_or("unknown"),
        from = webhook.from.as_deref().unwrap_or("unknown"),
        "incoming twilio call"
    );

    let outcome = state.engine.greeting().await;
    twiml(state.twiml.encode_greeting(&outcome))
}

/// Handler for `POST /gather` — speech input from Twilio's `<Gather>`.
///
/// Always answers with a well-formed TwiML document; a missing or empty
/// transcript is handled as silence by the turn engine, never as a protocol
/// error.
pub async fn gather_handler(Extension(state): Extension<Arc<AppState>>, body: Bytes) -> Response {
    let webhook = decode_body(&body);
    let utterance = state.twiml.decode_inbound(&webhook);
    tracing::info!(call_sid = %utterance.call_id, text = %utterance.text, "twilio speech input");

    let outcome = state.engine.process_turn(&utterance).await;
    twiml(state.twiml.encode_turn_outcome(&outcome))
}
