//! Jambonz webhook handlers (JSON verb responses).

use crate::AppState;
use axum::{body::Bytes, extract::Extension, Json};
use hotline_providers::{JambonzWebhook, ProviderAdapter, Verb};
use std::sync::Arc;

/// Decodes the inbound body, tolerating absent or malformed JSON.
///
/// Jambonz must receive a verb document on every response, so a body that
/// fails to parse is treated as an empty payload rather than rejected.
fn decode_body(body: &Bytes) -> JambonzWebhook {
    serde_json::from_slice(body).unwrap_or_default()
}

/// Handler for `POST /jambonz` — called when a call arrives via Jambonz.
pub async fn call_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Json<Vec<Verb>> {
    let webhook = decode_body(&body);
    tracing::info!(
        call_sid = webhook.call_sid.as_deref().unwrap_or("unknown"),
        from = webhook.from.as_deref().unwrap_or("unknown"),
        "incoming jambonz call"
    );

    let outcome = state.engine.greeting().await;
    Json(state.jambonz.encode_greeting(&outcome))
}

/// Handler for `POST /jambonz-gather` — speech input from the gather verb.
pub async fn gather_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Json<Vec<Verb>> {
    let webhook = decode_body(&body);
    let utterance = state.jambonz.decode_inbound(&webhook);
    tracing::info!(call_sid = %utterance.call_id, text = %utterance.text, "jambonz speech input");

    let outcome = state.engine.process_turn(&utterance).await;
    Json(state.jambonz.encode_turn_outcome(&outcome))
}
