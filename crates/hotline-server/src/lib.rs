//! Hotline server library logic.
//!
//! Webhook-driven controller for the AI hotline: receives call events from
//! two telephony providers (Twilio's XML markup, Jambonz's JSON verbs),
//! drives each call through a greet → listen → respond → speak cycle via the
//! dialogue turn engine, and serves the synthesized audio artifacts back to
//! the providers.

pub mod api_audio;
pub mod api_jambonz;
pub mod api_twilio;
pub mod background;
pub mod config;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use hotline_dialogue::TurnEngine;
use hotline_providers::{JambonzAdapter, TwimlAdapter};
use hotline_store::ArtifactStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dialogue turn engine with its long-lived backend clients.
    pub engine: TurnEngine,
    /// Audio artifact store, shared with the engine.
    pub store: Arc<ArtifactStore>,
    /// Twilio adapter.
    pub twiml: TwimlAdapter,
    /// Jambonz adapter.
    pub jambonz: JambonzAdapter,
    /// Backend endpoint configuration, reported by the health endpoint.
    pub backends: config::BackendsConfig,
}

/// Health check handler.
///
/// Returns `200 OK` with server status and the configured backend endpoints,
/// so an operator can see at a glance where calls will be routed.
async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let workflow = if state.backends.workflow_flow_id.is_empty() {
        json!("not configured")
    } else {
        json!(state.backends.workflow_url)
    };
    Json(json!({
        "status": "ok",
        "service": "hotline-server",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "tts": state.backends.tts_url,
            "asr": state.backends.asr_url,
            "llm": state.backends.llm_url,
            "workflow": workflow,
        }
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    // Telephony providers fetch webhooks and audio from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/voice", post(api_twilio::voice_handler))
        .route("/gather", post(api_twilio::gather_handler))
        .route("/jambonz", post(api_jambonz::call_handler))
        .route("/jambonz-gather", post(api_jambonz::gather_handler))
        .route("/audio/{filename}", get(api_audio::audio_handler))
        .layer(Extension(Arc::new(state)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
