//! Hotline server binary — the main entry point for the AI hotline.
//!
//! Starts an axum HTTP server with structured logging, backend client
//! construction, the background artifact sweep, and graceful shutdown on
//! SIGTERM/SIGINT.

use hotline_backend::{ResponderBackend, ResponderClient, SynthesisClient};
use hotline_dialogue::TurnEngine;
use hotline_providers::{JambonzAdapter, TwimlAdapter};
use hotline_server::{app, background, config, AppState};
use hotline_store::ArtifactStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("HOTLINE_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — the server cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // Open the artifact store
    let store = Arc::new(
        ArtifactStore::new(&config.audio.dir)
            .expect("failed to open audio artifact directory — check audio.dir in config"),
    );

    // Construct long-lived backend clients once; they are shared across all
    // webhook invocations rather than created lazily per request.
    let responder_backend = if config.backends.workflow_flow_id.is_empty() {
        ResponderBackend::Direct
    } else {
        ResponderBackend::Workflow {
            flow_id: config.backends.workflow_flow_id.clone(),
        }
    };
    let responder_url = match &responder_backend {
        ResponderBackend::Direct => config.backends.llm_url.clone(),
        ResponderBackend::Workflow { .. } => config.backends.workflow_url.clone(),
    };
    let responder = Arc::new(ResponderClient::new(responder_url, responder_backend));
    let synthesizer = Arc::new(SynthesisClient::new(config.backends.tts_url.clone()));

    let engine = TurnEngine::new(
        responder,
        synthesizer,
        store.clone(),
        config.server.public_url.clone(),
        config.dialogue.persona.clone(),
    );

    let state = AppState {
        engine,
        store: store.clone(),
        twiml: TwimlAdapter::new(config.server.public_url.clone()),
        jambonz: JambonzAdapter::new(config.server.public_url.clone()),
        backends: config.backends.clone(),
    };

    // Start the artifact sweep
    tokio::spawn(background::start_artifact_sweep_task(
        store,
        config.audio.ttl_seconds,
    ));

    // Build application
    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(
        %addr,
        public_url = %config.server.public_url,
        tts = %config.backends.tts_url,
        asr = %config.backends.asr_url,
        llm = %config.backends.llm_url,
        "starting hotline server"
    );

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address — is another process using this port?");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("hotline server shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
