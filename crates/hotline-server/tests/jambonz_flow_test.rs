use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use hotline_backend::{ResponderBackend, ResponderClient, SynthesisClient};
use hotline_dialogue::TurnEngine;
use hotline_providers::{JambonzAdapter, TwimlAdapter};
use hotline_server::{app, config::BackendsConfig, AppState};
use hotline_store::ArtifactStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const PUBLIC_URL: &str = "http://hotline.example";

async fn spawn_backends() -> String {
    let router = Router::new()
        .route("/tts", post(|| async { b"RIFFstub-wav".to_vec() }))
        .route(
            "/api/generate",
            post(|| async { Json(json!({ "response": "Happy to help." })) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn setup_app(responder_url: &str, synth_url: &str) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(ArtifactStore::new(dir.path()).unwrap());

    let engine = TurnEngine::new(
        Arc::new(ResponderClient::new(responder_url, ResponderBackend::Direct)),
        Arc::new(SynthesisClient::new(synth_url)),
        store.clone(),
        PUBLIC_URL,
        "You are a helpful AI voice assistant.",
    );

    let state = AppState {
        engine,
        store,
        twiml: TwimlAdapter::new(PUBLIC_URL),
        jambonz: JambonzAdapter::new(PUBLIC_URL),
        backends: BackendsConfig::default(),
    };

    (app(state), dir)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Vec<Value>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let verbs: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    (status, verbs)
}

fn speech_payload(transcript: &str) -> Value {
    json!({
        "call_sid": "jb-1",
        "speech": { "alternatives": [{ "transcript": transcript }] }
    })
}

#[tokio::test]
async fn jambonz_webhook_greets_and_gathers() {
    let base = spawn_backends().await;
    let (app, _dir) = setup_app(&base, &base);

    let (status, verbs) = post_json(
        &app,
        "/jambonz",
        json!({ "call_sid": "jb-1", "from": "+15550001111" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(verbs[0]["verb"], "play");
    assert!(verbs[0]["url"]
        .as_str()
        .unwrap()
        .starts_with("http://hotline.example/audio/"));
    assert_eq!(verbs[1]["verb"], "gather");
    assert_eq!(verbs[1]["actionHook"], "http://hotline.example/jambonz-gather");
    assert_eq!(verbs.last().unwrap()["verb"], "hangup");
}

#[tokio::test]
async fn jambonz_gather_answers_and_regathers() {
    let base = spawn_backends().await;
    let (app, _dir) = setup_app(&base, &base);

    let (status, verbs) = post_json(&app, "/jambonz-gather", speech_payload("what can you do")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(verbs.len(), 4);
    assert_eq!(verbs[0]["verb"], "play");
    assert_eq!(verbs[1]["verb"], "gather");
    assert_eq!(verbs[2]["verb"], "say");
    assert_eq!(verbs[2]["text"], "Are you still there?");
    assert_eq!(verbs[3]["verb"], "hangup");
}

#[tokio::test]
async fn jambonz_gather_goodbye_hangs_up() {
    let base = spawn_backends().await;
    let (app, _dir) = setup_app(&base, &base);

    let (status, verbs) = post_json(&app, "/jambonz-gather", speech_payload("goodbye then")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(verbs.len(), 2);
    assert_eq!(verbs[0]["verb"], "play");
    assert_eq!(verbs[1]["verb"], "hangup");
}

#[tokio::test]
async fn jambonz_gather_empty_speech_reprompts() {
    let base = spawn_backends().await;
    let (app, _dir) = setup_app(&base, &base);

    let (status, verbs) = post_json(&app, "/jambonz-gather", speech_payload("")).await;

    assert_eq!(status, StatusCode::OK);
    // The re-prompt skips synthesis, so it arrives as a say verb.
    assert_eq!(verbs[0]["verb"], "say");
    assert_eq!(verbs[0]["text"], "I didn't catch that, could you repeat?");
    assert_eq!(verbs[1]["verb"], "gather");
    assert_eq!(verbs.last().unwrap()["verb"], "hangup");
}

// A body that is not JSON still gets a well-formed verb document.
#[tokio::test]
async fn jambonz_malformed_body_still_gets_document() {
    let base = spawn_backends().await;
    let (app, _dir) = setup_app(&base, &base);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/jambonz-gather")
                .header("content-type", "application/json")
                .body(Body::from("not json at all"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let verbs: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(verbs[0]["verb"], "say");
    assert_eq!(verbs.last().unwrap()["verb"], "hangup");
}

#[tokio::test]
async fn jambonz_synthesis_outage_falls_back_to_say() {
    let base = spawn_backends().await;
    let (app, _dir) = setup_app(&base, "http://127.0.0.1:9");

    let (status, verbs) = post_json(&app, "/jambonz-gather", speech_payload("hello there")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(verbs[0]["verb"], "say");
    assert_eq!(verbs[0]["text"], "Happy to help.");
    assert_eq!(verbs[0]["synthesizer"]["vendor"], "google");
}
