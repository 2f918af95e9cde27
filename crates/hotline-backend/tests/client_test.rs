use axum::{routing::post, Json, Router};
use hotline_backend::{BackendError, ResponderBackend, ResponderClient, SynthesisClient};
use serde_json::{json, Value};

/// Spawns a stub backend service on an ephemeral port and returns its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn synthesis_returns_wav_bytes() {
    let router = Router::new().route(
        "/tts",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["text"], "hello caller");
            assert_eq!(body["language"], "en");
            b"RIFFfake-wav".to_vec()
        }),
    );
    let base = spawn_stub(router).await;

    let client = SynthesisClient::new(base);
    let bytes = client.synthesize("hello caller", "en").await.unwrap();
    assert_eq!(bytes, b"RIFFfake-wav");
}

#[tokio::test]
async fn synthesis_maps_server_error_to_unavailable() {
    let router = Router::new().route(
        "/tts",
        post(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_stub(router).await;

    let client = SynthesisClient::new(base);
    let result = client.synthesize("hello", "en").await;
    assert!(matches!(result, Err(BackendError::Unavailable(_))));
}

#[tokio::test]
async fn synthesis_maps_connection_refused_to_unavailable() {
    // Port 9 (discard) is not listening locally; the connection fails fast.
    let client = SynthesisClient::new("http://127.0.0.1:9");
    let result = client.synthesize("hello", "en").await;
    assert!(matches!(result, Err(BackendError::Unavailable(_))));
}

#[tokio::test]
async fn direct_responder_extracts_response_field() {
    let router = Router::new().route(
        "/api/generate",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["model"], "llama3.1:8b");
            assert_eq!(body["stream"], false);
            let prompt = body["prompt"].as_str().unwrap();
            assert!(prompt.contains("You are a test persona."));
            assert!(prompt.contains("User: what's the weather"));
            Json(json!({ "response": " It's sunny today. " }))
        }),
    );
    let base = spawn_stub(router).await;

    let client = ResponderClient::new(base, ResponderBackend::Direct);
    let reply = client
        .respond("what's the weather", "You are a test persona.", None)
        .await
        .unwrap();
    assert_eq!(reply, "It's sunny today.");
}

#[tokio::test]
async fn direct_responder_threads_history_into_prompt() {
    let router = Router::new().route(
        "/api/generate",
        post(|Json(body): Json<Value>| async move {
            let prompt = body["prompt"].as_str().unwrap();
            assert!(prompt.contains("User: hi\nAssistant: hello"));
            Json(json!({ "response": "again" }))
        }),
    );
    let base = spawn_stub(router).await;

    let client = ResponderClient::new(base, ResponderBackend::Direct);
    let history = vec![("hi".to_string(), "hello".to_string())];
    let reply = client
        .respond("hi again", "persona", Some(&history))
        .await
        .unwrap();
    assert_eq!(reply, "again");
}

#[tokio::test]
async fn workflow_responder_extracts_nested_text() {
    let router = Router::new().route(
        "/api/v1/run/{flow_id}",
        post(
            |axum::extract::Path(flow_id): axum::extract::Path<String>,
             Json(body): Json<Value>| async move {
                assert_eq!(flow_id, "flow-123");
                assert_eq!(body["input_value"], "hello");
                assert_eq!(body["output_type"], "chat");
                Json(json!({
                    "outputs": [{
                        "outputs": [{
                            "results": { "message": { "text": "workflow reply" } }
                        }]
                    }]
                }))
            },
        ),
    );
    let base = spawn_stub(router).await;

    let client = ResponderClient::new(
        base,
        ResponderBackend::Workflow {
            flow_id: "flow-123".to_string(),
        },
    );
    let reply = client.respond("hello", "persona", None).await.unwrap();
    assert_eq!(reply, "workflow reply");
}

#[tokio::test]
async fn workflow_responder_rejects_unparseable_reply() {
    let router = Router::new().route(
        "/api/v1/run/{flow_id}",
        post(|| async { Json(json!({ "outputs": [] })) }),
    );
    let base = spawn_stub(router).await;

    let client = ResponderClient::new(
        base,
        ResponderBackend::Workflow {
            flow_id: "flow-123".to_string(),
        },
    );
    let result = client.respond("hello", "persona", None).await;
    assert!(matches!(result, Err(BackendError::Malformed(_))));
}
