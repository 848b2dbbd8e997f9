use std::time::Duration;

use pretty_assertions::assert_eq;
use quickdocs_engine::{
    FailureKind, FileUpload, ReqwestTransport, TextRoute, Transport, TransportSettings,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(settings: TransportSettings) -> ReqwestTransport {
    ReqwestTransport::new(settings).expect("client")
}

#[tokio::test]
async fn chat_posts_query_and_parses_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_string_contains("name=\"query\""))
        .and(body_string_contains("What is the refund policy?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "30 days",
            "sources": [{"source": "policy.pdf", "file_type": "pdf", "similarity_score": 0.92}],
            "confidence": "high"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = transport(TransportSettings::default())
        .chat(&server.uri(), "What is the refund policy?")
        .await
        .expect("chat ok");

    assert_eq!(reply.response, "30 days");
    assert_eq!(reply.sources.len(), 1);
    assert_eq!(reply.sources[0].source, "policy.pdf");
    assert_eq!(reply.sources[0].similarity_score, 0.92);
    assert_eq!(reply.confidence.as_deref(), Some("high"));
}

#[tokio::test]
async fn chat_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"response": "Please upload documents first"})),
        )
        .mount(&server)
        .await;

    let err = transport(TransportSettings::default())
        .chat(&server.uri(), "hi")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Application { status: 400 });
    assert_eq!(err.message, "Please upload documents first");
}

#[tokio::test]
async fn upload_file_sends_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-file"))
        .and(body_string_contains("name=\"file\"; filename=\"notes.txt\""))
        .and(body_string_contains("hello upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "File processed successfully",
            "filename": "notes.txt",
            "chunks_count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = transport(TransportSettings::default())
        .upload_file(
            &server.uri(),
            FileUpload {
                filename: "notes.txt".to_string(),
                bytes: b"hello upload".to_vec(),
            },
        )
        .await
        .expect("upload ok");

    assert_eq!(reply.filename.as_deref(), Some("notes.txt"));
    assert_eq!(reply.chunks_count, 2);
}

#[tokio::test]
async fn upload_text_uses_configured_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-cms"))
        .and(body_string_contains("name=\"content\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "ok", "chunks_count": 3})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload-file"))
        .and(body_string_contains("name=\"content\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "ok", "chunks_count": 5})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cms = transport(TransportSettings::default())
        .upload_text(&server.uri(), "Hello world")
        .await
        .expect("cms upload");
    assert_eq!(cms.chunks_count, 3);

    let generic = transport(TransportSettings {
        text_route: TextRoute::FileEndpoint,
        ..TransportSettings::default()
    })
    .upload_text(&server.uri(), "Hello world")
    .await
    .expect("generic upload");
    assert_eq!(generic.chunks_count, 5);
}

#[tokio::test]
async fn upload_failure_uses_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-cms"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "Embedding failed"})),
        )
        .mount(&server)
        .await;

    let err = transport(TransportSettings::default())
        .upload_text(&server.uri(), "text")
        .await
        .unwrap_err();

    assert!(err.is_application());
    assert_eq!(err.message, "Embedding failed");
}

#[tokio::test]
async fn status_reads_document_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "running",
            "total_documents": 42
        })))
        .mount(&server)
        .await;

    let status = transport(TransportSettings::default())
        .probe_status(&format!("{}/", server.uri()))
        .await
        .expect("status ok");

    assert_eq!(status.total_documents, 42);
}

#[tokio::test]
async fn malformed_success_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>tunnel offline</html>"))
        .mount(&server)
        .await;

    let err = transport(TransportSettings::default())
        .probe_status(&server.uri())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedPayload);
    assert!(!err.is_application());
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(serde_json::json!({"response": "late"})),
        )
        .mount(&server)
        .await;

    let settings = TransportSettings {
        request_timeout: Duration::from_millis(50),
        ..TransportSettings::default()
    };
    let err = transport(settings)
        .chat(&server.uri(), "hi")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let settings = TransportSettings {
        connect_timeout: Duration::from_millis(500),
        status_timeout: Duration::from_secs(2),
        ..TransportSettings::default()
    };
    let err = transport(settings)
        .probe_status("http://127.0.0.1:9")
        .await
        .unwrap_err();

    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
