//! Mock HTTP tests for GeneratorClient.
//!
//! These tests cover:
//! - Request body formatting on the wire
//! - Success response parsing
//! - Rejection and transport error classification
//! - User-facing error messages
//! - Health checks and video downloads
//!
//! Unit tests for response types and error display live next to the
//! client itself; everything here goes through a real HTTP round trip
//! against a mock server.

use vidgen::api::{ApiError, GeneratorClient, DEFAULT_ERROR_MESSAGE};
use vidgen::video_config::{AnimationType, MusicStyle, VideoConfig};

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// === Generation Request Tests ===

#[tokio::test]
async fn test_generate_sends_wire_body_and_parses_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(serde_json::json!({
            "animation_type": "fractal",
            "duration": 45,
            "music_style": "lofi"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_id": "abc123",
            "status": "queued",
            "message": "Video generation started",
            "video_url": "http://localhost:8000/videos/abc123.mp4"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let config = VideoConfig::with_values(AnimationType::Fractal, 45, MusicStyle::Lofi);
    let result = client.generate(&config).await;

    let job = result.unwrap();
    assert_eq!(job.job_id, "abc123");
    assert_eq!(job.message, "Video generation started");
    assert_eq!(
        job.video_url,
        Some("http://localhost:8000/videos/abc123.mp4".to_string())
    );
    assert_eq!(job.download_name(), "video_abc123.mp4");
}

#[tokio::test]
async fn test_generate_sends_default_config_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(serde_json::json!({
            "animation_type": "surprise",
            "duration": 30,
            "music_style": "electro"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_id": "job-1",
            "message": "Video generation started"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client.generate(&VideoConfig::new()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_generate_success_without_video_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_id": "xyz789",
            "status": "queued",
            "message": "Video queued"
        })))
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let job = client.generate(&VideoConfig::new()).await.unwrap();

    assert_eq!(job.job_id, "xyz789");
    assert_eq!(job.video_url, None);
    // Without a URL the suggested filename falls back to mp4
    assert_eq!(job.download_name(), "video_xyz789.mp4");
}

// === Error Handling Tests ===

#[tokio::test]
async fn test_generate_rejection_carries_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"detail": "quota exceeded"})),
        )
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client.generate(&VideoConfig::new()).await;

    match result {
        Err(ApiError::Rejected { status, detail }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(detail, Some("quota exceeded".to_string()));
        }
        other => panic!("Expected Rejected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_rejection_detail_is_user_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "duration out of range"})),
        )
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let err = client.generate(&VideoConfig::new()).await.unwrap_err();

    assert_eq!(err.user_message(), "duration out of range");
}

#[tokio::test]
async fn test_generate_rejection_with_unparseable_body_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client.generate(&VideoConfig::new()).await;

    match result {
        Err(ApiError::Rejected { status, detail }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(detail, None);
        }
        other => panic!("Expected Rejected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_rejection_without_detail_field_falls_back() {
    let mock_server = MockServer::start().await;

    // Valid JSON, but no "detail" key
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"error": "overloaded"})),
        )
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let err = client.generate(&VideoConfig::new()).await.unwrap_err();

    assert_eq!(err.user_message(), DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_generate_transport_error_is_http() {
    // Bind a port, then free it so the connection is refused.
    // Uses a non-pooled server: dropping a pooled `MockServer::start()`
    // instance returns it to wiremock's pool with the listener still
    // alive, so the port would keep answering 404 instead of refusing.
    let mock_server = MockServer::builder().start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = GeneratorClient::with_base_url(uri).unwrap();
    let result = client.generate(&VideoConfig::new()).await;

    match result {
        Err(ApiError::Http(_)) => {}
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_transport_error_uses_generic_message() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = GeneratorClient::with_base_url(uri).unwrap();
    let err = client.generate(&VideoConfig::new()).await.unwrap_err();

    assert_eq!(err.user_message(), DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_generate_malformed_success_body_is_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client.generate(&VideoConfig::new()).await;

    assert!(matches!(result, Err(ApiError::Http(_))));
}

#[tokio::test]
async fn test_generate_success_body_missing_fields_is_http() {
    let mock_server = MockServer::start().await;

    // 2xx with a JSON object that lacks the required fields
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client.generate(&VideoConfig::new()).await;

    assert!(matches!(result, Err(ApiError::Http(_))));
}

// === Health Check Tests ===

#[tokio::test]
async fn test_health_parses_ok_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let health = client.health().await.unwrap();

    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_health_unreachable_server_is_http() {
    // Non-pooled server so dropping it actually frees the port
    let mock_server = MockServer::builder().start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = GeneratorClient::with_base_url(uri).unwrap();
    let result = client.health().await;

    assert!(matches!(result, Err(ApiError::Http(_))));
}

#[tokio::test]
async fn test_health_non_success_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({"detail": "starting up"})),
        )
        .mount(&mock_server)
        .await;

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client.health().await;

    match result {
        Err(ApiError::Rejected { status, detail }) => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(detail, Some("starting up".to_string()));
        }
        other => panic!("Expected Rejected error, got {:?}", other),
    }
}

// === Download Tests ===

#[tokio::test]
async fn test_download_video_writes_streamed_bytes() {
    let mock_server = MockServer::start().await;
    let video_bytes: Vec<u8> = vec![0x00, 0x00, 0x00, 0x18, 0x66, 0x74, 0x79, 0x70];

    Mock::given(method("GET"))
        .and(path("/videos/abc123.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(video_bytes.clone()))
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let dest = temp_dir.path().join("video_abc123.mp4");

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let written = client
        .download_video(&format!("{}/videos/abc123.mp4", mock_server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(written, video_bytes.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), video_bytes);
}

#[tokio::test]
async fn test_download_video_creates_parent_dirs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/clip.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let dest = temp_dir.path().join("nested").join("dir").join("clip.webm");
    assert!(!dest.parent().unwrap().exists());

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client
        .download_video(&format!("{}/videos/clip.webm", mock_server.uri()), &dest)
        .await;

    assert!(result.is_ok());
    assert!(dest.exists());
}

#[tokio::test]
async fn test_download_video_404_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/missing.mp4"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Video not found"))
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let dest = temp_dir.path().join("missing.mp4");

    let client = GeneratorClient::with_base_url(mock_server.uri()).unwrap();
    let result = client
        .download_video(&format!("{}/videos/missing.mp4", mock_server.uri()), &dest)
        .await;

    match result {
        Err(ApiError::Rejected { status, .. }) => {
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("Expected Rejected error, got {:?}", other),
    }
    // Nothing should have been written for a rejected download
    assert!(!dest.exists());
}
