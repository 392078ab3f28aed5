//! Error scenario integration tests
//!
//! Tests various failure modes and error handling:
//! 1. Network timeouts
//! 2. HTTP error responses (404, 503, etc.)
//! 3. Malformed and incomplete bodies
//! 4. Retry logic for reads, single attempt for writes

use roomdesk::transport::TransportError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{client_with_retries, AVAILABLE_ENVELOPE, EMPTY_ENVELOPE, MALFORMED_BODY};

// ============================================================================
// Network Error Tests
// ============================================================================

#[tokio::test]
async fn test_timeout_handling() {
    let mock_server = MockServer::start().await;

    // Mock with long delay to trigger timeout
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(AVAILABLE_ENVELOPE)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 0);
    let result: Result<bool, _> = client.get("/api/v1/rooms/1/available").await;

    match result {
        Err(e @ TransportError::Network(_)) => assert!(e.is_recoverable()),
        other => panic!("Expected network error, got {other:?}"),
    }
}

// ============================================================================
// HTTP Error Tests
// ============================================================================

#[tokio::test]
async fn test_404_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/999/available"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"success": false, "message": "Room not found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 3);
    let err = client
        .get::<bool>("/api/v1/rooms/999/available")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.server_message(), Some("Room not found"));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_read_retried_until_success() {
    let mock_server = MockServer::start().await;

    // First two attempts fail with 503
    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/1/available"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/rooms/1/available"))
        .respond_with(ResponseTemplate::new(200).set_body_string(AVAILABLE_ENVELOPE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 2);
    let available: bool = client.get("/api/v1/rooms/1/available").await.unwrap();
    assert!(available);
}

#[tokio::test]
async fn test_read_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 2);
    let err = client
        .get::<bool>("/api/v1/rooms/1/available")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.server_message(), Some("Service Unavailable"));
}

#[tokio::test]
async fn test_write_is_sent_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/booking-conflicts/cleanup-expired"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 5);
    let result: Result<serde_json::Value, _> = client
        .post_empty("/v1/booking-conflicts/cleanup-expired")
        .await;

    assert_eq!(result.unwrap_err().status(), Some(503));
}

// ============================================================================
// Body Decoding Tests
// ============================================================================

#[tokio::test]
async fn test_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MALFORMED_BODY))
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 0);
    let result = client.get::<bool>("/api/v1/rooms/1/available").await;

    assert!(matches!(result, Err(TransportError::Parse(_))));
}

#[tokio::test]
async fn test_envelope_without_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_ENVELOPE))
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 0);
    let result = client.get::<bool>("/api/v1/rooms/1/available").await;

    assert!(matches!(result, Err(TransportError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_success_false_is_rejected_with_numeric_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Room is locked",
            "code": 423
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_retries(&mock_server, 0);
    let err = client
        .get::<bool>("/api/v1/rooms/1/available")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::Rejected {
            message: "Room is locked".to_string(),
            code: Some("423".to_string()),
        }
    );
}
