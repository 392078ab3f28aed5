//! Common test utilities

use std::sync::Arc;
use std::time::Duration;

use roomdesk::booking_conflict::BookingConflictClient;
use roomdesk::room_status::{RoomStatusClient, RoomStatusCoordinator};
use roomdesk::transport::{ApiClient, ClientConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client config pointed at a mock server, with fast retries
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri())
        .with_timeout(Duration::from_secs(2))
        .with_retry_count(2)
        .with_retry_delay(Duration::from_millis(10))
}

/// Shared API client for a mock server
pub fn api_client(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(test_config(server)).unwrap())
}

/// Coordinator backed by the HTTP client
#[allow(dead_code)]
pub fn coordinator(server: &MockServer) -> RoomStatusCoordinator {
    RoomStatusCoordinator::new(Arc::new(RoomStatusClient::new(api_client(server))))
}

/// Booking conflict client for a mock server
#[allow(dead_code)]
pub fn booking_client(server: &MockServer) -> BookingConflictClient {
    BookingConflictClient::new(api_client(server))
}

/// Successful envelope
pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Failed envelope
#[allow(dead_code)]
pub fn failure(message: &str, code: Option<&str>) -> Value {
    match code {
        Some(code) => json!({ "success": false, "message": message, "code": code }),
        None => json!({ "success": false, "message": message }),
    }
}

/// Status log entry as the server serializes it
#[allow(dead_code)]
pub fn status_log(id: i64, room_id: i64, old: Option<&str>, new: &str) -> Value {
    json!({
        "id": id,
        "roomId": room_id,
        "oldStatus": old,
        "newStatus": new,
        "reason": "front desk",
        "changedBy": "desk01",
        "createdAt": format!("2026-10-17T08:{:02}:00Z", id % 60)
    })
}

/// Waiting-list entry as the server serializes it
#[allow(dead_code)]
pub fn waiting_entry(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "roomId": 12,
        "userId": 99,
        "checkInDate": "2026-11-01",
        "checkOutDate": "2026-11-04",
        "status": status,
        "priority": 0,
        "createdAt": "2026-10-17T09:00:00Z"
    })
}
