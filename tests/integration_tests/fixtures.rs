//! Test fixtures for integration tests
//!
//! Canned platform responses shared by the scenario tests

use std::time::Duration;

use roomdesk::transport::{ApiClient, ClientConfig};
use wiremock::MockServer;

/// Envelope reporting a single available room
pub const AVAILABLE_ENVELOPE: &str = r#"{"success":true,"data":true}"#;

/// Body that is not JSON at all
pub const MALFORMED_BODY: &str = "<html><body>502 Bad Gateway</body></html>";

/// Envelope that decodes but carries no data
pub const EMPTY_ENVELOPE: &str = r#"{"success":true}"#;

/// Recent-log envelope for room 21 with a single baseline entry
pub const BASELINE_LOGS: &str = r#"{
    "success": true,
    "data": [
        {"id": 100, "roomId": 21, "oldStatus": "CLEANING", "newStatus": "AVAILABLE",
         "reason": "cleaned", "changedBy": "hk02", "createdAt": "2026-10-17T07:00:00Z"}
    ]
}"#;

/// Recent-log envelope for room 21 after two further changes
pub const UPDATED_LOGS: &str = r#"{
    "success": true,
    "data": [
        {"id": 102, "roomId": 21, "oldStatus": "OCCUPIED", "newStatus": "CLEANING",
         "reason": "check-out", "changedBy": "desk01", "createdAt": "2026-10-17T11:00:00Z"},
        {"id": 101, "roomId": 21, "oldStatus": "AVAILABLE", "newStatus": "OCCUPIED",
         "reason": "check-in", "changedBy": "desk01", "orderId": 5001,
         "createdAt": "2026-10-17T08:00:00Z"},
        {"id": 100, "roomId": 21, "oldStatus": "CLEANING", "newStatus": "AVAILABLE",
         "reason": "cleaned", "changedBy": "hk02", "createdAt": "2026-10-17T07:00:00Z"}
    ]
}"#;

/// Client with the given retry count and a short timeout
pub fn client_with_retries(server: &MockServer, retries: u32) -> ApiClient {
    ApiClient::new(
        ClientConfig::new(server.uri())
            .with_timeout(Duration::from_millis(200))
            .with_retry_count(retries)
            .with_retry_delay(Duration::from_millis(5)),
    )
    .unwrap()
}
