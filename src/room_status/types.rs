//! Request/response shapes for the room status endpoints

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::status::RoomStatus;

/// Room identifier
pub type RoomId = i64;

/// Default number of entries returned by the recent-logs endpoint
pub const DEFAULT_RECENT_LOG_LIMIT: u32 = 10;

// ============================================================================
// Status Update
// ============================================================================

/// Body of `PUT /api/v1/rooms/{roomId}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatusUpdateRequest {
    pub status: RoomStatus,
    pub reason: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,

    /// Version the client last observed; the server rejects the write on mismatch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl RoomStatusUpdateRequest {
    /// Create an update request
    pub fn new(status: RoomStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            order_id: None,
            expected_version: None,
        }
    }

    /// Attach the order that caused the change
    pub fn with_order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Enable the optimistic version check
    pub fn with_expected_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// Server answer to a status update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatusUpdateResponse {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    /// Structured error code, normalized to a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Version mismatch reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatusConflict {
    pub room_id: RoomId,
    pub expected_version: u64,
    pub actual_version: u64,
    pub message: String,
}

/// Result of an update: either applied, or a conflict to refresh and retry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<RoomStatusConflict>,
}

impl UpdateOutcome {
    /// The server accepted the update
    pub fn applied() -> Self {
        Self {
            success: true,
            conflict: None,
        }
    }

    /// The server rejected the update on a version mismatch
    pub fn conflicted(conflict: RoomStatusConflict) -> Self {
        Self {
            success: false,
            conflict: Some(conflict),
        }
    }

    /// Whether a refresh-and-retry is needed
    pub fn is_conflict(&self) -> bool {
        self.conflict.is_some()
    }
}

// ============================================================================
// Status Logs
// ============================================================================

/// Append-only record of a status change, owned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatusLog {
    pub id: i64,
    pub room_id: RoomId,

    /// Absent on the log entry created with the room
    #[serde(default)]
    pub old_status: Option<RoomStatus>,

    pub new_status: RoomStatus,

    #[serde(default)]
    pub reason: String,

    #[serde(default)]
    pub changed_by: String,

    #[serde(default)]
    pub order_id: Option<i64>,

    pub created_at: DateTime<Utc>,
}

/// Query for `GET /api/v1/rooms/{roomId}/status/logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLogQuery {
    pub page: u32,
    pub size: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Default for StatusLogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 20,
            start_date: None,
            end_date: None,
        }
    }
}

impl StatusLogQuery {
    /// Query a specific page
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Default::default()
        }
    }

    /// Restrict to a date range (inclusive)
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

// ============================================================================
// Availability
// ============================================================================

/// Body of `POST /api/v1/rooms/availability/check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheckRequest {
    pub room_ids: Vec<RoomId>,
}
