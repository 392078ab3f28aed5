//! Request/response shapes for the booking conflict endpoints
//!
//! Conflict detection, waiting-list ordering and promotion all happen on
//! the server. These types only carry its inputs and answers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::room_status::RoomId;

/// User identifier
pub type UserId = i64;

// ============================================================================
// Conflict Detection
// ============================================================================

/// Body of `POST /v1/booking-conflicts/detect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetectionRequest {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

impl ConflictDetectionRequest {
    /// Nights covered by the stay
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

/// Server verdict for a requested stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetectionResult {
    pub has_conflict: bool,

    #[serde(default)]
    pub conflict_type: Option<String>,

    #[serde(default)]
    pub conflicting_order_ids: Vec<i64>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub can_join_waiting_list: bool,
}

// ============================================================================
// Waiting List
// ============================================================================

/// Lifecycle of a waiting-list entry, driven by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitingListStatus {
    /// Queued
    Waiting,

    /// Room freed up, user told to confirm
    Notified,

    /// User confirmed and was booked
    Confirmed,

    /// User left the list
    Cancelled,

    /// Confirmation window passed
    Expired,
}

impl WaitingListStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Notified => "NOTIFIED",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Whether the entry is still in the queue
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Waiting | Self::Notified)
    }
}

impl fmt::Display for WaitingListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitingListStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WAITING" => Ok(Self::Waiting),
            "NOTIFIED" => Ok(Self::Notified),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            "EXPIRED" => Ok(Self::Expired),
            other => Err(format!("unknown waiting-list status: {other}")),
        }
    }
}

/// Body of `POST /v1/booking-conflicts/waiting-list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitingListRequest {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl From<&ConflictDetectionRequest> for JoinWaitingListRequest {
    fn from(request: &ConflictDetectionRequest) -> Self {
        Self {
            room_id: request.room_id,
            user_id: request.user_id,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            guest_count: None,
            special_requests: None,
            priority: None,
        }
    }
}

/// Waiting-list entry as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListEntry {
    pub id: i64,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: WaitingListStatus,

    #[serde(default)]
    pub priority: i32,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query for `GET /v1/booking-conflicts/waiting-list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WaitingListStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    pub page: u32,
    pub size: u32,
}

impl Default for WaitingListQuery {
    fn default() -> Self {
        Self {
            room_id: None,
            user_id: None,
            status: None,
            sort_by: None,
            sort_order: None,
            page: 1,
            size: 20,
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Query for `GET /v1/booking-conflicts/conflicts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRecordQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    pub page: u32,
    pub size: u32,
}

impl Default for ConflictRecordQuery {
    fn default() -> Self {
        Self {
            room_id: None,
            start_date: None,
            end_date: None,
            page: 1,
            size: 20,
        }
    }
}

/// A detected conflict, as recorded by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRecord {
    pub id: i64,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,

    #[serde(default)]
    pub conflict_type: String,

    pub created_at: DateTime<Utc>,
}

/// Aggregate conflict and waiting-list figures
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConflictStatistics {
    pub total_conflicts: u64,
    pub resolved_conflicts: u64,
    pub active_waiting_entries: u64,
    pub confirmed_waiting_entries: u64,
    pub expired_waiting_entries: u64,

    /// Share of waiting-list entries that ended up confirmed (0.0 - 1.0)
    pub conversion_rate: f64,
}

impl ConflictStatistics {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Booking Conflict Stats\n\
             {:-<30}\n\
             Total Conflicts: {}\n\
             - Resolved: {}\n\
             Waiting List:\n\
             - Active: {}\n\
             - Confirmed: {}\n\
             - Expired: {}\n\
             Conversion Rate: {:.1}%",
            "",
            self.total_conflicts,
            self.resolved_conflicts,
            self.active_waiting_entries,
            self.confirmed_waiting_entries,
            self.expired_waiting_entries,
            self.conversion_rate * 100.0
        )
    }
}

/// Room with frequent conflicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictHotspot {
    pub room_id: RoomId,

    #[serde(default)]
    pub room_number: Option<String>,

    pub conflict_count: u64,
}

/// Answer of `POST /v1/booking-conflicts/cleanup-expired`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResult {
    pub cleaned_count: u64,
}
