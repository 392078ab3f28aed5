//! HTTP client for the booking conflict and waiting-list endpoints
//!
//! Pure pass-through: every call maps one request to one response. Failures
//! are logged and returned unchanged.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::types::{
    CleanupResult, ConflictDetectionRequest, ConflictDetectionResult, ConflictHotspot,
    ConflictRecord, ConflictRecordQuery, ConflictStatistics, JoinWaitingListRequest,
    WaitingListEntry, WaitingListQuery,
};
use crate::transport::{ApiClient, Page, TransportError};

const BASE_PATH: &str = "/v1/booking-conflicts";

/// Default number of hotspots requested
pub const DEFAULT_HOTSPOT_LIMIT: u32 = 10;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
}

/// Client for conflict detection and waiting-list operations
pub struct BookingConflictClient {
    api: Arc<ApiClient>,
}

impl BookingConflictClient {
    /// Create a new booking conflict client
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Ask the server whether a stay collides with existing bookings
    pub async fn detect_conflict(
        &self,
        request: &ConflictDetectionRequest,
    ) -> Result<ConflictDetectionResult, TransportError> {
        let result: ConflictDetectionResult = self
            .api
            .post(&format!("{BASE_PATH}/detect"), request)
            .await
            .map_err(|e| log_failure("detect conflict", e))?;

        if result.has_conflict {
            tracing::info!(
                room_id = request.room_id,
                user_id = request.user_id,
                conflict_type = ?result.conflict_type,
                "Booking conflict detected"
            );
        }

        Ok(result)
    }

    /// Queue a user for a room that is currently unavailable
    pub async fn join_waiting_list(
        &self,
        request: &JoinWaitingListRequest,
    ) -> Result<WaitingListEntry, TransportError> {
        self.api
            .post(&format!("{BASE_PATH}/waiting-list"), request)
            .await
            .map_err(|e| log_failure("join waiting list", e))
    }

    /// Remove an entry from the waiting list
    pub async fn leave_waiting_list(&self, entry_id: i64) -> Result<(), TransportError> {
        self.api
            .delete(&format!("{BASE_PATH}/waiting-list/{entry_id}"))
            .await
            .map_err(|e| log_failure("leave waiting list", e))
    }

    /// Confirm a notified entry, turning it into a booking
    pub async fn confirm_waiting_list(
        &self,
        entry_id: i64,
    ) -> Result<WaitingListEntry, TransportError> {
        self.api
            .put(
                &format!("{BASE_PATH}/waiting-list/{entry_id}/confirm"),
                &serde_json::json!({}),
            )
            .await
            .map_err(|e| log_failure("confirm waiting list entry", e))
    }

    /// List waiting-list entries with filtering, sorting and pagination
    pub async fn query_waiting_list(
        &self,
        query: &WaitingListQuery,
    ) -> Result<Page<WaitingListEntry>, TransportError> {
        self.api
            .get_query(&format!("{BASE_PATH}/waiting-list"), query)
            .await
            .map_err(|e| log_failure("query waiting list", e))
    }

    /// List recorded conflicts
    pub async fn query_conflicts(
        &self,
        query: &ConflictRecordQuery,
    ) -> Result<Page<ConflictRecord>, TransportError> {
        self.api
            .get_query(&format!("{BASE_PATH}/conflicts"), query)
            .await
            .map_err(|e| log_failure("query conflicts", e))
    }

    /// Aggregate conflict statistics, optionally for a date range
    pub async fn get_conflict_statistics(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<ConflictStatistics, TransportError> {
        let range = DateRange {
            start_date,
            end_date,
        };

        self.api
            .get_query(&format!("{BASE_PATH}/statistics"), &range)
            .await
            .map_err(|e| log_failure("conflict statistics", e))
    }

    /// Rooms with the most conflicts
    pub async fn get_conflict_hotspots(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<ConflictHotspot>, TransportError> {
        let limit = limit.unwrap_or(DEFAULT_HOTSPOT_LIMIT);

        self.api
            .get_query(
                &format!("{BASE_PATH}/statistics/hotspots"),
                &[("limit", limit)],
            )
            .await
            .map_err(|e| log_failure("conflict hotspots", e))
    }

    /// Ask the server to expire stale waiting-list entries
    pub async fn cleanup_expired_entries(&self) -> Result<CleanupResult, TransportError> {
        let result: CleanupResult = self
            .api
            .post_empty(&format!("{BASE_PATH}/cleanup-expired"))
            .await
            .map_err(|e| log_failure("cleanup expired entries", e))?;

        tracing::info!(cleaned = result.cleaned_count, "Expired waiting-list entries cleaned up");
        Ok(result)
    }
}

fn log_failure(operation: &str, err: TransportError) -> TransportError {
    tracing::error!(operation, error = %err, "Booking conflict request failed");
    err
}
