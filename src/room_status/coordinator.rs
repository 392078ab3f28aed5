//! Room status coordinator
//!
//! Mediates every room status mutation and keeps local listeners informed.
//! The server owns the authoritative state; the coordinator only validates
//! transitions advisorily, interprets version conflicts and fans out
//! server-reported changes.
//!
//! Concurrent updates to the same room are not serialized here. The
//! server's `expectedVersion` check is the only concurrency control.

use std::collections::HashMap;
use std::sync::Arc;

use super::client::RoomStatusApi;
use super::error::RoomStatusError;
use super::status::RoomStatus;
use super::subscribers::{StatusListener, StatusSubscribers, Subscription};
use super::types::{
    RoomId, RoomStatusConflict, RoomStatusLog, RoomStatusUpdateRequest, StatusLogQuery,
    UpdateOutcome, DEFAULT_RECENT_LOG_LIMIT,
};
use crate::transport::{Page, TransportError};

/// Error codes the server uses for a version mismatch
pub const CONFLICT_ERROR_CODES: &[&str] = &["VERSION_CONFLICT", "409"];

/// Message used when the server reports a conflict without one
pub const CONFLICT_FALLBACK_MESSAGE: &str =
    "Room status was modified concurrently; refresh and retry";

/// Coordinates room status updates, queries and change notifications
pub struct RoomStatusCoordinator {
    api: Arc<dyn RoomStatusApi>,
    subscribers: StatusSubscribers,
}

impl RoomStatusCoordinator {
    /// Create a coordinator over the given API
    pub fn new(api: Arc<dyn RoomStatusApi>) -> Self {
        Self {
            api,
            subscribers: StatusSubscribers::new(),
        }
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Send a status update
    ///
    /// A version mismatch comes back as `Ok` with `success: false` and a
    /// populated conflict. Every other failure is returned as an error.
    pub async fn update_room_status(
        &self,
        room_id: RoomId,
        request: &RoomStatusUpdateRequest,
    ) -> Result<UpdateOutcome, RoomStatusError> {
        match self.api.update_status(room_id, request).await {
            Ok(response) if response.success => {
                tracing::info!(
                    room_id,
                    status = %request.status,
                    expected_version = ?request.expected_version,
                    "Room status updated"
                );
                Ok(UpdateOutcome::applied())
            }
            Ok(response) => {
                let err = TransportError::Rejected {
                    message: response.message,
                    code: response.code,
                };
                self.resolve_failure(room_id, request, err)
            }
            Err(err) => self.resolve_failure(room_id, request, err),
        }
    }

    /// Validate `current -> request.status` locally, then send the update
    pub async fn transition_room_status(
        &self,
        room_id: RoomId,
        current: RoomStatus,
        request: &RoomStatusUpdateRequest,
    ) -> Result<UpdateOutcome, RoomStatusError> {
        if !current.can_transition_to(request.status) {
            tracing::warn!(
                room_id,
                from = %current,
                to = %request.status,
                "Refusing status transition not allowed by the transition table"
            );
            return Err(RoomStatusError::InvalidTransition {
                room_id,
                from: current,
                to: request.status,
            });
        }

        self.update_room_status(room_id, request).await
    }

    fn resolve_failure(
        &self,
        room_id: RoomId,
        request: &RoomStatusUpdateRequest,
        err: TransportError,
    ) -> Result<UpdateOutcome, RoomStatusError> {
        if let Some(conflict) = conflict_from_error(room_id, request, &err) {
            tracing::warn!(
                room_id,
                expected_version = conflict.expected_version,
                message = %conflict.message,
                "Room status update hit a version conflict"
            );
            return Ok(UpdateOutcome::conflicted(conflict));
        }

        tracing::error!(room_id, error = %err, "Room status update failed");
        Err(err.into())
    }

    // ========================================================================
    // Transition Table
    // ========================================================================

    /// Check `current -> next` against the transition table
    pub fn is_valid_status_transition(&self, current: RoomStatus, next: RoomStatus) -> bool {
        current.can_transition_to(next)
    }

    /// Statuses reachable from `current` in one step
    pub fn allowed_transitions(&self, current: RoomStatus) -> &'static [RoomStatus] {
        current.allowed_transitions()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Most recent log entries for a room, newest first
    pub async fn get_recent_status_logs(
        &self,
        room_id: RoomId,
        limit: Option<u32>,
    ) -> Result<Vec<RoomStatusLog>, RoomStatusError> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LOG_LIMIT);
        self.api
            .recent_status_logs(room_id, limit)
            .await
            .map_err(|e| log_failure(room_id, "recent status logs", e))
    }

    /// Paginated log history for a room, optionally filtered by date
    pub async fn get_room_status_logs(
        &self,
        room_id: RoomId,
        query: &StatusLogQuery,
    ) -> Result<Page<RoomStatusLog>, RoomStatusError> {
        self.api
            .status_logs(room_id, query)
            .await
            .map_err(|e| log_failure(room_id, "status logs", e))
    }

    /// Whether a single room is available
    pub async fn check_room_availability(&self, room_id: RoomId) -> Result<bool, RoomStatusError> {
        self.api
            .room_available(room_id)
            .await
            .map_err(|e| log_failure(room_id, "availability", e))
    }

    /// Availability for several rooms, one entry per requested id
    ///
    /// Ids the server leaves out of its answer are reported unavailable.
    pub async fn check_rooms_availability(
        &self,
        room_ids: &[RoomId],
    ) -> Result<HashMap<RoomId, bool>, RoomStatusError> {
        if room_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let answer = self.api.rooms_available(room_ids).await.map_err(|e| {
            tracing::error!(rooms = ?room_ids, error = %e, "Batch availability check failed");
            RoomStatusError::from(e)
        })?;

        Ok(room_ids
            .iter()
            .map(|id| (*id, answer.get(id).copied().unwrap_or(false)))
            .collect())
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Register a listener for a room's status changes
    pub fn subscribe_to_status_changes(
        &self,
        room_id: RoomId,
        listener: Arc<dyn StatusListener>,
    ) -> Subscription {
        self.subscribers.subscribe(room_id, listener)
    }

    /// Ingress for server-reported changes; returns how many listeners succeeded
    pub fn on_room_status_changed(
        &self,
        room_id: RoomId,
        old_status: RoomStatus,
        new_status: RoomStatus,
    ) -> usize {
        tracing::debug!(room_id, from = %old_status, to = %new_status, "Room status changed");
        self.subscribers.notify(room_id, old_status, new_status)
    }

    /// Number of listeners registered for a room
    pub fn subscriber_count(&self, room_id: RoomId) -> usize {
        self.subscribers.count(room_id)
    }

    /// Rooms with at least one listener
    pub fn subscribed_rooms(&self) -> Vec<RoomId> {
        self.subscribers.rooms()
    }
}

fn log_failure(room_id: RoomId, what: &str, err: TransportError) -> RoomStatusError {
    tracing::error!(room_id, error = %err, "Failed to fetch {}", what);
    err.into()
}

/// Classify a failed update as a version conflict
///
/// HTTP 409 and the dedicated error codes are authoritative. A message
/// mentioning "version" is accepted as a fallback for services that do
/// not send a code.
pub fn conflict_from_error(
    room_id: RoomId,
    request: &RoomStatusUpdateRequest,
    err: &TransportError,
) -> Option<RoomStatusConflict> {
    let by_status = err.status() == Some(409);
    let by_code = err
        .code()
        .is_some_and(|code| CONFLICT_ERROR_CODES.contains(&code));
    let by_message = err
        .server_message()
        .is_some_and(|message| message.contains("version"));

    if !(by_status || by_code || by_message) {
        return None;
    }

    let message = err
        .server_message()
        .filter(|m| !m.trim().is_empty())
        .map_or_else(|| CONFLICT_FALLBACK_MESSAGE.to_string(), str::to_string);

    Some(RoomStatusConflict {
        room_id,
        expected_version: request.expected_version.unwrap_or(0),
        actual_version: 0,
        message,
    })
}
