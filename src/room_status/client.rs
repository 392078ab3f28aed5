//! HTTP client for the room status endpoints

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::types::{
    AvailabilityCheckRequest, RoomId, RoomStatusLog, RoomStatusUpdateRequest,
    RoomStatusUpdateResponse, StatusLogQuery,
};
use crate::transport::{ApiClient, ApiResponse, Page, TransportError};

/// Room status operations the coordinator depends on
///
/// [`RoomStatusClient`] implements this over HTTP; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait RoomStatusApi: Send + Sync {
    /// `PUT /api/v1/rooms/{roomId}/status`
    async fn update_status(
        &self,
        room_id: RoomId,
        request: &RoomStatusUpdateRequest,
    ) -> Result<RoomStatusUpdateResponse, TransportError>;

    /// `GET /api/v1/rooms/{roomId}/status/logs`
    async fn status_logs(
        &self,
        room_id: RoomId,
        query: &StatusLogQuery,
    ) -> Result<Page<RoomStatusLog>, TransportError>;

    /// `GET /api/v1/rooms/{roomId}/status/recent`
    async fn recent_status_logs(
        &self,
        room_id: RoomId,
        limit: u32,
    ) -> Result<Vec<RoomStatusLog>, TransportError>;

    /// `GET /api/v1/rooms/{roomId}/available`
    async fn room_available(&self, room_id: RoomId) -> Result<bool, TransportError>;

    /// `POST /api/v1/rooms/availability/check`
    async fn rooms_available(
        &self,
        room_ids: &[RoomId],
    ) -> Result<HashMap<RoomId, bool>, TransportError>;
}

/// Room status endpoints over the shared [`ApiClient`]
pub struct RoomStatusClient {
    api: Arc<ApiClient>,
}

impl RoomStatusClient {
    /// Create a new room status client
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn room_path(room_id: RoomId, suffix: &str) -> String {
        format!("/api/v1/rooms/{room_id}{suffix}")
    }
}

#[async_trait]
impl RoomStatusApi for RoomStatusClient {
    async fn update_status(
        &self,
        room_id: RoomId,
        request: &RoomStatusUpdateRequest,
    ) -> Result<RoomStatusUpdateResponse, TransportError> {
        let envelope: ApiResponse<serde_json::Value> = self
            .api
            .put_envelope(&Self::room_path(room_id, "/status"), request)
            .await?;

        let code = envelope.code_str();
        Ok(RoomStatusUpdateResponse {
            success: envelope.success,
            message: envelope.message.unwrap_or_default(),
            code,
        })
    }

    async fn status_logs(
        &self,
        room_id: RoomId,
        query: &StatusLogQuery,
    ) -> Result<Page<RoomStatusLog>, TransportError> {
        self.api
            .get_query(&Self::room_path(room_id, "/status/logs"), query)
            .await
    }

    async fn recent_status_logs(
        &self,
        room_id: RoomId,
        limit: u32,
    ) -> Result<Vec<RoomStatusLog>, TransportError> {
        self.api
            .get_query(
                &Self::room_path(room_id, "/status/recent"),
                &[("limit", limit)],
            )
            .await
    }

    async fn room_available(&self, room_id: RoomId) -> Result<bool, TransportError> {
        self.api.get(&Self::room_path(room_id, "/available")).await
    }

    async fn rooms_available(
        &self,
        room_ids: &[RoomId],
    ) -> Result<HashMap<RoomId, bool>, TransportError> {
        let request = AvailabilityCheckRequest {
            room_ids: room_ids.to_vec(),
        };

        self.api
            .post("/api/v1/rooms/availability/check", &request)
            .await
    }
}
