//! Room status errors
//!
//! Version conflicts are not errors: they come back as
//! [`RoomStatusConflict`](super::RoomStatusConflict) values.

use thiserror::Error;

use super::status::RoomStatus;
use super::types::RoomId;
use crate::transport::TransportError;

/// Errors raised by the room status client and coordinator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoomStatusError {
    /// Status string outside the four known values
    #[error("Unknown room status: {0:?}")]
    UnknownStatus(String),

    /// Rejected by the client-side transition table before sending
    #[error("Invalid status transition for room {room_id}: {from} -> {to}")]
    InvalidTransition {
        room_id: RoomId,
        from: RoomStatus,
        to: RoomStatus,
    },

    /// Transport failure other than a version conflict
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RoomStatusError {
    /// Whether retrying may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_recoverable(),
            Self::UnknownStatus(_) | Self::InvalidTransition { .. } => false,
        }
    }
}
