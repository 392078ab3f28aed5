//! Room status coordination
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           RoomStatusCoordinator             │
//! │                                             │
//! │  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │ Transition table │  │StatusSubscribers│  │
//! │  │ (advisory guard) │  │room -> listeners│  │
//! │  └──────────────────┘  └─────────────────┘  │
//! │           │                     ▲           │
//! │           ▼                     │           │
//! │  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │ RoomStatusApi    │  │ StatusPoller    │  │
//! │  │ (HTTP client)    │  │ (recent logs)   │  │
//! │  └──────────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use roomdesk::room_status::{RoomStatus, RoomStatusCoordinator, RoomStatusUpdateRequest};
//!
//! let request = RoomStatusUpdateRequest::new(RoomStatus::Cleaning, "guest checked out")
//!     .with_expected_version(version);
//! let outcome = coordinator.update_room_status(room_id, &request).await?;
//! if let Some(conflict) = outcome.conflict {
//!     // refresh the room and retry
//! }
//! ```

pub mod client;
pub mod coordinator;
pub mod error;
pub mod poller;
pub mod status;
pub mod subscribers;
pub mod types;

pub use client::{RoomStatusApi, RoomStatusClient};
pub use coordinator::{RoomStatusCoordinator, CONFLICT_FALLBACK_MESSAGE};
pub use error::RoomStatusError;
pub use poller::{PollState, StatusPoller};
pub use status::{
    is_valid_status_transition, is_valid_status_transition_str, status_color,
    status_display_text, RoomStatus, DEFAULT_STATUS_COLOR,
};
pub use subscribers::{StatusListener, StatusSubscribers, Subscription};
pub use types::{
    RoomId, RoomStatusConflict, RoomStatusLog, RoomStatusUpdateRequest, RoomStatusUpdateResponse,
    StatusLogQuery, UpdateOutcome, DEFAULT_RECENT_LOG_LIMIT,
};
