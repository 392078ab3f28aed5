//! roomdesk - Hotel platform client with room-status coordination
//!
//! A typed client for the hotel booking and management platform's REST API.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`transport`] - HTTP client, response envelope and retry policy
//! - [`room_status`] - Transition table, optimistic-concurrency updates and
//!   status change subscribers
//! - [`booking_conflict`] - Conflict detection and waiting-list operations
//! - [`auth`] - Session state and permission gates
//! - [`config`] - Configuration management and settings
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use roomdesk::config::Config;
//! use roomdesk::room_status::{
//!     RoomStatus, RoomStatusClient, RoomStatusCoordinator, RoomStatusUpdateRequest,
//! };
//! use roomdesk::transport::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let api = Arc::new(ApiClient::new(config.client_config())?);
//!     let coordinator = RoomStatusCoordinator::new(Arc::new(RoomStatusClient::new(api)));
//!
//!     let request = RoomStatusUpdateRequest::new(RoomStatus::Occupied, "check-in")
//!         .with_expected_version(3);
//!     let outcome = coordinator.update_room_status(101, &request).await?;
//!     if let Some(conflict) = outcome.conflict {
//!         println!("refresh and retry: {}", conflict.message);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod booking_conflict;
pub mod config;
pub mod error;
pub mod room_status;
pub mod transport;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::auth::{AuthStore, Capabilities, Session};
    pub use crate::booking_conflict::BookingConflictClient;
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result, RoomdeskErrorTrait};
    pub use crate::room_status::{
        RoomStatus, RoomStatusClient, RoomStatusCoordinator, RoomStatusUpdateRequest,
        StatusPoller, Subscription, UpdateOutcome,
    };
    pub use crate::transport::{ApiClient, ClientConfig};
}

// Direct re-exports for convenience
pub use room_status::{RoomStatus, RoomStatusCoordinator};
