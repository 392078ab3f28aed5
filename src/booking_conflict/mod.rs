//! Booking conflict detection and waiting-list operations
//!
//! The conflict engine and waiting-list queue live on the server; this
//! module formats requests and relays answers.

pub mod client;
pub mod types;

pub use client::{BookingConflictClient, DEFAULT_HOTSPOT_LIMIT};
pub use types::{
    CleanupResult, ConflictDetectionRequest, ConflictDetectionResult, ConflictHotspot,
    ConflictRecord, ConflictRecordQuery, ConflictStatistics, JoinWaitingListRequest, SortOrder,
    UserId, WaitingListEntry, WaitingListQuery, WaitingListStatus,
};
