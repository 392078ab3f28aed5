//! Room status values, the transition table and display mapping
//!
//! The table is an advisory client-side guard. The server remains the final
//! arbiter and may still reject a transition the client considered valid,
//! which surfaces as a conflict rather than a validation error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::RoomStatusError;

/// Color token used for statuses the client does not recognize
pub const DEFAULT_STATUS_COLOR: &str = "info";

/// Operational status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// Free for check-in
    Available,

    /// A guest is checked in
    Occupied,

    /// Out of service
    Maintenance,

    /// Being cleaned after check-out
    Cleaning,
}

impl RoomStatus {
    /// Every status, in declaration order
    pub const ALL: [RoomStatus; 4] = [
        Self::Available,
        Self::Occupied,
        Self::Maintenance,
        Self::Cleaning,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::Maintenance => "MAINTENANCE",
            Self::Cleaning => "CLEANING",
        }
    }

    /// Statuses reachable in one step from `self`
    pub fn allowed_transitions(&self) -> &'static [RoomStatus] {
        match self {
            Self::Available => &[Self::Occupied, Self::Maintenance],
            Self::Occupied => &[Self::Cleaning],
            Self::Cleaning => &[Self::Available, Self::Maintenance],
            Self::Maintenance => &[Self::Available],
        }
    }

    /// Check the transition table; a status never transitions to itself
    pub fn can_transition_to(&self, next: RoomStatus) -> bool {
        *self != next && self.allowed_transitions().contains(&next)
    }

    /// Chinese label shown at the front desk
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Available => "可用",
            Self::Occupied => "已入住",
            Self::Maintenance => "维修中",
            Self::Cleaning => "清洁中",
        }
    }

    /// UI color token
    pub fn color(&self) -> &'static str {
        match self {
            Self::Available => "success",
            Self::Occupied => "danger",
            Self::Maintenance => "warning",
            Self::Cleaning => "primary",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = RoomStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RoomStatusError::UnknownStatus(s.to_string()))
    }
}

/// Check whether `current -> next` is allowed by the transition table
pub fn is_valid_status_transition(current: RoomStatus, next: RoomStatus) -> bool {
    current.can_transition_to(next)
}

/// String form of [`is_valid_status_transition`]; unknown statuses are never valid
pub fn is_valid_status_transition_str(current: &str, next: &str) -> bool {
    match (current.parse::<RoomStatus>(), next.parse::<RoomStatus>()) {
        (Ok(current), Ok(next)) => current.can_transition_to(next),
        _ => false,
    }
}

/// Display text for a raw status; unknown input is returned unchanged
pub fn status_display_text(status: &str) -> &str {
    match status.parse::<RoomStatus>() {
        Ok(status) => status.display_text(),
        Err(_) => status,
    }
}

/// Color token for a raw status; unknown input maps to [`DEFAULT_STATUS_COLOR`]
pub fn status_color(status: &str) -> &'static str {
    status
        .parse::<RoomStatus>()
        .map(|s| s.color())
        .unwrap_or(DEFAULT_STATUS_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_transition_is_invalid() {
        for status in RoomStatus::ALL {
            assert!(!is_valid_status_transition(status, status), "{status}");
        }
    }

    #[test]
    fn test_transition_table() {
        use RoomStatus::*;

        assert!(is_valid_status_transition(Available, Occupied));
        assert!(is_valid_status_transition(Available, Maintenance));
        assert!(!is_valid_status_transition(Available, Cleaning));

        assert!(is_valid_status_transition(Occupied, Cleaning));
        // Must go through cleaning first
        assert!(!is_valid_status_transition(Occupied, Available));
        assert!(!is_valid_status_transition(Occupied, Maintenance));

        assert!(is_valid_status_transition(Cleaning, Available));
        assert!(is_valid_status_transition(Cleaning, Maintenance));
        assert!(!is_valid_status_transition(Cleaning, Occupied));

        assert!(is_valid_status_transition(Maintenance, Available));
        assert!(!is_valid_status_transition(Maintenance, Occupied));
        assert!(!is_valid_status_transition(Maintenance, Cleaning));
    }

    #[test]
    fn test_string_transition_unknown_current() {
        for next in RoomStatus::ALL {
            assert!(!is_valid_status_transition_str("", next.as_str()));
            assert!(!is_valid_status_transition_str("BOOKED", next.as_str()));
        }
        assert!(!is_valid_status_transition_str("AVAILABLE", "available"));
        assert!(is_valid_status_transition_str("AVAILABLE", "OCCUPIED"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("CLEANING".parse::<RoomStatus>().unwrap(), RoomStatus::Cleaning);
        assert_eq!(RoomStatus::Maintenance.to_string(), "MAINTENANCE");
        assert!(matches!(
            "cleaning".parse::<RoomStatus>(),
            Err(RoomStatusError::UnknownStatus(s)) if s == "cleaning"
        ));
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_string(&RoomStatus::Occupied).unwrap();
        assert_eq!(json, "\"OCCUPIED\"");

        let status: RoomStatus = serde_json::from_str("\"AVAILABLE\"").unwrap();
        assert_eq!(status, RoomStatus::Available);
    }

    #[test]
    fn test_display_text_mapping() {
        assert_eq!(status_display_text("AVAILABLE"), "可用");
        assert_eq!(status_display_text("OCCUPIED"), "已入住");
        assert_eq!(status_display_text("MAINTENANCE"), "维修中");
        assert_eq!(status_display_text("CLEANING"), "清洁中");
        assert_eq!(status_display_text("RESERVED"), "RESERVED");
        assert_eq!(status_display_text(""), "");
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(status_color("AVAILABLE"), "success");
        assert_eq!(status_color("OCCUPIED"), "danger");
        assert_eq!(status_color("MAINTENANCE"), "warning");
        assert_eq!(status_color("CLEANING"), "primary");
        assert_eq!(status_color("RESERVED"), DEFAULT_STATUS_COLOR);
    }
}
