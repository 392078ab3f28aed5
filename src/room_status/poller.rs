//! Polling channel that feeds server-side status changes to listeners
//!
//! Each tick fetches the recent log window for every watched room and
//! replays entries newer than the last one seen, oldest first, through
//! [`RoomStatusCoordinator::on_room_status_changed`]. The first poll of a
//! room only records a baseline so history is not replayed on startup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::coordinator::RoomStatusCoordinator;
use super::types::{RoomId, RoomStatusLog};

/// Shortest interval the poller will tick at
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Last log id seen per watched room
#[derive(Debug, Default)]
pub struct PollState {
    last_seen: HashMap<RoomId, i64>,
    window: u32,
}

impl PollState {
    /// Create state that fetches `window` recent entries per poll
    pub fn new(window: u32) -> Self {
        Self {
            last_seen: HashMap::new(),
            window: window.max(1),
        }
    }

    /// Last log id seen for a room, if a baseline exists
    pub fn last_seen(&self, room_id: RoomId) -> Option<i64> {
        self.last_seen.get(&room_id).copied()
    }

    /// Poll every room once; returns the number of changes dispatched
    pub async fn poll(
        &mut self,
        coordinator: &RoomStatusCoordinator,
        room_ids: &[RoomId],
    ) -> usize {
        let mut dispatched = 0;

        for &room_id in room_ids {
            match coordinator
                .get_recent_status_logs(room_id, Some(self.window))
                .await
            {
                Ok(logs) => dispatched += self.apply(coordinator, room_id, logs),
                Err(e) => {
                    tracing::warn!(
                        room_id,
                        error = %e,
                        "Status poll failed, keeping previous baseline"
                    );
                }
            }
        }

        dispatched
    }

    /// Replay entries newer than the baseline; returns the number dispatched
    pub fn apply(
        &mut self,
        coordinator: &RoomStatusCoordinator,
        room_id: RoomId,
        mut logs: Vec<RoomStatusLog>,
    ) -> usize {
        let newest = logs.iter().map(|log| log.id).max();

        let Some(&baseline) = self.last_seen.get(&room_id) else {
            self.last_seen.insert(room_id, newest.unwrap_or(0));
            return 0;
        };

        logs.retain(|log| log.id > baseline);
        logs.sort_by_key(|log| log.id);

        let mut dispatched = 0;
        for log in &logs {
            match log.old_status {
                Some(old_status) => {
                    coordinator.on_room_status_changed(room_id, old_status, log.new_status);
                    dispatched += 1;
                }
                None => {
                    tracing::debug!(
                        room_id,
                        log_id = log.id,
                        "Skipping log entry without previous status"
                    );
                }
            }
        }

        if let Some(newest) = newest.filter(|n| *n > baseline) {
            self.last_seen.insert(room_id, newest);
        }

        dispatched
    }
}

/// Background task running [`PollState::poll`] on a fixed interval
///
/// The task is aborted when the poller is stopped or dropped.
pub struct StatusPoller {
    handle: JoinHandle<()>,
}

impl StatusPoller {
    /// Start polling `room_ids` every `interval`
    ///
    /// Intervals shorter than [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn start(
        coordinator: Arc<RoomStatusCoordinator>,
        room_ids: Vec<RoomId>,
        interval: Duration,
        window: u32,
    ) -> Self {
        if interval < MIN_POLL_INTERVAL {
            tracing::warn!(
                requested = ?interval,
                using = ?MIN_POLL_INTERVAL,
                "Poll interval too short, clamping"
            );
        }
        let interval = interval.max(MIN_POLL_INTERVAL);

        let handle = tokio::spawn(async move {
            let mut state = PollState::new(window);
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            tracing::info!(rooms = ?room_ids, interval = ?interval, "Status poller started");

            loop {
                ticker.tick().await;
                let dispatched = state.poll(&coordinator, &room_ids).await;
                if dispatched > 0 {
                    tracing::debug!(dispatched, "Dispatched polled status changes");
                }
            }
        });

        Self { handle }
    }

    /// Whether the background task is still running
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop polling
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
