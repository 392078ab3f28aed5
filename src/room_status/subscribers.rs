//! Per-room registry of status change listeners
//!
//! Listeners for a room run in registration order. A listener that returns
//! an error or panics is logged and skipped; the rest of the notification
//! still runs. Listeners are invoked outside the registry lock, so a
//! listener may unsubscribe itself (or others) while being notified. A
//! listener removed mid-notification is not called for that change.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use super::status::RoomStatus;
use super::types::RoomId;

/// Receives `(room_id, old_status, new_status)` for a subscribed room
pub trait StatusListener: Send + Sync {
    /// Called once per reported change
    fn on_status_changed(
        &self,
        room_id: RoomId,
        old_status: RoomStatus,
        new_status: RoomStatus,
    ) -> anyhow::Result<()>;
}

impl<F> StatusListener for F
where
    F: Fn(RoomId, RoomStatus, RoomStatus) -> anyhow::Result<()> + Send + Sync,
{
    fn on_status_changed(
        &self,
        room_id: RoomId,
        old_status: RoomStatus,
        new_status: RoomStatus,
    ) -> anyhow::Result<()> {
        self(room_id, old_status, new_status)
    }
}

type ListenerId = u64;

struct Entry {
    id: ListenerId,
    listener: Arc<dyn StatusListener>,
}

#[derive(Default)]
struct RegistryState {
    next_id: ListenerId,
    rooms: HashMap<RoomId, Vec<Entry>>,
}

impl RegistryState {
    fn contains(&self, room_id: RoomId, id: ListenerId) -> bool {
        self.rooms
            .get(&room_id)
            .is_some_and(|entries| entries.iter().any(|entry| entry.id == id))
    }

    fn remove(&mut self, room_id: RoomId, id: ListenerId) -> bool {
        let Some(entries) = self.rooms.get_mut(&room_id) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;

        if entries.is_empty() {
            self.rooms.remove(&room_id);
        }

        removed
    }
}

/// Registry of status listeners, keyed by room
#[derive(Default)]
pub struct StatusSubscribers {
    state: Arc<RwLock<RegistryState>>,
}

impl StatusSubscribers {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `room_id`
    pub fn subscribe(&self, room_id: RoomId, listener: Arc<dyn StatusListener>) -> Subscription {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let id = state.next_id;
        state.next_id += 1;
        state
            .rooms
            .entry(room_id)
            .or_default()
            .push(Entry { id, listener });

        tracing::debug!(room_id, listener_id = id, "Status listener subscribed");

        Subscription {
            room_id,
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Run every listener for `room_id`; returns how many completed successfully
    pub fn notify(
        &self,
        room_id: RoomId,
        old_status: RoomStatus,
        new_status: RoomStatus,
    ) -> usize {
        let listeners: Vec<(ListenerId, Arc<dyn StatusListener>)> = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            match state.rooms.get(&room_id) {
                Some(entries) => entries
                    .iter()
                    .map(|entry| (entry.id, Arc::clone(&entry.listener)))
                    .collect(),
                None => return 0,
            }
        };

        let mut delivered = 0;

        for (id, listener) in listeners {
            let still_subscribed = self
                .state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(room_id, id);
            if !still_subscribed {
                continue;
            }

            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                listener.on_status_changed(room_id, old_status, new_status)
            }));

            match result {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    tracing::error!(
                        room_id,
                        listener_id = id,
                        error = %e,
                        "Room status listener failed"
                    );
                }
                Err(payload) => {
                    tracing::error!(
                        room_id,
                        listener_id = id,
                        panic = %panic_message(payload.as_ref()),
                        "Room status listener panicked"
                    );
                }
            }
        }

        delivered
    }

    /// Number of listeners registered for `room_id`
    pub fn count(&self, room_id: RoomId) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rooms
            .get(&room_id)
            .map_or(0, Vec::len)
    }

    /// Rooms with at least one listener
    pub fn rooms(&self) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rooms
            .keys()
            .copied()
            .collect();
        rooms.sort_unstable();
        rooms
    }

    /// Whether no room has listeners
    pub fn is_empty(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rooms
            .is_empty()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Handle returned by [`StatusSubscribers::subscribe`]
///
/// Dropping the handle does not unsubscribe.
#[derive(Debug)]
pub struct Subscription {
    room_id: RoomId,
    id: ListenerId,
    state: Weak<RwLock<RegistryState>>,
}

impl Subscription {
    /// Room this subscription listens to
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Remove exactly this listener; returns false if it was already removed
    pub fn unsubscribe(&self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };

        let removed = state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(self.room_id, self.id);

        if removed {
            tracing::debug!(
                room_id = self.room_id,
                listener_id = self.id,
                "Status listener removed"
            );
        }

        removed
    }
}
