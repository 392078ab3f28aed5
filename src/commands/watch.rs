use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use roomdesk::config::Config;
use roomdesk::room_status::{RoomId, RoomStatus, StatusPoller};

pub async fn watch(config: &Config, room_ids: Vec<RoomId>, interval: Option<u64>) -> Result<()> {
    let coordinator = Arc::new(super::coordinator(config)?);

    let subscriptions: Vec<_> = room_ids
        .iter()
        .map(|&room_id| {
            coordinator.subscribe_to_status_changes(
                room_id,
                Arc::new(
                    |room_id: RoomId, old: RoomStatus, new: RoomStatus| -> anyhow::Result<()> {
                        println!(
                            "Room {room_id}: {} -> {}",
                            old.display_text(),
                            new.display_text()
                        );
                        Ok(())
                    },
                ),
            )
        })
        .collect();

    let interval = interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());

    println!(
        "Watching {} room(s) every {}s, press Ctrl-C to stop",
        room_ids.len(),
        interval.as_secs()
    );

    let poller = StatusPoller::start(
        Arc::clone(&coordinator),
        room_ids,
        interval,
        config.poller.window,
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    poller.stop();
    for subscription in &subscriptions {
        subscription.unsubscribe();
    }

    tracing::info!("Watch stopped");
    Ok(())
}
