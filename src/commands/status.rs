use anyhow::{Context, Result};

use roomdesk::config::Config;
use roomdesk::room_status::{
    is_valid_status_transition_str, status_display_text, RoomId, RoomStatus, RoomStatusLog,
    RoomStatusUpdateRequest, StatusLogQuery,
};

use crate::StatusAction;

pub async fn status(config: &Config, action: StatusAction) -> Result<()> {
    match action {
        StatusAction::Set {
            room_id,
            status,
            reason,
            order_id,
            expected_version,
            from,
        } => set(config, room_id, status, reason, order_id, expected_version, from).await,
        StatusAction::Logs {
            room_id,
            page,
            size,
            start_date,
            end_date,
        } => {
            let mut query = StatusLogQuery::page(page, size);
            query.start_date = start_date;
            query.end_date = end_date;
            logs(config, room_id, query).await
        }
        StatusAction::Recent { room_id, limit } => recent(config, room_id, limit).await,
        StatusAction::Check { current, next } => {
            check(&current, &next);
            Ok(())
        }
    }
}

async fn set(
    config: &Config,
    room_id: RoomId,
    status: RoomStatus,
    reason: String,
    order_id: Option<i64>,
    expected_version: Option<u64>,
    from: Option<RoomStatus>,
) -> Result<()> {
    let coordinator = super::coordinator(config)?;

    let mut request = RoomStatusUpdateRequest::new(status, reason);
    request.order_id = order_id;
    request.expected_version = expected_version;

    let outcome = match from {
        Some(current) => coordinator
            .transition_room_status(room_id, current, &request)
            .await,
        None => coordinator.update_room_status(room_id, &request).await,
    }
    .with_context(|| format!("Failed to update status of room {room_id}"))?;

    match outcome.conflict {
        None => println!(
            "Room {room_id} is now {} ({})",
            status,
            status.display_text()
        ),
        Some(conflict) => {
            println!("Room {room_id} was not updated: version conflict");
            println!("  Expected version: {}", conflict.expected_version);
            println!("  {}", conflict.message);
        }
    }

    Ok(())
}

async fn logs(config: &Config, room_id: RoomId, query: StatusLogQuery) -> Result<()> {
    let coordinator = super::coordinator(config)?;

    let page = coordinator
        .get_room_status_logs(room_id, &query)
        .await
        .with_context(|| format!("Failed to fetch status logs of room {room_id}"))?;

    println!(
        "Status history of room {room_id} (page {}/{}, {} entries)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
    println!("================================");
    print_logs(&page.items);

    Ok(())
}

async fn recent(config: &Config, room_id: RoomId, limit: Option<u32>) -> Result<()> {
    let coordinator = super::coordinator(config)?;

    let logs = coordinator
        .get_recent_status_logs(room_id, limit)
        .await
        .with_context(|| format!("Failed to fetch recent status logs of room {room_id}"))?;

    println!("Recent status changes of room {room_id}");
    println!("================================");
    print_logs(&logs);

    Ok(())
}

fn check(current: &str, next: &str) {
    let verdict = if is_valid_status_transition_str(current, next) {
        "allowed"
    } else {
        "not allowed"
    };

    println!(
        "{} -> {}: {verdict}",
        status_display_text(current),
        status_display_text(next)
    );

    if let Ok(current) = current.parse::<RoomStatus>() {
        let options: Vec<&str> = current
            .allowed_transitions()
            .iter()
            .map(RoomStatus::as_str)
            .collect();
        println!("Allowed from {current}: {}", options.join(", "));
    }
}

pub async fn available(config: &Config, room_ids: Vec<RoomId>) -> Result<()> {
    let coordinator = super::coordinator(config)?;

    if let [room_id] = room_ids.as_slice() {
        let available = coordinator
            .check_room_availability(*room_id)
            .await
            .with_context(|| format!("Failed to check availability of room {room_id}"))?;
        println!("Room {room_id}: {}", availability_label(available));
        return Ok(());
    }

    let availability = coordinator
        .check_rooms_availability(&room_ids)
        .await
        .context("Failed to check room availability")?;

    for room_id in &room_ids {
        let available = availability.get(room_id).copied().unwrap_or(false);
        println!("Room {room_id}: {}", availability_label(available));
    }

    Ok(())
}

fn availability_label(available: bool) -> &'static str {
    if available {
        "available"
    } else {
        "unavailable"
    }
}

fn print_logs(logs: &[RoomStatusLog]) {
    if logs.is_empty() {
        println!("No status changes recorded.");
        return;
    }

    for log in logs {
        let from = log
            .old_status
            .map(|s| s.display_text())
            .unwrap_or("-");
        println!(
            "#{} {} {} -> {} by {}",
            log.id,
            log.created_at.format("%Y-%m-%d %H:%M:%S"),
            from,
            log.new_status.display_text(),
            if log.changed_by.is_empty() { "unknown" } else { log.changed_by.as_str() }
        );
        if !log.reason.is_empty() {
            println!("   Reason: {}", log.reason);
        }
        if let Some(order_id) = log.order_id {
            println!("   Order: {order_id}");
        }
    }
}
