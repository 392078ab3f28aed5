use anyhow::{Context, Result};

use roomdesk::booking_conflict::{
    BookingConflictClient, ConflictDetectionRequest, ConflictRecordQuery,
};
use roomdesk::config::Config;

use crate::ConflictAction;

pub async fn conflicts(config: &Config, action: ConflictAction) -> Result<()> {
    let client = BookingConflictClient::new(super::api_client(config)?);

    match action {
        ConflictAction::Detect {
            room_id,
            user_id,
            check_in,
            check_out,
        } => {
            let request = ConflictDetectionRequest {
                room_id,
                user_id,
                check_in_date: check_in,
                check_out_date: check_out,
            };

            let result = client
                .detect_conflict(&request)
                .await
                .context("Conflict detection failed")?;

            if !result.has_conflict {
                println!(
                    "No conflict: room {room_id} is free for {} night(s) from {check_in}",
                    request.nights()
                );
                return Ok(());
            }

            println!(
                "Conflict detected ({})",
                result.conflict_type.as_deref().unwrap_or("unspecified")
            );
            if let Some(message) = &result.message {
                println!("  {message}");
            }
            if !result.conflicting_order_ids.is_empty() {
                println!("  Conflicting orders: {:?}", result.conflicting_order_ids);
            }
            if result.can_join_waiting_list {
                println!("  The user can join the waiting list for this stay.");
            }
        }

        ConflictAction::Stats {
            start_date,
            end_date,
        } => {
            let stats = client
                .get_conflict_statistics(start_date, end_date)
                .await
                .context("Failed to fetch conflict statistics")?;
            println!("{}", stats.display());
        }

        ConflictAction::Hotspots { limit } => {
            let hotspots = client
                .get_conflict_hotspots(limit)
                .await
                .context("Failed to fetch conflict hotspots")?;

            if hotspots.is_empty() {
                println!("No conflicts recorded.");
            }
            for (i, hotspot) in hotspots.iter().enumerate() {
                println!(
                    "{}. Room {} {}: {} conflict(s)",
                    i + 1,
                    hotspot.room_id,
                    hotspot.room_number.as_deref().unwrap_or(""),
                    hotspot.conflict_count
                );
            }
        }

        ConflictAction::List {
            room_id,
            page,
            size,
        } => {
            let query = ConflictRecordQuery {
                room_id,
                page,
                size,
                ..Default::default()
            };

            let records = client
                .query_conflicts(&query)
                .await
                .context("Failed to list conflicts")?;

            println!("Conflicts ({} total)", records.total);
            println!("================================");
            for record in &records.items {
                println!(
                    "#{} room {} user {} {}..{} [{}]",
                    record.id,
                    record.room_id,
                    record.user_id,
                    record.check_in_date,
                    record.check_out_date,
                    record.conflict_type
                );
            }
        }
    }

    Ok(())
}
