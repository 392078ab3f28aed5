use anyhow::{Context, Result};

use roomdesk::booking_conflict::{
    BookingConflictClient, JoinWaitingListRequest, WaitingListEntry, WaitingListQuery,
};
use roomdesk::config::Config;

use crate::WaitingListAction;

pub async fn waiting_list(config: &Config, action: WaitingListAction) -> Result<()> {
    let client = BookingConflictClient::new(super::api_client(config)?);

    match action {
        WaitingListAction::List {
            room_id,
            user_id,
            status,
            page,
            size,
        } => {
            let query = WaitingListQuery {
                room_id,
                user_id,
                status,
                page,
                size,
                ..Default::default()
            };

            let entries = client
                .query_waiting_list(&query)
                .await
                .context("Failed to list waiting-list entries")?;

            println!(
                "Waiting list (page {}, {} of {} entries)",
                entries.page,
                entries.items.len(),
                entries.total
            );
            println!("================================");
            for entry in &entries.items {
                print_entry(entry);
            }
        }

        WaitingListAction::Join {
            room_id,
            user_id,
            check_in,
            check_out,
            guest_count,
            special_requests,
        } => {
            let request = JoinWaitingListRequest {
                room_id,
                user_id,
                check_in_date: check_in,
                check_out_date: check_out,
                guest_count,
                special_requests,
                priority: None,
            };

            let entry = client
                .join_waiting_list(&request)
                .await
                .context("Failed to join waiting list")?;

            println!("Joined waiting list:");
            print_entry(&entry);
        }

        WaitingListAction::Leave { entry_id } => {
            client
                .leave_waiting_list(entry_id)
                .await
                .with_context(|| format!("Failed to leave waiting list entry {entry_id}"))?;
            println!("Entry {entry_id} removed from the waiting list");
        }

        WaitingListAction::Confirm { entry_id } => {
            let entry = client
                .confirm_waiting_list(entry_id)
                .await
                .with_context(|| format!("Failed to confirm waiting list entry {entry_id}"))?;

            println!("Entry confirmed:");
            print_entry(&entry);
        }

        WaitingListAction::Cleanup => {
            let result = client
                .cleanup_expired_entries()
                .await
                .context("Failed to clean up expired entries")?;
            println!("Cleaned up {} expired entries", result.cleaned_count);
        }
    }

    Ok(())
}

fn print_entry(entry: &WaitingListEntry) {
    println!(
        "#{} room {} user {} {}..{} {} (priority {})",
        entry.id,
        entry.room_id,
        entry.user_id,
        entry.check_in_date,
        entry.check_out_date,
        entry.status,
        entry.priority
    );
    if let Some(expires_at) = entry.expires_at {
        println!("   Expires: {}", expires_at.format("%Y-%m-%d %H:%M"));
    }
}
