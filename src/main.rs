use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomdesk::booking_conflict::WaitingListStatus;
use roomdesk::config::Config;
use roomdesk::error::category_of;
use roomdesk::room_status::{RoomId, RoomStatus};

mod commands;

#[derive(Parser)]
#[command(
    name = "roomdesk",
    version,
    about = "Front-desk client for the hotel platform: room status, availability and waiting lists",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML config file; environment variables are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Room status operations
    Status {
        #[command(subcommand)]
        action: StatusAction,
    },

    /// Check availability of one or more rooms
    Available {
        /// Room IDs
        #[arg(required = true)]
        room_ids: Vec<RoomId>,
    },

    /// Booking conflict detection and statistics
    Conflicts {
        #[command(subcommand)]
        action: ConflictAction,
    },

    /// Waiting-list operations
    WaitingList {
        #[command(subcommand)]
        action: WaitingListAction,
    },

    /// Poll rooms and print status changes until interrupted
    Watch {
        /// Room IDs to watch
        #[arg(required = true)]
        room_ids: Vec<RoomId>,

        /// Override poll interval in seconds
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum StatusAction {
    /// Change a room's status
    Set {
        /// Room ID
        room_id: RoomId,

        /// New status (AVAILABLE, OCCUPIED, MAINTENANCE, CLEANING)
        status: RoomStatus,

        /// Reason recorded in the status log
        #[arg(short, long)]
        reason: String,

        /// Related order
        #[arg(long)]
        order_id: Option<i64>,

        /// Version last observed for the room
        #[arg(long)]
        expected_version: Option<u64>,

        /// Current status; when given, the transition is validated locally first
        #[arg(long)]
        from: Option<RoomStatus>,
    },

    /// Paginated status history
    Logs {
        /// Room ID
        room_id: RoomId,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "20")]
        size: u32,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },

    /// Most recent status changes
    Recent {
        /// Room ID
        room_id: RoomId,

        /// Number of entries
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Check a transition against the transition table (offline)
    Check {
        /// Current status
        current: String,

        /// Next status
        next: String,
    },
}

#[derive(Subcommand)]
pub enum ConflictAction {
    /// Ask whether a stay collides with existing bookings
    Detect {
        #[arg(long)]
        room_id: RoomId,

        #[arg(long)]
        user_id: i64,

        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: NaiveDate,

        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: NaiveDate,
    },

    /// Aggregate conflict statistics
    Stats {
        #[arg(long)]
        start_date: Option<NaiveDate>,

        #[arg(long)]
        end_date: Option<NaiveDate>,
    },

    /// Rooms with the most conflicts
    Hotspots {
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// List recorded conflicts
    List {
        #[arg(long)]
        room_id: Option<RoomId>,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "20")]
        size: u32,
    },
}

#[derive(Subcommand)]
pub enum WaitingListAction {
    /// List waiting-list entries
    List {
        #[arg(long)]
        room_id: Option<RoomId>,

        #[arg(long)]
        user_id: Option<i64>,

        #[arg(long)]
        status: Option<WaitingListStatus>,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "20")]
        size: u32,
    },

    /// Queue a user for an unavailable room
    Join {
        #[arg(long)]
        room_id: RoomId,

        #[arg(long)]
        user_id: i64,

        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: NaiveDate,

        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: NaiveDate,

        #[arg(long)]
        guest_count: Option<u32>,

        #[arg(long)]
        special_requests: Option<String>,
    },

    /// Remove an entry
    Leave {
        /// Entry ID
        entry_id: i64,
    },

    /// Confirm a notified entry
    Confirm {
        /// Entry ID
        entry_id: i64,
    },

    /// Expire stale entries
    Cleanup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());

    // Initialize tracing/logging
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::debug!(base_url = %config.api.base_url, "roomdesk starting");

    if let Err(err) = run(&config, cli.command).await {
        tracing::error!(category = category_of(&err).label(), "Command failed: {err:#}");
        return Err(err);
    }

    Ok(())
}

async fn run(config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Status { action } => commands::status(config, action).await?,
        Commands::Available { room_ids } => {
            tracing::info!(rooms = ?room_ids, "Starting availability check");
            commands::available(config, room_ids).await?;
        }
        Commands::Conflicts { action } => commands::conflicts(config, action).await?,
        Commands::WaitingList { action } => commands::waiting_list(config, action).await?,
        Commands::Watch { room_ids, interval } => {
            tracing::info!(rooms = ?room_ids, interval = ?interval, "Starting watch command");
            commands::watch(config, room_ids, interval).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("roomdesk=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("roomdesk={level},warn"))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("roomdesk=info,warn"))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
