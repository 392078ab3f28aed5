pub mod conflicts;
pub mod status;
pub mod waiting_list;
pub mod watch;

use std::sync::Arc;

use roomdesk::config::Config;
use roomdesk::error::Result;
use roomdesk::room_status::{RoomStatusClient, RoomStatusCoordinator};
use roomdesk::transport::ApiClient;

// Re-export command functions for convenience
pub use conflicts::conflicts;
pub use status::{available, status};
pub use waiting_list::waiting_list;
pub use watch::watch;

/// Shared HTTP client built from the loaded configuration
pub(crate) fn api_client(config: &Config) -> Result<Arc<ApiClient>> {
    let client = ApiClient::new(config.client_config()).inspect_err(|e| {
        tracing::error!(
            base_url = %config.api.base_url,
            error = %e,
            "Failed to create API client"
        );
    })?;
    Ok(Arc::new(client))
}

pub(crate) fn coordinator(config: &Config) -> Result<RoomStatusCoordinator> {
    let api = api_client(config)?;
    Ok(RoomStatusCoordinator::new(Arc::new(RoomStatusClient::new(api))))
}
