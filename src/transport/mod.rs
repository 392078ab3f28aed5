//! HTTP transport for the hotel platform API
//!
//! Every service client (room status, booking conflicts) goes through a
//! single [`ApiClient`], which owns the base URL, bearer token, timeout,
//! read-retry policy and the `{success, data, message?, code?}` envelope.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{ApiClient, ClientConfig};
pub use envelope::{ApiResponse, Page};
pub use error::TransportError;
