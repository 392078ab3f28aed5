//! HTTP client shared by every service client
//!
//! Reads (GET) are retried on network failures, 429 and 5xx responses.
//! Writes are sent exactly once: a retried status update could race the
//! optimistic version check on the server.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use url::Url;

use super::envelope::{decode_envelope, parse_error_body, ApiResponse};
use super::error::TransportError;

// ============================================================================
// Client Configuration
// ============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform base URL, e.g. `https://hotel.example.com`
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Retry count for failed reads
    pub retry_count: u32,

    /// Delay between read retries
    pub retry_delay: Duration,

    /// User-Agent header
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
            retry_count: 2,
            retry_delay: Duration::from_millis(500),
            user_agent: format!("roomdesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set retry count
    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Set retry delay
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

// ============================================================================
// API Client
// ============================================================================

/// JSON-over-HTTP client that unwraps the platform envelope
pub struct ApiClient {
    config: ClientConfig,
    http_client: Client,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        Url::parse(&config.base_url).map_err(|e| {
            TransportError::Init(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Init(e.to_string()))?;

        let token = RwLock::new(config.token.clone());

        Ok(Self {
            config,
            http_client,
            token,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Replace the bearer token (e.g. after login or logout)
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Whether a bearer token is configured
    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// GET and unwrap `data`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        self.execute::<T, _>(Method::GET, path, self.config.retry_count, |b| b)
            .await?
            .into_data()
    }

    /// GET with query parameters and unwrap `data`
    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, TransportError>
    where
        Q: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute::<T, _>(Method::GET, path, self.config.retry_count, |b| b.query(query))
            .await?
            .into_data()
    }

    /// POST a JSON body and unwrap `data`
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute::<T, _>(Method::POST, path, 0, |b| b.json(body))
            .await?
            .into_data()
    }

    /// POST without a body and unwrap `data`
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        self.execute::<T, _>(Method::POST, path, 0, |b| b)
            .await?
            .into_data()
    }

    /// PUT a JSON body and unwrap `data`
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.put_envelope::<B, T>(path, body).await?.into_data()
    }

    /// PUT a JSON body and return the whole envelope
    ///
    /// Used by endpoints whose answer is the envelope itself
    /// (`{success, message}` without `data`).
    pub async fn put_envelope<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute::<T, _>(Method::PUT, path, 0, |b| b.json(body))
            .await
    }

    /// DELETE, succeeding when the envelope reports success
    pub async fn delete(&self, path: &str) -> Result<(), TransportError> {
        let envelope = self
            .execute::<serde_json::Value, _>(Method::DELETE, path, 0, |b| b)
            .await?;

        if envelope.success {
            Ok(())
        } else {
            let code = envelope.code_str();
            Err(TransportError::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request rejected by server".to_string()),
                code,
            })
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        match token.as_deref() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    // Internal: send with retry on recoverable failures
    async fn execute<T, F>(
        &self,
        method: Method,
        path: &str,
        retries: u32,
        decorate: F,
    ) -> Result<ApiResponse<T>, TransportError>
    where
        T: DeserializeOwned,
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path);
        let mut last_error = None;

        for attempt in 0..=retries {
            if attempt > 0 {
                tracing::debug!(attempt, url = %url, "Retrying request after delay");
                tokio::time::sleep(self.config.retry_delay).await;
            }

            tracing::debug!(method = %method, url = %url, "Sending request");
            let request = decorate(self.authorize(self.http_client.request(method.clone(), &url)));

            match Self::send_once::<T>(request).await {
                Ok(envelope) => return Ok(envelope),
                Err(e) if e.is_recoverable() && attempt < retries => {
                    tracing::warn!(attempt, url = %url, error = %e, "Request failed, will retry");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| TransportError::Network("Unknown error".to_string())))
    }

    async fn send_once<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (message, code) = parse_error_body(&body);
            return Err(TransportError::Http {
                status: status.as_u16(),
                message,
                code,
            });
        }

        decode_envelope(&body)
    }
}
