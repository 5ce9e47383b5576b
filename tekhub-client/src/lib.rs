//! Tekhub HTTP Clients
//!
//! Typed clients for the two REST backends the UI talks to:
//!
//! - [`HubClient`]: the Tekton Hub catalog API (resources, categories,
//!   ratings, upload, login)
//! - [`DashboardClient`]: the Tekton dashboard and its webhooks extension
//!   (webhooks, git secrets, namespaces, pipelines, service accounts)
//!
//! Responses are validated into `tekhub_core` domain types before they are
//! returned.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tekhub_client::{HubClient, MemoryCredentialStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(MemoryCredentialStore::new());
//!     let client = HubClient::new("http://localhost:8000", store);
//!
//!     for resource in client.list_resources().await? {
//!         println!("{} ({})", resource.name, resource.kind);
//!     }
//!     Ok(())
//! }
//! ```

pub mod credentials;
pub mod error;
mod auth;
mod catalog;
mod csrf;
mod namespaces;
mod ratings;
mod upload;
mod webhooks;

// Re-export commonly used types
pub use credentials::{CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
pub use error::{ClientError, Result};

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tekhub_core::dto::envelope::{Envelope, error_message};

/// HTTP client for the Tekton Hub catalog API
#[derive(Debug, Clone)]
pub struct HubClient {
    /// Base URL of the Hub API (e.g., "http://localhost:8000")
    base_url: String,
    client: Client,
    credentials: Arc<dyn CredentialStore>,
}

impl HubClient {
    /// Create a new Hub client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Hub API
    /// * `credentials` - Where the login token is kept
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self::with_client(base_url, Client::new(), credentials)
    }

    /// Create a new Hub client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        client: Client,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
        }
    }

    /// Get the base URL of the Hub API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Attach the stored bearer token, failing when logged out
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let credentials = self
            .credentials
            .load()?
            .ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(credentials.token))
    }

    /// Hub id of the logged-in user, `None` when logged out or unknown
    pub fn user_id(&self) -> Result<Option<u64>> {
        Ok(self.credentials.load()?.and_then(|c| c.user_id))
    }
}

/// HTTP client for the Tekton dashboard and its webhooks extension
///
/// The dashboard serves its own API under `/v1` and proxies the extension
/// under `/v1/extensions/webhooks-extension`.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    /// Base URL of the dashboard (e.g., "http://localhost:9097")
    base_url: String,
    client: Client,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new dashboard client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Root of the dashboard's own API
    fn api_root(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    /// Root of the webhooks extension API
    fn extension_root(&self) -> String {
        format!("{}/v1/extensions/webhooks-extension", self.base_url)
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Check the status code and deserialize the JSON body
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Unwrap the `data` member of a Hub envelope
async fn handle_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let envelope: Envelope<T> = handle_response(response).await?;
    Ok(envelope.data)
}

/// Handle a response whose body is not needed (e.g., DELETE operations)
async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    check_status(response).await?;
    Ok(())
}

/// Turn a non-2xx response into [`ClientError::ApiError`]
///
/// The message is the first error detail of a Hub envelope, else the raw body,
/// else the HTTP status reason.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    tracing::debug!("Request failed with {}: {}", status, message);
    Err(ClientError::api_error(status.as_u16(), message))
}
