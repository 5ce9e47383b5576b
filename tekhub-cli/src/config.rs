//! Configuration module
//!
//! Handles CLI configuration: backend URLs and where the login token lives.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tekhub_client::{CredentialStore, DashboardClient, FileCredentialStore, HubClient};

pub const DEFAULT_HUB_URL: &str = "http://localhost:8000";
pub const DEFAULT_DASHBOARD_URL: &str = "http://localhost:9097";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Hub catalog API
    pub hub_url: String,
    /// URL of the Tekton dashboard
    pub dashboard_url: String,
    /// Login token file
    pub credentials_path: PathBuf,
}

impl Config {
    /// Build a configuration, resolving the default credentials path
    pub fn new(
        hub_url: String,
        dashboard_url: String,
        credentials_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let credentials_path = match credentials_path {
            Some(path) => path,
            None => FileCredentialStore::default_path()
                .context("No config directory found; pass --credentials")?,
        };

        Ok(Self {
            hub_url,
            dashboard_url,
            credentials_path,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_url("hub_url", &self.hub_url)?;
        validate_url("dashboard_url", &self.dashboard_url)?;

        if self.credentials_path.as_os_str().is_empty() {
            anyhow::bail!("credentials path cannot be empty");
        }

        Ok(())
    }

    pub fn credential_store(&self) -> Arc<dyn CredentialStore> {
        Arc::new(FileCredentialStore::new(&self.credentials_path))
    }

    pub fn hub_client(&self) -> HubClient {
        HubClient::new(&self.hub_url, self.credential_store())
    }

    pub fn dashboard_client(&self) -> DashboardClient {
        DashboardClient::new(&self.dashboard_url)
    }
}

fn validate_url(name: &str, url: &str) -> anyhow::Result<()> {
    if url.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new(
            DEFAULT_HUB_URL.to_string(),
            DEFAULT_DASHBOARD_URL.to_string(),
            Some(PathBuf::from("/tmp/tekhub/credentials.json")),
        )
        .unwrap()
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid URL should fail
        config.hub_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.hub_url = DEFAULT_HUB_URL.to_string();
        config.dashboard_url = String::new();
        assert!(config.validate().is_err());

        config.dashboard_url = "https://dashboard.example".to_string();
        assert!(config.validate().is_ok());

        config.credentials_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_credentials_path_is_kept() {
        assert_eq!(
            config().credentials_path,
            PathBuf::from("/tmp/tekhub/credentials.json")
        );
    }

    #[test]
    fn test_clients_use_configured_urls() {
        let config = config();
        assert_eq!(config.hub_client().base_url(), DEFAULT_HUB_URL);
        assert_eq!(config.dashboard_client().base_url(), DEFAULT_DASHBOARD_URL);
    }
}
