//! Webhook domain types
//!
//! A webhook binds a git repository to a pipeline run in a namespace. The
//! dashboard extension serializes these with flat lowercase field names.

use serde::{Deserialize, Serialize};

/// A configured webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "gitrepositoryurl")]
    pub git_repository_url: String,
    pub pipeline: String,
    #[serde(rename = "serviceaccount", default)]
    pub service_account: String,
    #[serde(rename = "dockerregistry", default)]
    pub docker_registry: String,
    /// Name of the secret holding the git access token
    #[serde(rename = "accesstoken")]
    pub access_token: String,
}

impl Webhook {
    /// Composite identifier used by the webhook table
    pub fn row_id(&self) -> WebhookRowId {
        WebhookRowId {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            repository: self.git_repository_url.clone(),
        }
    }
}

/// Table row identifier, rendered as `name|namespace|repository`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WebhookRowId {
    pub name: String,
    pub namespace: String,
    pub repository: String,
}

impl WebhookRowId {
    /// Parse a `name|namespace|repository` row id
    ///
    /// Only the first and last `|` are significant; the namespace is
    /// everything between them.
    pub fn parse(id: &str) -> Option<Self> {
        let first = id.find('|')?;
        let last = id.rfind('|')?;
        if first == last {
            return None;
        }
        Some(Self {
            name: id[..first].to_string(),
            namespace: id[first + 1..last].to_string(),
            repository: id[last + 1..].to_string(),
        })
    }
}

impl std::fmt::Display for WebhookRowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.name, self.namespace, self.repository)
    }
}

/// A stored credential referenced by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
}
