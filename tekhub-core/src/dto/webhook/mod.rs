//! Webhook DTOs for the dashboard webhooks API

use serde::{Deserialize, Serialize};

use crate::domain::webhook::{Secret, Webhook};

/// Body of `POST /webhooks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebhook {
    pub name: String,
    #[serde(rename = "gitrepositoryurl")]
    pub git_repository_url: String,
    #[serde(rename = "accesstoken")]
    pub access_token: String,
    pub pipeline: String,
    pub namespace: String,
    #[serde(rename = "serviceaccount")]
    pub service_account: String,
    #[serde(rename = "dockerregistry")]
    pub docker_registry: String,
}

impl From<CreateWebhook> for Webhook {
    fn from(req: CreateWebhook) -> Self {
        Webhook {
            name: req.name,
            namespace: req.namespace,
            git_repository_url: req.git_repository_url,
            pipeline: req.pipeline,
            service_account: req.service_account,
            docker_registry: req.docker_registry,
            access_token: req.access_token,
        }
    }
}

/// Body of `POST /webhooks/credentials`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSecret {
    pub name: String,
    #[serde(rename = "accesstoken")]
    pub access_token: String,
}

/// Secret entry as listed by `GET /webhooks/credentials`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl From<SecretRecord> for Secret {
    fn from(record: SecretRecord) -> Self {
        Secret { name: record.name }
    }
}

/// Object metadata of a Kubernetes list item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

/// Kubernetes list item, only the metadata is read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub metadata: ObjectMeta,
}

/// Kubernetes list as proxied by the dashboard
/// (namespaces, pipelines, service accounts)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KubeList {
    #[serde(default)]
    pub items: Vec<ListItem>,
}

impl KubeList {
    /// Names of the listed objects, in server order
    pub fn names(self) -> Vec<String> {
        self.items.into_iter().map(|i| i.metadata.name).collect()
    }
}
