//! Dashboard Kubernetes listings used by the webhook form dropdowns

use crate::error::Result;
use crate::{DashboardClient, handle_response};
use tekhub_core::dto::webhook::KubeList;

impl DashboardClient {
    async fn list_names(&self, url: String) -> Result<Vec<String>> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let list: KubeList = handle_response(response).await?;
        Ok(list.names())
    }

    pub async fn list_namespaces(&self) -> Result<Vec<String>> {
        self.list_names(format!("{}/namespaces", self.api_root())).await
    }

    pub async fn list_pipelines(&self, namespace: &str) -> Result<Vec<String>> {
        self.list_names(format!("{}/namespaces/{}/pipelines", self.api_root(), namespace))
            .await
    }

    pub async fn list_service_accounts(&self, namespace: &str) -> Result<Vec<String>> {
        self.list_names(format!(
            "{}/namespaces/{}/serviceaccounts",
            self.api_root(),
            namespace
        ))
        .await
    }
}
