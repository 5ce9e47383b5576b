//! Catalog browsing endpoints

use serde::Deserialize;

use crate::error::Result;
use crate::{HubClient, handle_empty_response, handle_envelope, handle_response};
use tekhub_core::domain::category::Category;
use tekhub_core::domain::resource::{Resource, ResourceVersion};
use tekhub_core::dto::category::CategoryRecord;
use tekhub_core::dto::resource::{ResourceRecord, VersionList};

impl HubClient {
    // =============================================================================
    // Resources
    // =============================================================================

    /// List every resource in the catalog
    ///
    /// Records that fail validation are skipped with a warning so one bad
    /// entry does not hide the whole catalog.
    pub async fn list_resources(&self) -> Result<Vec<Resource>> {
        let url = format!("{}/resources", self.base_url);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let records: Vec<ResourceRecord> = handle_envelope(response).await?;
        Ok(valid_resources(records))
    }

    /// List the resources uploaded by a user
    ///
    /// Invalid records are skipped the same way as in [`HubClient::list_resources`].
    pub async fn list_user_resources(&self, user_id: u64) -> Result<Vec<Resource>> {
        let url = format!("{}/resources/user/{}", self.base_url, user_id);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let records = match handle_response::<ResourceList>(response).await? {
            ResourceList::Wrapped { data } => data,
            ResourceList::Bare(records) => records,
        };
        Ok(valid_resources(records))
    }

    /// List the published versions of a resource
    pub async fn list_versions(&self, resource_id: u32) -> Result<Vec<ResourceVersion>> {
        let url = format!("{}/resource/{}/versions", self.base_url, resource_id);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let list: VersionList = handle_envelope(response).await?;
        list.versions
            .into_iter()
            .map(|v| ResourceVersion::try_from(v).map_err(Into::into))
            .collect()
    }

    /// Delete a resource (authenticated)
    pub async fn delete_resource(&self, resource_id: u32) -> Result<()> {
        let url = format!("{}/resource/{}", self.base_url, resource_id);
        let response = self.authorized(self.client.delete(&url))?.send().await?;

        handle_empty_response(response).await?;
        tracing::info!("Deleted resource {}", resource_id);
        Ok(())
    }

    // =============================================================================
    // Categories
    // =============================================================================

    /// List catalog categories with their tags
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let url = format!("{}/categories", self.base_url);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let records: Vec<CategoryRecord> = handle_envelope(response).await?;
        records
            .into_iter()
            .map(|c| Category::try_from(c).map_err(Into::into))
            .collect()
    }
}

/// The per-user listing is served both bare and inside the envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum ResourceList {
    Wrapped { data: Vec<ResourceRecord> },
    Bare(Vec<ResourceRecord>),
}

fn valid_resources(records: Vec<ResourceRecord>) -> Vec<Resource> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id;
            Resource::try_from(record)
                .inspect_err(|e| tracing::warn!("Skipping resource {}: {}", id, e))
                .ok()
        })
        .collect()
}
