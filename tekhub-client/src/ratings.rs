//! Rating endpoints (authenticated)

use crate::error::Result;
use crate::{HubClient, handle_envelope};
use tekhub_core::dto::rating::{AverageRating, UpdateRating, UserRating};

impl HubClient {
    /// The current user's rating of a resource, `0` if not rated yet
    pub async fn get_rating(&self, resource_id: u32) -> Result<u8> {
        let url = format!("{}/resource/{}/rating", self.base_url, resource_id);
        let response = self.authorized(self.client.get(&url))?.send().await?;

        let rating: UserRating = handle_envelope(response).await?;
        Ok(rating.rating)
    }

    /// Rate a resource and return its new average
    pub async fn rate(&self, resource_id: u32, req: UpdateRating) -> Result<f64> {
        let url = format!("{}/resource/{}/rating", self.base_url, resource_id);
        let response = self
            .authorized(self.client.put(&url))?
            .json(&req)
            .send()
            .await?;

        let average: AverageRating = handle_envelope(response).await?;
        tracing::info!(
            "Rated resource {} with {} (average now {:.1})",
            resource_id,
            req.rating,
            average.avg_rating
        );
        Ok(average.avg_rating)
    }
}
