//! Webhooks extension endpoints: webhooks and git access token secrets

use std::time::Duration;

use tokio::task::JoinSet;

use crate::error::Result;
use crate::{DashboardClient, handle_empty_response, handle_response};
use tekhub_core::domain::webhook::{Secret, Webhook, WebhookRowId};
use tekhub_core::dto::webhook::{CreateSecret, CreateWebhook, SecretRecord};
use tekhub_core::webhook::{DELETE_TIMEOUT, DeleteBatch, DeleteOutcome};

impl DashboardClient {
    // =============================================================================
    // Webhooks
    // =============================================================================

    /// List all configured webhooks
    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>> {
        let url = format!("{}/webhooks", self.extension_root());
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        handle_response(response).await
    }

    pub async fn create_webhook(&self, req: &CreateWebhook) -> Result<()> {
        let url = format!("{}/webhooks", self.extension_root());
        let response = self
            .with_csrf(self.client.post(&url))
            .await?
            .json(req)
            .send()
            .await?;

        handle_empty_response(response).await?;
        tracing::info!("Created webhook {} in {}", req.name, req.namespace);
        Ok(())
    }

    /// Delete one webhook, optionally with the pipeline runs it triggered
    pub async fn delete_webhook(
        &self,
        id: &WebhookRowId,
        delete_pipeline_runs: bool,
    ) -> Result<()> {
        let url = format!("{}/webhooks/{}", self.extension_root(), id.name);
        let mut query = vec![
            ("namespace", id.namespace.as_str()),
            ("repository", id.repository.as_str()),
        ];
        if delete_pipeline_runs {
            query.push(("deletepipelineruns", "true"));
        }

        let response = self
            .with_csrf(self.client.delete(&url))
            .await?
            .query(&query)
            .send()
            .await?;

        handle_empty_response(response).await?;
        tracing::info!("Deleted webhook {}", id);
        Ok(())
    }

    /// Delete a batch of webhooks concurrently
    ///
    /// Each delete is bounded by [`DELETE_TIMEOUT`]. Outcomes come back in
    /// batch order.
    pub async fn delete_webhooks(
        &self,
        batch: &DeleteBatch,
    ) -> Vec<(WebhookRowId, DeleteOutcome)> {
        self.delete_webhooks_within(batch, DELETE_TIMEOUT).await
    }

    pub async fn delete_webhooks_within(
        &self,
        batch: &DeleteBatch,
        timeout: Duration,
    ) -> Vec<(WebhookRowId, DeleteOutcome)> {
        let mut tasks = JoinSet::new();
        for (index, id) in batch.rows.iter().cloned().enumerate() {
            let client = self.clone();
            let delete_runs = batch.delete_pipeline_runs;
            tasks.spawn(async move {
                let outcome = match tokio::time::timeout(
                    timeout,
                    client.delete_webhook(&id, delete_runs),
                )
                .await
                {
                    Ok(Ok(())) => DeleteOutcome::Deleted,
                    Ok(Err(e)) => DeleteOutcome::Failed(e.server_text()),
                    Err(_) => {
                        tracing::warn!("Timed out deleting webhook {}", id);
                        DeleteOutcome::TimedOut
                    }
                };
                (index, outcome)
            });
        }

        let mut finished = Vec::with_capacity(batch.rows.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => finished.push(result),
                Err(e) => tracing::error!("Webhook delete task failed: {}", e),
            }
        }

        collect_outcomes(&batch.rows, finished)
    }

    // =============================================================================
    // Secrets
    // =============================================================================

    /// List git access token secrets in a namespace
    pub async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        let url = format!("{}/webhooks/credentials", self.extension_root());
        let response = self
            .client
            .get(&url)
            .query(&[("namespace", namespace)])
            .send()
            .await?;

        let records: Vec<SecretRecord> = handle_response(response).await?;
        Ok(records.into_iter().map(Secret::from).collect())
    }

    pub async fn create_secret(&self, namespace: &str, req: &CreateSecret) -> Result<()> {
        let url = format!("{}/webhooks/credentials", self.extension_root());
        let response = self
            .with_csrf(self.client.post(&url))
            .await?
            .query(&[("namespace", namespace)])
            .json(req)
            .send()
            .await?;

        handle_empty_response(response).await?;
        tracing::info!("Created secret {} in {}", req.name, namespace);
        Ok(())
    }

    pub async fn delete_secret(&self, name: &str, namespace: &str) -> Result<()> {
        let url = format!("{}/webhooks/credentials/{}", self.extension_root(), name);
        let response = self
            .with_csrf(self.client.delete(&url))
            .await?
            .query(&[("namespace", namespace)])
            .send()
            .await?;

        handle_empty_response(response).await?;
        tracing::info!("Deleted secret {} in {}", name, namespace);
        Ok(())
    }
}

/// Pair each batch row with its outcome, in batch order
///
/// A row whose task never reported back counts as failed.
fn collect_outcomes(
    rows: &[WebhookRowId],
    finished: Vec<(usize, DeleteOutcome)>,
) -> Vec<(WebhookRowId, DeleteOutcome)> {
    let mut outcomes: Vec<Option<DeleteOutcome>> = vec![None; rows.len()];
    for (index, outcome) in finished {
        if let Some(slot) = outcomes.get_mut(index) {
            *slot = Some(outcome);
        }
    }

    rows.iter()
        .cloned()
        .zip(outcomes)
        .map(|(id, outcome)| {
            let outcome = outcome.unwrap_or_else(|| {
                DeleteOutcome::Failed(format!("delete of webhook {} did not complete", id.name))
            });
            (id, outcome)
        })
        .collect()
}
