//! Webhook table
//!
//! Lists the configured webhooks, tracks row selection and drives the batch
//! delete dialog. Deletes themselves are issued by the caller; the table only
//! decides what to delete and how to report the combined outcome.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::domain::notification::Notification;
use crate::domain::webhook::{Webhook, WebhookRowId};

/// Upper bound on a single webhook delete (pipeline run cleanup can be slow)
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(120);

/// Result of deleting one webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed(String),
    TimedOut,
}

/// Rows to delete once the dialog is confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteBatch {
    pub rows: Vec<WebhookRowId>,
    pub delete_pipeline_runs: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WebhookTable {
    webhooks: Option<Vec<Webhook>>,
    selected: BTreeSet<WebhookRowId>,
    show_delete_dialog: bool,
    delete_pipeline_runs: bool,
    last_webhook_deleted: bool,
    notification: Option<Notification>,
}

impl WebhookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded webhooks; `None` while loading
    pub fn webhooks(&self) -> Option<&[Webhook]> {
        self.webhooks.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.webhooks.as_ref().is_none_or(|w| w.is_empty())
    }

    pub fn webhooks_loaded(&mut self, result: Result<Vec<Webhook>, String>) {
        match result {
            Ok(webhooks) => {
                let ids: BTreeSet<_> = webhooks.iter().map(Webhook::row_id).collect();
                self.selected.retain(|id| ids.contains(id));
                self.webhooks = Some(webhooks);
            }
            Err(text) => {
                self.webhooks = Some(Vec::new());
                self.notification = Some(Notification::error(format!(
                    "Failure occurred fetching webhooks, error returned from the REST endpoint was : {}",
                    text
                )));
            }
        }
    }

    /// Show the banner for a webhook created on the form page
    pub fn show_created_notification(&mut self) {
        self.last_webhook_deleted = false;
        self.notification = Some(Notification::success("Webhook created successfully."));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected(&self) -> impl Iterator<Item = &WebhookRowId> {
        self.selected.iter()
    }

    pub fn is_selected(&self, id: &WebhookRowId) -> bool {
        self.selected.contains(id)
    }

    /// Select or deselect a row; unknown rows are ignored
    pub fn select(&mut self, id: WebhookRowId, selected: bool) -> bool {
        let known = self
            .webhooks
            .as_ref()
            .is_some_and(|w| w.iter().any(|h| h.row_id() == id));
        if !known {
            tracing::debug!("Ignoring selection of unknown row {}", id);
            return false;
        }
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
        true
    }

    pub fn select_all(&mut self, selected: bool) {
        self.selected.clear();
        if selected {
            if let Some(webhooks) = &self.webhooks {
                self.selected.extend(webhooks.iter().map(Webhook::row_id));
            }
        }
    }

    // =========================================================================
    // Delete dialog
    // =========================================================================

    pub fn delete_dialog_open(&self) -> bool {
        self.show_delete_dialog
    }

    pub fn delete_pipeline_runs(&self) -> bool {
        self.delete_pipeline_runs
    }

    /// Open the delete dialog; with nothing selected shows an error instead
    pub fn request_delete(&mut self) -> bool {
        if self.selected.is_empty() {
            self.notification = Some(Notification::error(
                "Error occurred deleting webhooks - no webhook was selected in the table.",
            ));
            return false;
        }
        self.show_delete_dialog = true;
        self.delete_pipeline_runs = false;
        true
    }

    pub fn set_delete_pipeline_runs(&mut self, value: bool) {
        self.delete_pipeline_runs = value;
    }

    pub fn cancel_delete(&mut self) {
        self.show_delete_dialog = false;
        self.delete_pipeline_runs = false;
    }

    pub fn confirm_delete(&mut self) -> Option<DeleteBatch> {
        if !self.show_delete_dialog || self.selected.is_empty() {
            return None;
        }
        self.show_delete_dialog = false;
        Some(DeleteBatch {
            rows: self.selected.iter().cloned().collect(),
            delete_pipeline_runs: std::mem::take(&mut self.delete_pipeline_runs),
        })
    }

    /// Apply the outcome of a delete batch
    ///
    /// Successfully deleted rows are removed. A timeout anywhere in the batch
    /// reports a warning, otherwise any failure reports an error.
    pub fn finish_delete(&mut self, results: &[(WebhookRowId, DeleteOutcome)]) {
        for (id, outcome) in results {
            if *outcome == DeleteOutcome::Deleted {
                self.selected.remove(id);
                if let Some(webhooks) = self.webhooks.as_mut() {
                    webhooks.retain(|w| w.row_id() != *id);
                }
            }
        }

        let timed_out = results
            .iter()
            .any(|(_, o)| *o == DeleteOutcome::TimedOut);
        let failed = results
            .iter()
            .any(|(_, o)| matches!(o, DeleteOutcome::Failed(_)));

        self.notification = Some(if timed_out {
            Notification::warning(
                "Warning - timed out waiting to delete webhooks and potentially PipelineRuns: manually check the resources were deleted.",
                "",
            )
        } else if failed {
            for (id, outcome) in results {
                if let DeleteOutcome::Failed(text) = outcome {
                    tracing::warn!("Failed to delete webhook {}: {}", id, text);
                }
            }
            Notification {
                title: "An error occurred deleting webhook(s).".to_string(),
                message: "Check the webhook(s) existed and both the dashboard and extension pods are healthy.".to_string(),
                ..Notification::error("")
            }
        } else {
            self.last_webhook_deleted = self.is_empty();
            Notification::success("Webhook(s) deleted successfully.")
        });
    }

    /// The last remaining webhook was just deleted
    pub fn last_webhook_deleted(&self) -> bool {
        self.last_webhook_deleted
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}
