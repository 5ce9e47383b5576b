//! Webhook command handlers
//!
//! Creation goes through the same form state machine the dashboard page
//! uses, and deletion through the webhook table.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekhub_client::DashboardClient;
use tekhub_core::domain::webhook::{Webhook, WebhookRowId};
use tekhub_core::webhook::{FormField, FormPhase, ScopedList, WebhookForm, WebhookTable};

use crate::commands::namespace::select_namespace;
use crate::config::Config;
use crate::output::report;

/// Webhook subcommands
#[derive(Subcommand)]
pub enum WebhookCommands {
    /// List configured webhooks
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a webhook
    Create {
        /// Webhook name (lowercase letters, digits, '.' and '-')
        #[arg(long)]
        name: String,

        /// Git repository URL
        #[arg(long)]
        repository: String,

        /// Namespace the pipeline runs in
        #[arg(short, long)]
        namespace: String,

        /// Pipeline to trigger
        #[arg(short, long)]
        pipeline: String,

        /// Secret holding the git access token
        #[arg(short, long)]
        secret: String,

        /// Service account the pipeline runs as
        #[arg(long)]
        service_account: String,

        /// Docker registry images are pushed to
        #[arg(long)]
        docker_registry: String,
    },
    /// Delete webhooks
    Delete {
        /// Webhook name, or `name|namespace|repository` row id
        rows: Vec<String>,

        /// Delete every webhook
        #[arg(long, conflicts_with = "rows")]
        all: bool,

        /// Also delete the pipeline runs the webhooks triggered
        #[arg(long)]
        delete_pipeline_runs: bool,
    },
}

pub async fn handle_webhook_command(command: WebhookCommands, config: &Config) -> Result<()> {
    let client = config.dashboard_client();

    match command {
        WebhookCommands::List { json } => list_webhooks(&client, json).await,
        WebhookCommands::Create {
            name,
            repository,
            namespace,
            pipeline,
            secret,
            service_account,
            docker_registry,
        } => {
            let mut form = WebhookForm::new();
            form.set(FormField::Name, name);
            form.set(FormField::Repository, repository);
            form.set(FormField::DockerRegistry, docker_registry);
            create_webhook(&client, &mut form, &namespace, &pipeline, &secret, &service_account)
                .await
        }
        WebhookCommands::Delete {
            rows,
            all,
            delete_pipeline_runs,
        } => delete_webhooks(&client, &rows, all, delete_pipeline_runs).await,
    }
}

async fn load_table(client: &DashboardClient) -> Result<WebhookTable> {
    let mut table = WebhookTable::new();
    table.webhooks_loaded(client.list_webhooks().await.map_err(|e| e.server_text()));
    if let Some(note) = table.notification() {
        report(note)?;
    }
    Ok(table)
}

async fn list_webhooks(client: &DashboardClient, json: bool) -> Result<()> {
    let table = load_table(client).await?;
    let webhooks = table.webhooks().unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(webhooks)?);
        return Ok(());
    }

    if webhooks.is_empty() {
        println!("{}", "No webhooks configured.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} webhook(s):", webhooks.len()).bold());
    println!();
    for webhook in webhooks {
        print_webhook(webhook);
    }
    Ok(())
}

fn print_webhook(webhook: &Webhook) {
    println!("  {} {}", "▸".cyan(), webhook.name.bold());
    println!("    Repository:      {}", webhook.git_repository_url);
    println!("    Pipeline:        {}/{}", webhook.namespace, webhook.pipeline);
    println!("    Service account: {}", webhook.service_account);
    println!("    Registry:        {}", webhook.docker_registry);
    println!("    Row ID:          {}", webhook.row_id().to_string().dimmed());
}

async fn create_webhook(
    client: &DashboardClient,
    form: &mut WebhookForm,
    namespace: &str,
    pipeline: &str,
    secret: &str,
    service_account: &str,
) -> Result<()> {
    form.namespaces_loaded(client.list_namespaces().await.map_err(|e| e.server_text()));
    if let Some(note) = form.notification() {
        report(note)?;
    }
    let known = form
        .namespaces()
        .items()
        .is_some_and(|items| items.iter().any(|n| n == namespace));
    if !known {
        anyhow::bail!("Namespace '{}' not found", namespace);
    }

    select_namespace(client, form, namespace).await?;

    for (field, list, value) in [
        (FormField::Pipeline, ScopedList::Pipelines, pipeline),
        (FormField::GitSecret, ScopedList::Secrets, secret),
        (FormField::ServiceAccount, ScopedList::ServiceAccounts, service_account),
    ] {
        choose(form, field, list, value)?;
    }

    let req = form.begin_submit()?;
    tracing::debug!("Creating webhook {:?}", req.name);
    form.finish_submit(client.create_webhook(&req).await.map_err(|e| e.server_text()));

    if form.phase() == FormPhase::Success {
        let mut table = WebhookTable::new();
        table.show_created_notification();
        if let Some(note) = table.notification() {
            report(note)?;
        }
        return Ok(());
    }

    match form.notification() {
        Some(note) => report(note),
        None => Ok(()),
    }
}

/// Pick a dropdown value, which must be one of the listed options
fn choose(form: &mut WebhookForm, field: FormField, list: ScopedList, value: &str) -> Result<()> {
    let listed = form
        .list(list)
        .items()
        .is_some_and(|items| items.iter().any(|i| i == value));
    if !listed {
        anyhow::bail!(
            "No {} named '{}' in namespace {}",
            field.label(),
            value,
            form.value(FormField::Namespace)
        );
    }
    form.set(field, value);
    Ok(())
}

/// Resolve a row argument against the loaded table
fn resolve_row(webhooks: &[Webhook], arg: &str) -> Result<WebhookRowId> {
    if let Some(id) = WebhookRowId::parse(arg) {
        return Ok(id);
    }

    let mut matches = webhooks.iter().filter(|w| w.name == arg);
    let first = matches
        .next()
        .with_context(|| format!("No webhook named '{}'", arg))?;
    if matches.next().is_some() {
        anyhow::bail!(
            "Webhook name '{}' is ambiguous; pass the row id (name|namespace|repository)",
            arg
        );
    }
    Ok(first.row_id())
}

async fn delete_webhooks(
    client: &DashboardClient,
    rows: &[String],
    all: bool,
    delete_pipeline_runs: bool,
) -> Result<()> {
    let mut table = load_table(client).await?;

    if all {
        table.select_all(true);
    } else {
        let webhooks = table.webhooks().unwrap_or_default().to_vec();
        for arg in rows {
            let id = resolve_row(&webhooks, arg)?;
            if !table.select(id.clone(), true) {
                anyhow::bail!("No webhook with row id '{}'", id);
            }
        }
    }

    if !table.request_delete() {
        if let Some(note) = table.notification() {
            report(note)?;
        }
        return Ok(());
    }
    table.set_delete_pipeline_runs(delete_pipeline_runs);

    let Some(batch) = table.confirm_delete() else {
        return Ok(());
    };

    println!(
        "Deleting {} webhook(s){}...",
        batch.rows.len(),
        if batch.delete_pipeline_runs {
            " and their pipeline runs"
        } else {
            ""
        }
    );
    let results = client.delete_webhooks(&batch).await;
    table.finish_delete(&results);

    if let Some(note) = table.notification() {
        report(note)?;
    }
    if table.last_webhook_deleted() {
        println!("{}", "No webhooks remain.".dimmed());
    }
    Ok(())
}
