//! Namespace command handlers
//!
//! Also hosts the namespace-scoped fetch shared by the webhook and secret
//! commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekhub_client::DashboardClient;
use tekhub_core::webhook::{NamespaceScope, ScopedList, WebhookForm};

use crate::config::Config;
use crate::output::report;

/// Namespace subcommands
#[derive(Subcommand)]
pub enum NamespaceCommands {
    /// List namespaces
    List,
    /// Show the pipelines, secrets and service accounts of a namespace
    Show {
        namespace: String,
    },
}

pub async fn handle_namespace_command(command: NamespaceCommands, config: &Config) -> Result<()> {
    let client = config.dashboard_client();

    match command {
        NamespaceCommands::List => {
            let namespaces = client
                .list_namespaces()
                .await
                .context("Failed to fetch namespaces")?;
            for namespace in namespaces {
                println!("  {} {}", "▸".cyan(), namespace);
            }
            Ok(())
        }
        NamespaceCommands::Show { namespace } => {
            let mut form = WebhookForm::new();
            select_namespace(&client, &mut form, &namespace).await?;

            for (title, list) in [
                ("Pipelines", ScopedList::Pipelines),
                ("Secrets", ScopedList::Secrets),
                ("Service accounts", ScopedList::ServiceAccounts),
            ] {
                println!("{}", title.bold());
                match form.list(list).items() {
                    Some([]) => println!("  {}", "(none)".dimmed()),
                    Some(items) => {
                        for item in items {
                            println!("  {} {}", "▸".cyan(), item);
                        }
                    }
                    None => println!("  {}", "(unavailable)".dimmed()),
                }
            }
            Ok(())
        }
    }
}

/// Select a namespace on the form and load everything scoped to it
///
/// Any fetch failure is reported as the form's error banner.
pub async fn select_namespace(
    client: &DashboardClient,
    form: &mut WebhookForm,
    namespace: &str,
) -> Result<()> {
    let scope = form
        .select_namespace(namespace)
        .context("A namespace must be given")?;
    load_scope(client, form, &scope).await;

    match form.notification() {
        Some(note) => report(note),
        None => Ok(()),
    }
}

/// Fetch the pipeline, secret and service account lists concurrently
async fn load_scope(client: &DashboardClient, form: &mut WebhookForm, scope: &NamespaceScope) {
    let ns = scope.namespace.as_str();
    let (pipelines, secrets, service_accounts) = tokio::join!(
        async {
            if scope.fetch_pipelines {
                Some(client.list_pipelines(ns).await)
            } else {
                None
            }
        },
        async {
            if scope.fetch_secrets {
                let secrets = client.list_secrets(ns).await;
                Some(secrets.map(|list| list.into_iter().map(|s| s.name).collect::<Vec<_>>()))
            } else {
                None
            }
        },
        async {
            if scope.fetch_service_accounts {
                Some(client.list_service_accounts(ns).await)
            } else {
                None
            }
        },
    );

    for (list, result) in [
        (ScopedList::Pipelines, pipelines),
        (ScopedList::Secrets, secrets),
        (ScopedList::ServiceAccounts, service_accounts),
    ] {
        if let Some(result) = result {
            form.list_loaded(list, scope.generation, result.map_err(|e| e.server_text()));
        }
    }
}
