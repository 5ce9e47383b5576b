//! Git access token secret command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekhub_client::DashboardClient;
use tekhub_core::webhook::{FormField, ScopedList, WebhookForm};

use crate::commands::namespace::select_namespace;
use crate::config::Config;
use crate::output::report;

/// Secret subcommands
#[derive(Subcommand)]
pub enum SecretCommands {
    /// List access token secrets in a namespace
    List {
        #[arg(short, long)]
        namespace: String,
    },
    /// Create an access token secret
    Create {
        #[arg(short, long)]
        namespace: String,

        #[arg(long)]
        name: String,

        /// Git access token
        #[arg(long, env = "TEKHUB_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Delete an access token secret
    Delete {
        #[arg(short, long)]
        namespace: String,

        #[arg(long)]
        name: String,
    },
}

pub async fn handle_secret_command(command: SecretCommands, config: &Config) -> Result<()> {
    let client = config.dashboard_client();
    let mut form = WebhookForm::new();

    match command {
        SecretCommands::List { namespace } => {
            select_namespace(&client, &mut form, &namespace).await?;
            let secrets = form.list(ScopedList::Secrets).items().unwrap_or_default();
            if secrets.is_empty() {
                println!("{}", format!("No secrets in {}.", namespace).yellow());
            }
            for secret in secrets {
                println!("  {} {}", "▸".cyan(), secret);
            }
            Ok(())
        }
        SecretCommands::Create {
            namespace,
            name,
            token,
        } => create_secret(&client, &mut form, &namespace, name, token).await,
        SecretCommands::Delete { namespace, name } => {
            delete_secret(&client, &mut form, &namespace, &name).await
        }
    }
}

async fn create_secret(
    client: &DashboardClient,
    form: &mut WebhookForm,
    namespace: &str,
    name: String,
    token: String,
) -> Result<()> {
    form.select_namespace(namespace)
        .context("A namespace must be given")?;
    form.toggle_create_secret_dialog();
    form.set_new_secret(name, token);

    let (req, namespace) = form
        .begin_create_secret()
        .context("Both a secret name and an access token are required")?;
    let result = client
        .create_secret(&namespace, &req)
        .await
        .map_err(|e| e.server_text());
    form.finish_create_secret(result);

    match form.notification() {
        Some(note) => report(note),
        None => Ok(()),
    }
}

async fn delete_secret(
    client: &DashboardClient,
    form: &mut WebhookForm,
    namespace: &str,
    name: &str,
) -> Result<()> {
    select_namespace(client, form, namespace).await?;

    let listed = form
        .list(ScopedList::Secrets)
        .items()
        .is_some_and(|items| items.iter().any(|s| s == name));
    if !listed {
        anyhow::bail!("No secret named '{}' in namespace {}", name, namespace);
    }
    form.set(FormField::GitSecret, name);

    if !form.request_delete_secret() {
        return match form.notification() {
            Some(note) => report(note),
            None => Ok(()),
        };
    }

    let Some((secret, namespace)) = form.confirm_delete_secret() else {
        return Ok(());
    };
    let result = client
        .delete_secret(&secret, &namespace)
        .await
        .map_err(|e| e.server_text());
    form.finish_delete_secret(&secret, result);

    match form.notification() {
        Some(note) => report(note),
        None => Ok(()),
    }
}
