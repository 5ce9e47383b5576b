//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod auth;
mod namespace;
mod rating;
mod resource;
mod secret;
mod webhook;

pub use namespace::NamespaceCommands;
pub use rating::RatingCommands;
pub use resource::ResourceCommands;
pub use secret::SecretCommands;
pub use webhook::WebhookCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Browse and manage catalog resources
    Resource {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// List catalog categories
    Categories,
    /// Rate resources
    Rating {
        #[command(subcommand)]
        command: RatingCommands,
    },
    /// Log in with a GitHub OAuth code
    Login {
        /// Authorization code returned by GitHub
        #[arg(long)]
        code: String,
    },
    /// Forget the stored login token
    Logout,
    /// Webhook management
    Webhook {
        #[command(subcommand)]
        command: WebhookCommands,
    },
    /// Git access token secrets
    Secret {
        #[command(subcommand)]
        command: SecretCommands,
    },
    /// Namespaces and their pipelines and service accounts
    Namespace {
        #[command(subcommand)]
        command: NamespaceCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Resource { command } => resource::handle_resource_command(command, config).await,
        Commands::Categories => resource::list_categories(config).await,
        Commands::Rating { command } => rating::handle_rating_command(command, config).await,
        Commands::Login { code } => auth::login(config, &code).await,
        Commands::Logout => auth::logout(config),
        Commands::Webhook { command } => webhook::handle_webhook_command(command, config).await,
        Commands::Secret { command } => secret::handle_secret_command(command, config).await,
        Commands::Namespace { command } => {
            namespace::handle_namespace_command(command, config).await
        }
    }
}
