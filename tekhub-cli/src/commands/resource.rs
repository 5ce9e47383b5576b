//! Resource command handlers
//!
//! Browsing the catalog (filter, search, sort), resource details, the
//! user's own uploads, upload and deletion.
//!
//! Mutations are applied to a loaded catalog store, whose notification is
//! what the command reports.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekhub_client::{ClientError, HubClient};
use tekhub_core::catalog::{FilterGroup, SortKey, select_version};
use tekhub_core::domain::notification::Notification;
use tekhub_core::domain::resource::{Resource, ResourceKind};
use tekhub_core::dto::upload::UploadRequest;
use tekhub_core::store::{Action, Fetch, Store};

use crate::config::Config;
use crate::output::{print_resource_summary, print_version_details, report_state};

/// Resource subcommands
#[derive(Subcommand)]
pub enum ResourceCommands {
    /// List catalog resources
    List {
        /// Only this kind (task, pipeline); repeatable
        #[arg(short, long)]
        kind: Vec<String>,

        /// Only this catalog tier (official, verified, community); repeatable
        #[arg(short, long)]
        tier: Vec<String>,

        /// Only resources tagged for this category; repeatable
        #[arg(short, long)]
        category: Vec<String>,

        /// Case-insensitive text to look for in names
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order (name, rating)
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show resource details
    Show {
        /// Resource name or numeric ID
        resource: String,

        /// Version to show instead of the latest
        #[arg(short, long)]
        version: Option<String>,
    },
    /// List the resources you uploaded
    Mine,
    /// Upload a resource definition
    Upload {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// task or pipeline
        #[arg(short, long, default_value = "task")]
        kind: ResourceKind,

        /// Tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Link to the YAML definition on GitHub
        #[arg(short, long)]
        github: String,
    },
    /// Delete a resource you uploaded
    Delete {
        /// Resource ID
        id: u32,
    },
}

/// Handle resource commands
pub async fn handle_resource_command(command: ResourceCommands, config: &Config) -> Result<()> {
    let client = config.hub_client();

    match command {
        ResourceCommands::List {
            kind,
            tier,
            category,
            search,
            sort,
            json,
        } => {
            let mut store = load_catalog(&client).await?;
            apply_selection(&mut store, FilterGroup::Kind, &kind)?;
            apply_selection(&mut store, FilterGroup::Tier, &tier)?;
            apply_selection(&mut store, FilterGroup::Category, &category)?;
            store.dispatch(Action::SetSearch(search));
            store.dispatch(Action::SetSort(sort));
            if json {
                let displayed = store.displayed().unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(displayed)?);
            } else {
                print_catalog(&store);
            }
            Ok(())
        }
        ResourceCommands::Show { resource, version } => {
            show_resource(&client, &resource, version.as_deref()).await
        }
        ResourceCommands::Mine => list_my_resources(&client).await,
        ResourceCommands::Upload {
            name,
            description,
            kind,
            tags,
            github,
        } => {
            let req = UploadRequest {
                name,
                description,
                kind,
                tags,
                github,
                user_id: None,
            };
            let reply = client.upload(req).await.context("Failed to upload resource")?;
            println!("{}", "✓ Resource uploaded successfully!".green().bold());
            if !reply.message.is_empty() {
                println!("  {}", reply.message);
            }
            Ok(())
        }
        ResourceCommands::Delete { id } => {
            let mut store = load_catalog(&client).await?;
            if store.state().resource(id).is_none() {
                anyhow::bail!("No resource with ID {}", id);
            }
            let result = client.delete_resource(id).await;
            apply_delete(&mut store, id, result);
            report_state(store.state())
        }
    }
}

/// Apply the outcome of a resource delete to the store
fn apply_delete(store: &mut Store, id: u32, result: Result<(), ClientError>) {
    match result {
        Ok(()) => {
            let name = store
                .state()
                .resource(id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| id.to_string());
            store.dispatch(Action::ResourceDeleted(id));
            store.dispatch(Action::Notify(Notification::success(format!(
                "Resource {} deleted.",
                name
            ))));
        }
        Err(e) => record_failure(store, "delete resource", &e),
    }
}

/// Record a failed Hub call as the store's error banner
///
/// A missing or rejected token also ends the session.
pub fn record_failure(store: &mut Store, action: &str, err: &ClientError) {
    if err.is_unauthorized() {
        store.dispatch(Action::LoggedOut);
    }
    store.dispatch(Action::Notify(Notification::request_failed(
        action,
        &err.server_text(),
    )));
}

async fn list_my_resources(client: &HubClient) -> Result<()> {
    let user_id = client
        .user_id()?
        .context("Not logged in with a Hub user id; run `tekhub login` first")?;
    let resources = client
        .list_user_resources(user_id)
        .await
        .context("Failed to fetch your resources")?;

    println!("{}", "My Resources".bold());
    if resources.is_empty() {
        println!("  It seems you haven't uploaded any resources.");
        println!("  {}", "Upload one with `tekhub resource upload`.".dimmed());
        return Ok(());
    }

    println!();
    for resource in &resources {
        print_resource_summary(resource);
    }
    Ok(())
}

/// List catalog categories, alphabetically, with their tags
pub async fn list_categories(config: &Config) -> Result<()> {
    let mut categories = config
        .hub_client()
        .list_categories()
        .await
        .context("Failed to fetch categories")?;
    categories.sort_by(|a, b| a.name.cmp(&b.name));

    if categories.is_empty() {
        println!("{}", "No categories found.".yellow());
        return Ok(());
    }

    for category in categories {
        let tags: Vec<&str> = category.tags.iter().map(String::as_str).collect();
        println!("  {} {} {}", "▸".cyan(), category.name.bold(), tags.join(", ").dimmed());
    }
    Ok(())
}

/// Fetch resources and categories concurrently into a fresh store
pub async fn load_catalog(client: &HubClient) -> Result<Store> {
    let mut store = Store::new();
    if client.is_authenticated()? {
        store.dispatch(Action::LoggedIn);
    }
    let resources_ticket = store.begin_fetch(Fetch::Resources);
    let categories_ticket = store.begin_fetch(Fetch::Categories);

    let (resources, categories) = tokio::join!(client.list_resources(), client.list_categories());

    store.complete_fetch(
        resources_ticket,
        Action::ResourcesLoaded(resources.context("Failed to fetch resources")?),
    );
    store.complete_fetch(
        categories_ticket,
        Action::CategoriesLoaded(categories.context("Failed to fetch categories")?),
    );
    Ok(store)
}

/// Check the filter boxes named on the command line
fn apply_selection(store: &mut Store, group: FilterGroup, labels: &[String]) -> Result<()> {
    for label in labels {
        let id = store
            .state()
            .filters
            .find(group, label)
            .map(|item| item.id.clone())
            .with_context(|| format!("Unknown {:?} filter '{}'", group, label).to_lowercase())?;
        store.dispatch(Action::ToggleFilter { id, checked: true });
    }
    Ok(())
}

fn print_catalog(store: &Store) {
    let Some(displayed) = store.displayed() else {
        println!("{}", "Catalog is still loading.".yellow());
        return;
    };

    if displayed.is_empty() {
        println!("{}", "No resources match.".yellow());
        return;
    }

    println!("{}", format!("Found {} resource(s):", displayed.len()).bold());
    println!();
    for resource in displayed {
        print_resource_summary(resource);
    }
}

/// Find a resource by numeric id or exact name
fn find_resource<'a>(resources: &'a [Resource], query: &str) -> Option<&'a Resource> {
    match query.parse::<u32>() {
        Ok(id) => resources.iter().find(|r| r.id == id),
        Err(_) => resources.iter().find(|r| r.name == query),
    }
}

async fn show_resource(client: &HubClient, query: &str, version: Option<&str>) -> Result<()> {
    let resources = client
        .list_resources()
        .await
        .context("Failed to fetch resources")?;
    let resource = find_resource(&resources, query)
        .with_context(|| format!("No resource named '{}'", query))?;

    let versions = client
        .list_versions(resource.id)
        .await
        .context("Failed to fetch versions")?;

    let shown = select_version(resource, &versions, version);
    print_version_details(resource, shown);

    if versions.len() > 1 {
        let all: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
        println!("  Versions:    {}", all.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use tekhub_core::domain::category::Category;
    use tekhub_core::domain::resource::{Catalog, CatalogTier, ResourceVersion};

    fn resource(id: u32, name: &str, kind: ResourceKind, tags: &[&str]) -> Resource {
        Resource {
            id,
            name: name.to_string(),
            kind,
            catalog: Catalog {
                id: 1,
                tier: CatalogTier::Official,
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rating: 0.0,
            latest_version: ResourceVersion {
                id: None,
                version: "0.1".to_string(),
                display_name: String::new(),
                description: String::new(),
                raw_url: String::new(),
                web_url: String::new(),
                updated_at: None,
            },
        }
    }

    fn store() -> Store {
        let mut store = Store::new();
        store.dispatch(Action::ResourcesLoaded(vec![
            resource(1, "git-clone", ResourceKind::Task, &["git"]),
            resource(2, "ci", ResourceKind::Pipeline, &["git"]),
        ]));
        store.dispatch(Action::CategoriesLoaded(vec![Category {
            id: 5,
            name: "Git".to_string(),
            tags: BTreeSet::from(["git".to_string()]),
        }]));
        store
    }

    #[test]
    fn test_apply_selection() {
        let mut store = store();
        apply_selection(&mut store, FilterGroup::Kind, &["Pipeline".to_string()]).unwrap();
        apply_selection(&mut store, FilterGroup::Category, &["git".to_string()]).unwrap();

        let names: Vec<_> = store.displayed().unwrap().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ci"]);
    }

    #[test]
    fn test_unknown_filter_label() {
        let mut store = store();
        assert!(apply_selection(&mut store, FilterGroup::Tier, &["gold".to_string()]).is_err());
    }

    #[test]
    fn test_apply_delete_removes_resource() {
        let mut store = store();
        apply_delete(&mut store, 1, Ok(()));

        let names: Vec<_> = store.displayed().unwrap().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ci"]);
        let note = store.state().notification.as_ref().unwrap();
        assert_eq!(note.title, "Resource git-clone deleted.");
    }

    #[test]
    fn test_rejected_token_logs_out() {
        let mut store = store();
        store.dispatch(Action::LoggedIn);
        apply_delete(&mut store, 1, Err(ClientError::api_error(401, "token expired")));

        assert!(!store.state().authenticated);
        assert!(store.state().resource(1).is_some());
        let note = store.state().notification.as_ref().unwrap();
        assert_eq!(
            note.to_string(),
            "Error: Failed to delete resource, error returned was : token expired"
        );
    }

    #[test]
    fn test_other_failures_keep_session() {
        let mut store = store();
        store.dispatch(Action::LoggedIn);
        record_failure(&mut store, "delete resource", &ClientError::api_error(500, "db down"));
        assert!(store.state().authenticated);
        assert!(store.state().notification.as_ref().unwrap().is_error());
    }

    #[test]
    fn test_find_resource_by_id_or_name() {
        let resources = vec![resource(7, "kaniko", ResourceKind::Task, &[])];
        assert_eq!(find_resource(&resources, "7").unwrap().name, "kaniko");
        assert_eq!(find_resource(&resources, "kaniko").unwrap().id, 7);
        assert!(find_resource(&resources, "8").is_none());
    }
}
