//! Terminal rendering shared by the command handlers

use anyhow::Result;
use colored::*;
use tekhub_core::domain::notification::{Notification, NotificationKind};
use tekhub_core::domain::resource::{Resource, ResourceVersion};
use tekhub_core::store::AppState;

/// Print a notification banner
///
/// Error banners are returned as an error so the process exits non-zero.
pub fn report(notification: &Notification) -> Result<()> {
    match notification.kind {
        NotificationKind::Success => {
            println!("{} {}", "✓".green().bold(), notification.title.green().bold());
        }
        NotificationKind::Warning => {
            println!("{} {}", "!".yellow().bold(), notification.title.yellow());
            if !notification.message.is_empty() {
                println!("  {}", notification.message);
            }
        }
        NotificationKind::Error => {
            anyhow::bail!("{}", notification);
        }
    }
    Ok(())
}

/// Print the store's banner, if any
pub fn report_state(state: &AppState) -> Result<()> {
    match &state.notification {
        Some(note) => report(note),
        None => Ok(()),
    }
}

/// One-line summary of a catalog resource
pub fn print_resource_summary(resource: &Resource) {
    println!(
        "  {} {} {} {}",
        "▸".cyan(),
        resource.display_name().bold(),
        format!("[{}]", resource.kind).dimmed(),
        format!("★ {:.1}", resource.rating).yellow()
    );
    println!(
        "    ID: {}  Catalog: {}  Version: {}",
        resource.id, resource.catalog.tier, resource.latest_version.version
    );
    if !resource.tags.is_empty() {
        let tags: Vec<&str> = resource.tags.iter().map(String::as_str).collect();
        println!("    Tags: {}", tags.join(", "));
    }
}

pub fn print_version_details(resource: &Resource, version: &ResourceVersion) {
    println!("{}", resource.display_name().bold());
    println!("  Name:        {}", resource.name);
    println!("  Kind:        {}", resource.kind);
    println!("  Catalog:     {}", resource.catalog.tier);
    println!("  Rating:      {:.1}", resource.rating);
    println!("  Version:     {}", version.version);
    if !version.description.is_empty() {
        println!("  Description: {}", version.description);
    }
    if let Some(updated) = version.updated_at {
        println!("  Updated:     {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if !version.web_url.is_empty() {
        println!("  Web:         {}", version.web_url);
    }
    if !version.raw_url.is_empty() {
        println!("  Raw:         {}", version.raw_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_errors_fail() {
        assert!(report(&Notification::success("Secret created.")).is_ok());
        assert!(report(&Notification::warning("Warning", "check")).is_ok());

        let err = report(&Notification::request_failed("create webhook", "exists")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: Failed to create webhook, error returned was : exists"
        );
    }
}
