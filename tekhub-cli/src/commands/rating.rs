//! Rating command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tekhub_client::ClientError;
use tekhub_core::domain::notification::Notification;
use tekhub_core::dto::rating::UpdateRating;
use tekhub_core::store::{Action, Store};

use crate::commands::resource::{load_catalog, record_failure};
use crate::config::Config;
use crate::output::report_state;

/// Rating subcommands
#[derive(Subcommand)]
pub enum RatingCommands {
    /// Show your rating of a resource
    Get {
        /// Resource ID
        id: u32,
    },
    /// Rate a resource from 1 to 5 stars
    Set {
        /// Resource ID
        id: u32,
        /// Stars (1-5)
        stars: u8,
    },
}

pub async fn handle_rating_command(command: RatingCommands, config: &Config) -> Result<()> {
    let client = config.hub_client();

    match command {
        RatingCommands::Get { id } => {
            let rating = client.get_rating(id).await.context("Failed to fetch rating")?;
            if rating == 0 {
                println!("{}", "You have not rated this resource yet.".yellow());
            } else {
                println!("Your rating: {}", stars(rating).yellow());
            }
            Ok(())
        }
        RatingCommands::Set { id, stars: value } => {
            let req = UpdateRating::new(value)?;
            let mut store = load_catalog(&client).await?;
            if store.state().resource(id).is_none() {
                anyhow::bail!("No resource with ID {}", id);
            }

            let result = client.rate(id, req).await;
            apply_rating(&mut store, id, result);
            report_state(store.state())?;

            if let Some(resource) = store.state().resource(id) {
                println!("  {}: average rating {:.1}", resource.display_name(), resource.rating);
            }
            Ok(())
        }
    }
}

/// Apply the new average returned by a rating to the store
fn apply_rating(store: &mut Store, id: u32, result: Result<f64, ClientError>) {
    match result {
        Ok(rating) => {
            store.dispatch(Action::RatingUpdated {
                resource_id: id,
                rating,
            });
            store.dispatch(Action::Notify(Notification::success("Rating saved!")));
        }
        Err(e) => record_failure(store, "rate resource", &e),
    }
}

fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
