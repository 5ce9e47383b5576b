//! Sort keys for the displayed resource list

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::resource::Resource;

/// Order applied to the final filtered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Case-insensitive name, ascending
    #[default]
    Name,
    /// Average rating, highest first
    Rating,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "rating" | "ratings" => Ok(SortKey::Rating),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "Name"),
            SortKey::Rating => write!(f, "Rating"),
        }
    }
}

/// Sort in place; ties keep their prior relative order
pub fn sort_resources(resources: &mut [Resource], key: SortKey) {
    match key {
        SortKey::Name => {
            resources.sort_by_cached_key(|r| r.name.to_lowercase());
        }
        SortKey::Rating => {
            resources.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
    }
}
