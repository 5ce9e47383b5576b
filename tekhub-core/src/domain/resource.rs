//! Catalog resource domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::RecordError;

/// Kind of catalog resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Task,
    Pipeline,
}

impl FromStr for ResourceKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(ResourceKind::Task),
            "pipeline" => Ok(ResourceKind::Pipeline),
            other => Err(RecordError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Task => write!(f, "task"),
            ResourceKind::Pipeline => write!(f, "pipeline"),
        }
    }
}

/// Support tier of the catalog a resource comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogTier {
    Official,
    Verified,
    Community,
}

impl FromStr for CatalogTier {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "official" => Ok(CatalogTier::Official),
            "verified" => Ok(CatalogTier::Verified),
            "community" => Ok(CatalogTier::Community),
            other => Err(RecordError::UnknownTier(other.to_string())),
        }
    }
}

impl std::fmt::Display for CatalogTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogTier::Official => write!(f, "Official"),
            CatalogTier::Verified => write!(f, "Verified"),
            CatalogTier::Community => write!(f, "Community"),
        }
    }
}

/// Catalog a resource belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: u32,
    pub tier: CatalogTier,
}

/// A published version of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceVersion {
    pub id: Option<u32>,
    pub version: String,
    pub display_name: String,
    pub description: String,
    pub raw_url: String,
    pub web_url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A catalog entry representing a Task or Pipeline definition
///
/// Fetched in bulk on load. The only client-side mutation is the rating,
/// refreshed after the current user submits one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u32,
    pub name: String,
    pub kind: ResourceKind,
    pub catalog: Catalog,
    pub tags: BTreeSet<String>,
    /// Average rating, 0.0 to 5.0
    pub rating: f64,
    pub latest_version: ResourceVersion,
}

impl Resource {
    /// Display name of the latest version, falling back to the resource name
    pub fn display_name(&self) -> &str {
        if self.latest_version.display_name.is_empty() {
            &self.name
        } else {
            &self.latest_version.display_name
        }
    }

    /// Whether the resource carries at least one of the given tags
    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        !self.tags.is_disjoint(tags)
    }
}
