//! Resource DTOs for the Hub catalog API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::resource::{Catalog, Resource, ResourceVersion};
use crate::error::RecordError;

/// Catalog reference as sent by the Hub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: u32,
    #[serde(rename = "type")]
    pub tier: String,
}

/// Tag reference as sent by the Hub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
}

/// Resource version as sent by the Hub
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    #[serde(default)]
    pub id: Option<u32>,
    pub version: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "rawURL", alias = "rawUrl", default)]
    pub raw_url: String,
    #[serde(rename = "webURL", alias = "webUrl", default)]
    pub web_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Resource as sent by `GET /resources`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    pub catalog: CatalogRecord,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
    #[serde(default)]
    pub rating: f64,
    pub latest_version: VersionRecord,
}

/// Payload of `GET /resource/{id}/versions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionList {
    #[serde(default)]
    pub versions: Vec<VersionRecord>,
}

impl TryFrom<VersionRecord> for ResourceVersion {
    type Error = RecordError;

    fn try_from(record: VersionRecord) -> Result<Self, Self::Error> {
        if record.version.trim().is_empty() {
            return Err(RecordError::Empty { field: "version" });
        }

        Ok(ResourceVersion {
            id: record.id,
            version: record.version,
            display_name: record.display_name,
            description: record.description,
            raw_url: record.raw_url,
            web_url: record.web_url,
            updated_at: record.updated_at,
        })
    }
}

impl TryFrom<ResourceRecord> for Resource {
    type Error = RecordError;

    fn try_from(record: ResourceRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(RecordError::Empty { field: "name" });
        }

        if !record.rating.is_finite() || !(0.0..=5.0).contains(&record.rating) {
            return Err(RecordError::RatingOutOfRange(record.rating));
        }

        Ok(Resource {
            id: record.id,
            name: record.name,
            kind: record.kind.parse()?,
            catalog: Catalog {
                id: record.catalog.id,
                tier: record.catalog.tier.parse()?,
            },
            tags: record.tags.into_iter().map(|t| t.name).collect(),
            rating: record.rating,
            latest_version: record.latest_version.try_into()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::{CatalogTier, ResourceKind};

    fn record_json() -> serde_json::Value {
        serde_json::json!({
            "id": 12,
            "name": "git-clone",
            "type": "Task",
            "catalog": { "id": 1, "type": "official" },
            "tags": [{ "id": 3, "name": "git" }, { "id": 4, "name": "vcs" }],
            "rating": 4.5,
            "latestVersion": {
                "id": 40,
                "version": "0.2",
                "displayName": "Git Clone",
                "description": "Clone a repo",
                "rawURL": "https://raw.example/git-clone.yaml",
                "webURL": "https://example/git-clone",
                "updatedAt": "2020-06-01T10:00:00Z"
            }
        })
    }

    #[test]
    fn test_record_converts_to_resource() {
        let record: ResourceRecord = serde_json::from_value(record_json()).unwrap();
        let resource = Resource::try_from(record).unwrap();

        assert_eq!(resource.kind, ResourceKind::Task);
        assert_eq!(resource.catalog.tier, CatalogTier::Official);
        assert!(resource.tags.contains("git"));
        assert_eq!(resource.display_name(), "Git Clone");
        assert_eq!(resource.latest_version.raw_url, "https://raw.example/git-clone.yaml");
        assert!(resource.latest_version.updated_at.is_some());
    }

    #[test]
    fn test_record_accepts_kind_alias_and_lowercase_urls() {
        let mut json = record_json();
        let obj = json.as_object_mut().unwrap();
        obj.remove("type");
        obj.insert("kind".to_string(), serde_json::json!("pipeline"));
        obj["latestVersion"] = serde_json::json!({
            "version": "0.1",
            "rawUrl": "https://raw.example/p.yaml",
            "webUrl": "https://example/p"
        });

        let record: ResourceRecord = serde_json::from_value(json).unwrap();
        let resource = Resource::try_from(record).unwrap();
        assert_eq!(resource.kind, ResourceKind::Pipeline);
        assert_eq!(resource.latest_version.web_url, "https://example/p");
        assert_eq!(resource.display_name(), "git-clone");
    }

    #[test]
    fn test_record_rejects_bad_rating() {
        let mut record: ResourceRecord = serde_json::from_value(record_json()).unwrap();
        record.rating = 7.0;
        assert_eq!(
            Resource::try_from(record),
            Err(RecordError::RatingOutOfRange(7.0))
        );
    }

    #[test]
    fn test_record_rejects_unknown_tier() {
        let mut record: ResourceRecord = serde_json::from_value(record_json()).unwrap();
        record.catalog.tier = "partner".to_string();
        assert!(matches!(
            Resource::try_from(record),
            Err(RecordError::UnknownTier(_))
        ));
    }

    #[test]
    fn test_record_rejects_empty_name() {
        let mut record: ResourceRecord = serde_json::from_value(record_json()).unwrap();
        record.name = "  ".to_string();
        assert_eq!(
            Resource::try_from(record),
            Err(RecordError::Empty { field: "name" })
        );
    }
}
