//! Category DTOs for the Hub catalog API

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::dto::resource::TagRecord;
use crate::error::RecordError;

/// Category as sent by `GET /categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<TagRecord>,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = RecordError;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(RecordError::Empty {
                field: "category name",
            });
        }

        Ok(Category {
            id: record.id,
            name: record.name,
            tags: record.tags.into_iter().map(|t| t.name).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_conversion() {
        let record: CategoryRecord = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Build Tools",
            "tags": [{ "id": 1, "name": "build-tool" }, { "id": 2, "name": "maven" }]
        }))
        .unwrap();

        let category = Category::try_from(record).unwrap();
        assert_eq!(category.name, "Build Tools");
        assert_eq!(category.tags.len(), 2);
        assert!(category.tags.contains("maven"));
    }
}
