//! Upload DTOs for the Hub catalog API

use serde::{Deserialize, Serialize};

use crate::domain::resource::ResourceKind;
use crate::error::ValidationError;

/// Body of `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub tags: Vec<String>,
    /// Link to the definition in a GitHub repository
    pub github: String,
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl UploadRequest {
    /// Check required fields before sending
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.github.trim().is_empty() {
            return Err(ValidationError::Required("github link"));
        }
        Ok(())
    }
}

/// Server reply to an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub message: String,
}
