//! Category domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named group of tags
///
/// Selecting a category in the filter panel expands to its tag names, which
/// are then matched against resource tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub tags: BTreeSet<String>,
}
