//! Catalog filtering, search and sorting
//!
//! The one piece of real derived-state logic in the hub: given the full
//! resource collection and the user's selections, produce the ordered list
//! the display grid shows.

pub mod filter;
pub mod search;
pub mod sort;
pub mod view;

pub use filter::{FilterGroup, FilterItem, FilterPredicate, FilterState, FilterTarget};
pub use search::SearchQuery;
pub use sort::SortKey;
pub use view::{derive_view, select_version};

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeSet;

    use crate::domain::category::Category;
    use crate::domain::resource::{Catalog, CatalogTier, Resource, ResourceKind, ResourceVersion};

    pub fn resource(
        id: u32,
        name: &str,
        kind: ResourceKind,
        tier: CatalogTier,
        tags: &[&str],
        rating: f64,
    ) -> Resource {
        Resource {
            id,
            name: name.to_string(),
            kind,
            catalog: Catalog { id: 1, tier },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rating,
            latest_version: ResourceVersion {
                id: Some(id * 10),
                version: "0.2".to_string(),
                display_name: String::new(),
                description: String::new(),
                raw_url: String::new(),
                web_url: String::new(),
                updated_at: None,
            },
        }
    }

    pub fn category(id: u32, name: &str, tags: &[&str]) -> Category {
        Category {
            id,
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
        }
    }
}
