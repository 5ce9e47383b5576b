//! Derivation of the displayed resource list
//!
//! Combines the checkbox filters, the search query and the sort key over the
//! full collection. The full collection is authoritative; the displayed list
//! is always recomputed from it, never narrowed incrementally.

use crate::catalog::filter::{FilterState, filter_resources};
use crate::catalog::search::SearchQuery;
use crate::catalog::sort::{SortKey, sort_resources};
use crate::domain::category::Category;
use crate::domain::resource::{Resource, ResourceVersion};

/// Compute the ordered list of resources to display
///
/// Returns `None` while either the resources or the categories have not been
/// loaded yet, so the caller can render a loading state.
pub fn derive_view(
    resources: Option<&[Resource]>,
    categories: Option<&[Category]>,
    filters: &FilterState,
    search: &SearchQuery,
    sort: SortKey,
) -> Option<Vec<Resource>> {
    let resources = resources?;
    let categories = categories?;

    let predicate = filters.predicate(categories);
    let mut displayed: Vec<Resource> = filter_resources(resources, &predicate)
        .into_iter()
        .filter(|r| search.matches(r))
        .collect();

    sort_resources(&mut displayed, sort);
    Some(displayed)
}

/// Pick the version to show on a resource's detail page
///
/// A requested version wins when it is one of the listed versions; otherwise
/// the resource's latest version is used, preferring the listed copy when the
/// list has it.
pub fn select_version<'a>(
    resource: &'a Resource,
    versions: &'a [ResourceVersion],
    requested: Option<&str>,
) -> &'a ResourceVersion {
    if let Some(wanted) = requested {
        if let Some(found) = versions.iter().find(|v| v.version == wanted) {
            return found;
        }
        tracing::debug!(
            "Version {} of {} not found, showing latest",
            wanted,
            resource.name
        );
    }

    versions
        .iter()
        .find(|v| v.version == resource.latest_version.version)
        .unwrap_or(&resource.latest_version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{category, resource};
    use crate::domain::resource::{CatalogTier, ResourceKind};

    fn catalog() -> Vec<Resource> {
        vec![
            resource(1, "my-task", ResourceKind::Task, CatalogTier::Official, &["git"], 2.0),
            resource(2, "pipeline-x", ResourceKind::Pipeline, CatalogTier::Community, &["ci"], 4.0),
            resource(3, "another-task", ResourceKind::Task, CatalogTier::Community, &["ci"], 3.0),
        ]
    }

    fn categories() -> Vec<Category> {
        vec![category(1, "CI", &["ci"])]
    }

    fn names(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_not_loaded_yields_none() {
        let filters = FilterState::new();
        let search = SearchQuery::default();
        let list = catalog();
        let cats = categories();

        assert!(derive_view(None, Some(&cats), &filters, &search, SortKey::Name).is_none());
        assert!(derive_view(Some(&list), None, &filters, &search, SortKey::Name).is_none());
    }

    #[test]
    fn test_search_narrows_filtered_set() {
        let list = catalog();
        let cats = categories();
        let filters = FilterState::new();

        let shown = derive_view(
            Some(&list),
            Some(&cats),
            &filters,
            &SearchQuery::new("task"),
            SortKey::Name,
        )
        .unwrap();
        assert_eq!(names(&shown), vec!["another-task", "my-task"]);
    }

    #[test]
    fn test_filters_search_and_sort_compose() {
        let list = catalog();
        let cats = categories();
        let mut filters = FilterState::new();
        filters.set_categories(&cats);
        filters.toggle("1", true);

        let shown = derive_view(
            Some(&list),
            Some(&cats),
            &filters,
            &SearchQuery::default(),
            SortKey::Rating,
        )
        .unwrap();
        assert_eq!(names(&shown), vec!["pipeline-x", "another-task"]);
    }

    #[test]
    fn test_clearing_filters_restores_sorted_collection() {
        let list = catalog();
        let cats = categories();
        let mut filters = FilterState::new();
        filters.toggle("1001", true);
        filters.clear();

        let shown = derive_view(
            Some(&list),
            Some(&cats),
            &filters,
            &SearchQuery::default(),
            SortKey::Rating,
        )
        .unwrap();
        assert_eq!(names(&shown), vec!["pipeline-x", "another-task", "my-task"]);
    }

    #[test]
    fn test_select_version() {
        let r = resource(1, "git-clone", ResourceKind::Task, CatalogTier::Official, &[], 0.0);
        let mut older = r.latest_version.clone();
        older.version = "0.1".to_string();
        let versions = vec![older, r.latest_version.clone()];

        assert_eq!(select_version(&r, &versions, Some("0.1")).version, "0.1");
        assert_eq!(select_version(&r, &versions, Some("9.9")).version, r.latest_version.version);
        assert_eq!(select_version(&r, &[], None).version, r.latest_version.version);
    }
}
