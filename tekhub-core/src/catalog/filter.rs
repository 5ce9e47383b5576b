//! Checkbox filters over the resource collection
//!
//! Three groups of checkboxes narrow the catalog: resource kind, support tier
//! and category. A resource passes when it satisfies every group that has at
//! least one box checked, and within a group any checked box is enough.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::domain::category::Category;
use crate::domain::resource::{CatalogTier, Resource, ResourceKind};

/// What a filter checkbox selects on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterTarget {
    Kind(ResourceKind),
    Tier(CatalogTier),
    /// Category id; expands to the category's tags at evaluation time
    Category(u32),
}

/// Checkbox group, used to lay the panel out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterGroup {
    Kind,
    Tier,
    Category,
}

/// A single checkbox in the filter panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterItem {
    pub id: String,
    pub label: String,
    pub target: FilterTarget,
    pub checked: bool,
}

impl FilterItem {
    fn new(id: &str, label: &str, target: FilterTarget) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            target,
            checked: false,
        }
    }

    pub fn group(&self) -> FilterGroup {
        match self.target {
            FilterTarget::Kind(_) => FilterGroup::Kind,
            FilterTarget::Tier(_) => FilterGroup::Tier,
            FilterTarget::Category(_) => FilterGroup::Category,
        }
    }
}

/// State of every checkbox in the filter panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    items: Vec<FilterItem>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    /// Filter panel with the fixed kind and tier boxes, all unchecked
    pub fn new() -> Self {
        Self {
            items: vec![
                FilterItem::new("1000", "task", FilterTarget::Kind(ResourceKind::Task)),
                FilterItem::new(
                    "1001",
                    "pipeline",
                    FilterTarget::Kind(ResourceKind::Pipeline),
                ),
                FilterItem::new(
                    "1002",
                    "Official",
                    FilterTarget::Tier(CatalogTier::Official),
                ),
                FilterItem::new(
                    "1003",
                    "Verified",
                    FilterTarget::Tier(CatalogTier::Verified),
                ),
                FilterItem::new(
                    "1004",
                    "Community",
                    FilterTarget::Tier(CatalogTier::Community),
                ),
            ],
        }
    }

    /// Replace the category boxes with one per category
    ///
    /// Checked state of categories that are still present is kept.
    pub fn set_categories(&mut self, categories: &[Category]) {
        let checked: HashSet<u32> = self.selected_category_ids().collect();

        self.items.retain(|i| i.group() != FilterGroup::Category);
        self.items.extend(categories.iter().map(|c| FilterItem {
            id: c.id.to_string(),
            label: c.name.clone(),
            target: FilterTarget::Category(c.id),
            checked: checked.contains(&c.id),
        }));
    }

    /// Check or uncheck a box by id
    ///
    /// Returns `false` when no box has that id.
    pub fn toggle(&mut self, id: &str, checked: bool) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Uncheck every box
    pub fn clear(&mut self) {
        for item in &mut self.items {
            item.checked = false;
        }
    }

    /// Whether any box is checked (enables the "clear filters" button)
    pub fn has_selection(&self) -> bool {
        self.items.iter().any(|i| i.checked)
    }

    pub fn items(&self) -> &[FilterItem] {
        &self.items
    }

    /// Boxes of one group in display order
    ///
    /// Category boxes are listed alphabetically by label.
    pub fn group_items(&self, group: FilterGroup) -> Vec<&FilterItem> {
        let mut items: Vec<&FilterItem> =
            self.items.iter().filter(|i| i.group() == group).collect();
        if group == FilterGroup::Category {
            items.sort_by(|a, b| a.label.cmp(&b.label));
        }
        items
    }

    /// Look a box up by its label, ignoring case
    pub fn find(&self, group: FilterGroup, label: &str) -> Option<&FilterItem> {
        self.items
            .iter()
            .find(|i| i.group() == group && i.label.eq_ignore_ascii_case(label))
    }

    fn selected_category_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().filter(|i| i.checked).filter_map(|i| match i.target {
            FilterTarget::Category(id) => Some(id),
            _ => None,
        })
    }

    /// Resolve the checked boxes into a predicate
    ///
    /// Selected categories are expanded to the union of their tags using the
    /// given category list.
    pub fn predicate(&self, categories: &[Category]) -> FilterPredicate {
        let mut predicate = FilterPredicate::default();

        for item in self.items.iter().filter(|i| i.checked) {
            match item.target {
                FilterTarget::Kind(kind) => {
                    predicate.kinds.insert(kind);
                }
                FilterTarget::Tier(tier) => {
                    predicate.tiers.insert(tier);
                }
                FilterTarget::Category(id) => {
                    let tags = predicate.tags.get_or_insert_with(BTreeSet::new);
                    if let Some(category) = categories.iter().find(|c| c.id == id) {
                        tags.extend(category.tags.iter().cloned());
                    }
                }
            }
        }

        predicate
    }
}

/// Resolved filter: AND across groups, OR within a group
///
/// An empty kind or tier set, or `tags == None`, leaves that group
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    pub kinds: HashSet<ResourceKind>,
    pub tiers: HashSet<CatalogTier>,
    pub tags: Option<BTreeSet<String>>,
}

impl FilterPredicate {
    pub fn matches(&self, resource: &Resource) -> bool {
        (self.kinds.is_empty() || self.kinds.contains(&resource.kind))
            && (self.tiers.is_empty() || self.tiers.contains(&resource.catalog.tier))
            && self
                .tags
                .as_ref()
                .is_none_or(|tags| resource.has_any_tag(tags))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.kinds.is_empty() && self.tiers.is_empty() && self.tags.is_none()
    }
}

/// Keep the resources that satisfy the predicate, preserving order
pub fn filter_resources(resources: &[Resource], predicate: &FilterPredicate) -> Vec<Resource> {
    resources
        .iter()
        .filter(|r| predicate.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{category, resource};

    fn catalog() -> Vec<Resource> {
        use CatalogTier::{Community, Official, Verified};
        use ResourceKind::{Pipeline, Task};
        vec![
            resource(1, "git-clone", Task, Official, &["git"], 4.0),
            resource(2, "buildah", Task, Community, &["image-build"], 3.0),
            resource(3, "ci-pipeline", Pipeline, Verified, &["git", "ci"], 2.5),
            resource(4, "kaniko", Task, Verified, &["image-build"], 5.0),
        ]
    }

    fn categories() -> Vec<Category> {
        vec![
            category(10, "Git", &["git"]),
            category(11, "Build Tools", &["image-build"]),
            category(12, "Empty", &[]),
        ]
    }

    fn names(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_find_by_label() {
        let mut filters = FilterState::new();
        filters.set_categories(&categories());

        assert_eq!(filters.find(FilterGroup::Tier, "official").unwrap().id, "1002");
        assert_eq!(filters.find(FilterGroup::Category, "build tools").unwrap().id, "11");
        assert!(filters.find(FilterGroup::Kind, "Official").is_none());
    }

    #[test]
    fn test_no_selection_matches_everything() {
        let filters = FilterState::new();
        let predicate = filters.predicate(&categories());
        assert!(predicate.is_unconstrained());
        assert_eq!(filter_resources(&catalog(), &predicate).len(), 4);
    }

    #[test]
    fn test_or_within_group() {
        let mut filters = FilterState::new();
        filters.toggle("1002", true);
        filters.toggle("1004", true);

        let result = filter_resources(&catalog(), &filters.predicate(&categories()));
        assert_eq!(names(&result), vec!["git-clone", "buildah"]);
    }

    #[test]
    fn test_and_across_groups() {
        let mut filters = FilterState::new();
        filters.set_categories(&categories());
        filters.toggle("1000", true);
        filters.toggle("1003", true);
        filters.toggle("11", true);

        let result = filter_resources(&catalog(), &filters.predicate(&categories()));
        assert_eq!(names(&result), vec!["kaniko"]);
    }

    #[test]
    fn test_category_expands_to_tags() {
        let mut filters = FilterState::new();
        filters.set_categories(&categories());
        filters.toggle("10", true);

        let result = filter_resources(&catalog(), &filters.predicate(&categories()));
        assert_eq!(names(&result), vec!["git-clone", "ci-pipeline"]);
    }

    #[test]
    fn test_category_without_tags_matches_nothing() {
        let mut filters = FilterState::new();
        filters.set_categories(&categories());
        filters.toggle("12", true);

        let result = filter_resources(&catalog(), &filters.predicate(&categories()));
        assert!(result.is_empty());
    }

    #[test]
    fn test_nested_filter_equals_conjunction() {
        let mut first = FilterState::new();
        first.set_categories(&categories());
        first.toggle("1000", true);
        let p1 = first.predicate(&categories());

        let mut second = FilterState::new();
        second.set_categories(&categories());
        second.toggle("11", true);
        second.toggle("1003", true);
        let p2 = second.predicate(&categories());

        let nested = filter_resources(&filter_resources(&catalog(), &p1), &p2);
        let conjunction: Vec<Resource> = catalog()
            .into_iter()
            .filter(|r| p1.matches(r) && p2.matches(r))
            .collect();

        assert_eq!(nested, conjunction);
        assert_eq!(names(&nested), vec!["kaniko"]);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut filters = FilterState::new();
        assert!(!filters.toggle("9999", true));
        assert!(!filters.has_selection());
    }

    #[test]
    fn test_clear_unchecks_all() {
        let mut filters = FilterState::new();
        filters.set_categories(&categories());
        filters.toggle("1001", true);
        filters.toggle("10", true);
        assert!(filters.has_selection());

        filters.clear();
        assert!(!filters.has_selection());
    }

    #[test]
    fn test_set_categories_keeps_checked_state() {
        let mut filters = FilterState::new();
        filters.set_categories(&categories());
        filters.toggle("11", true);

        filters.set_categories(&categories()[1..]);
        let checked: Vec<&str> = filters
            .items()
            .iter()
            .filter(|i| i.checked)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(checked, vec!["11"]);
        assert_eq!(filters.group_items(FilterGroup::Category).len(), 2);
    }

    #[test]
    fn test_category_items_sorted_by_label() {
        let mut filters = FilterState::new();
        filters.set_categories(&categories());

        let labels: Vec<&str> = filters
            .group_items(FilterGroup::Category)
            .iter()
            .map(|i| i.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Build Tools", "Empty", "Git"]);
    }
}
