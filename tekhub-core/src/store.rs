//! Application state and typed action dispatch
//!
//! The store owns everything fetched from the Hub (resources, categories)
//! plus the derived UI state (filters, search text, sort key, authentication
//! flag). It is an ordinary value passed to whoever needs it; all mutation
//! goes through [`Store::dispatch`].
//!
//! Every action that changes an input of the catalog derivation recomputes
//! the whole displayed list.

use std::collections::HashMap;

use crate::catalog::{FilterState, SearchQuery, SortKey, derive_view};
use crate::domain::category::Category;
use crate::domain::notification::Notification;
use crate::domain::resource::Resource;

/// Monotonic request generation
///
/// A response is applied only if it carries the latest generation issued for
/// its slot, so a slow response cannot overwrite the result of a newer
/// request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Store slots that are filled by a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fetch {
    Resources,
    Categories,
}

/// Ticket returned by [`Store::begin_fetch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub fetch: Fetch,
    pub generation: Generation,
}

/// Actions accepted by the store
#[derive(Debug, Clone)]
pub enum Action {
    ResourcesLoaded(Vec<Resource>),
    CategoriesLoaded(Vec<Category>),
    ToggleFilter { id: String, checked: bool },
    ClearFilters,
    SetSearch(String),
    SetSort(SortKey),
    /// New average after the current user rated a resource
    RatingUpdated { resource_id: u32, rating: f64 },
    ResourceDeleted(u32),
    LoggedIn,
    LoggedOut,
    /// Replace the banner; the outcome of the last mutation
    Notify(Notification),
}

/// Application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Full collection; `None` until loaded
    pub resources: Option<Vec<Resource>>,
    /// `None` until loaded
    pub categories: Option<Vec<Category>>,
    pub filters: FilterState,
    pub search_text: String,
    pub sort: SortKey,
    /// Derived list shown by the grid; `None` while loading
    pub displayed: Option<Vec<Resource>>,
    pub authenticated: bool,
    pub notification: Option<Notification>,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        self.displayed.is_none()
    }

    pub fn resource(&self, id: u32) -> Option<&Resource> {
        self.resources.as_ref()?.iter().find(|r| r.id == id)
    }
}

/// Holder of [`AppState`]
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    issued: HashMap<Fetch, Generation>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The list the display grid should render, `None` while loading
    pub fn displayed(&self) -> Option<&[Resource]> {
        self.state.displayed.as_deref()
    }

    /// Apply an action
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!("dispatch {:?}", ActionName(&action));

        let recompute = match action {
            Action::ResourcesLoaded(resources) => {
                self.state.resources = Some(resources);
                true
            }
            Action::CategoriesLoaded(categories) => {
                self.state.filters.set_categories(&categories);
                self.state.categories = Some(categories);
                true
            }
            Action::ToggleFilter { id, checked } => {
                if !self.state.filters.toggle(&id, checked) {
                    tracing::warn!("No filter with id {}", id);
                }
                true
            }
            Action::ClearFilters => {
                self.state.filters.clear();
                true
            }
            Action::SetSearch(text) => {
                self.state.search_text = text;
                true
            }
            Action::SetSort(sort) => {
                self.state.sort = sort;
                true
            }
            Action::RatingUpdated {
                resource_id,
                rating,
            } => {
                if let Some(resource) = self
                    .state
                    .resources
                    .as_mut()
                    .and_then(|list| list.iter_mut().find(|r| r.id == resource_id))
                {
                    resource.rating = rating;
                }
                true
            }
            Action::ResourceDeleted(id) => {
                if let Some(list) = self.state.resources.as_mut() {
                    list.retain(|r| r.id != id);
                }
                true
            }
            Action::LoggedIn => {
                self.state.authenticated = true;
                false
            }
            Action::LoggedOut => {
                self.state.authenticated = false;
                false
            }
            Action::Notify(notification) => {
                self.state.notification = Some(notification);
                false
            }
        };

        if recompute {
            self.recompute();
        }
    }

    /// Issue a ticket for a fetch, superseding any outstanding one for the slot
    pub fn begin_fetch(&mut self, fetch: Fetch) -> FetchTicket {
        let generation = self.issued.get(&fetch).copied().unwrap_or_default().next();
        self.issued.insert(fetch, generation);
        FetchTicket { fetch, generation }
    }

    /// Dispatch the result of a fetch if its ticket is still current
    ///
    /// Returns `false` when the response was stale and dropped.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, action: Action) -> bool {
        if self.issued.get(&ticket.fetch) != Some(&ticket.generation) {
            tracing::warn!(
                "Dropping stale {:?} response (generation {:?})",
                ticket.fetch,
                ticket.generation
            );
            return false;
        }
        self.dispatch(action);
        true
    }

    fn recompute(&mut self) {
        let search = SearchQuery::new(&self.state.search_text);
        self.state.displayed = derive_view(
            self.state.resources.as_deref(),
            self.state.categories.as_deref(),
            &self.state.filters,
            &search,
            self.state.sort,
        );
    }
}

/// Debug helper that logs an action without its payload
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Action::ResourcesLoaded(_) => "ResourcesLoaded",
            Action::CategoriesLoaded(_) => "CategoriesLoaded",
            Action::ToggleFilter { .. } => "ToggleFilter",
            Action::ClearFilters => "ClearFilters",
            Action::SetSearch(_) => "SetSearch",
            Action::SetSort(_) => "SetSort",
            Action::RatingUpdated { .. } => "RatingUpdated",
            Action::ResourceDeleted(_) => "ResourceDeleted",
            Action::LoggedIn => "LoggedIn",
            Action::LoggedOut => "LoggedOut",
            Action::Notify(_) => "Notify",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{category, resource};
    use crate::domain::resource::{CatalogTier, ResourceKind};

    fn loaded_store() -> Store {
        let mut store = Store::new();
        store.dispatch(Action::ResourcesLoaded(vec![
            resource(1, "b-task", ResourceKind::Task, CatalogTier::Official, &["git"], 4.0),
            resource(2, "a-task", ResourceKind::Task, CatalogTier::Community, &["ci"], 2.0),
            resource(3, "pipeline-x", ResourceKind::Pipeline, CatalogTier::Verified, &["ci"], 3.0),
        ]));
        store.dispatch(Action::CategoriesLoaded(vec![category(7, "CI", &["ci"])]));
        store
    }

    fn displayed(store: &Store) -> Vec<&str> {
        store
            .displayed()
            .unwrap()
            .iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    #[test]
    fn test_loading_until_both_collections_arrive() {
        let mut store = Store::new();
        assert!(store.state().is_loading());

        store.dispatch(Action::ToggleFilter {
            id: "1000".to_string(),
            checked: true,
        });
        assert!(store.displayed().is_none());

        store.dispatch(Action::ResourcesLoaded(vec![]));
        assert!(store.state().is_loading());

        store.dispatch(Action::CategoriesLoaded(vec![]));
        assert_eq!(store.displayed().map(|d| d.len()), Some(0));
    }

    #[test]
    fn test_every_change_republishes_list() {
        let mut store = loaded_store();
        assert_eq!(displayed(&store), vec!["a-task", "b-task", "pipeline-x"]);

        store.dispatch(Action::SetSort(SortKey::Rating));
        assert_eq!(displayed(&store), vec!["b-task", "pipeline-x", "a-task"]);

        store.dispatch(Action::ToggleFilter {
            id: "7".to_string(),
            checked: true,
        });
        assert_eq!(displayed(&store), vec!["pipeline-x", "a-task"]);

        store.dispatch(Action::SetSearch("task".to_string()));
        assert_eq!(displayed(&store), vec!["a-task"]);

        store.dispatch(Action::ClearFilters);
        assert_eq!(displayed(&store), vec!["b-task", "a-task"]);

        store.dispatch(Action::SetSearch(String::new()));
        assert_eq!(displayed(&store), vec!["b-task", "pipeline-x", "a-task"]);
    }

    #[test]
    fn test_rating_update_resorts() {
        let mut store = loaded_store();
        store.dispatch(Action::SetSort(SortKey::Rating));
        store.dispatch(Action::RatingUpdated {
            resource_id: 2,
            rating: 5.0,
        });

        assert_eq!(displayed(&store), vec!["a-task", "b-task", "pipeline-x"]);
        assert_eq!(store.state().resource(2).unwrap().rating, 5.0);
    }

    #[test]
    fn test_resource_deleted() {
        let mut store = loaded_store();
        store.dispatch(Action::ResourceDeleted(1));
        assert_eq!(displayed(&store), vec!["a-task", "pipeline-x"]);
        assert!(store.state().resource(1).is_none());
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut store = Store::new();
        let first = store.begin_fetch(Fetch::Resources);
        let second = store.begin_fetch(Fetch::Resources);

        let fresh = vec![resource(1, "fresh", ResourceKind::Task, CatalogTier::Official, &[], 1.0)];
        let stale = vec![resource(2, "stale", ResourceKind::Task, CatalogTier::Official, &[], 1.0)];

        assert!(store.complete_fetch(second, Action::ResourcesLoaded(fresh)));
        assert!(!store.complete_fetch(first, Action::ResourcesLoaded(stale)));
        assert_eq!(store.state().resources.as_ref().unwrap()[0].name, "fresh");
    }

    #[test]
    fn test_fetch_slots_are_independent() {
        let mut store = Store::new();
        let resources = store.begin_fetch(Fetch::Resources);
        let _categories = store.begin_fetch(Fetch::Categories);

        assert!(store.complete_fetch(resources, Action::ResourcesLoaded(vec![])));
    }

    #[test]
    fn test_auth_and_notification_flags() {
        let mut store = Store::new();
        store.dispatch(Action::LoggedIn);
        assert!(store.state().authenticated);

        store.dispatch(Action::Notify(Notification::error("boom")));
        assert!(store.state().notification.as_ref().unwrap().is_error());

        store.dispatch(Action::Notify(Notification::success("Rating saved!")));
        store.dispatch(Action::LoggedOut);
        assert!(!store.state().notification.as_ref().unwrap().is_error());
        assert!(!store.state().authenticated);
    }
}
