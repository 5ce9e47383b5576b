//! Free-text search over resource names
//!
//! The search box matches case-insensitively against the resource name and
//! the latest version's display name. User input is escaped before the
//! matcher is built, so characters like `(` or `*` are matched literally
//! instead of being interpreted as a pattern.

use regex::{Regex, RegexBuilder};

use crate::domain::resource::Resource;

/// A compiled search query
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    text: String,
    matcher: Option<Regex>,
}

impl SearchQuery {
    /// Build a query from raw search box input
    ///
    /// Surrounding whitespace is ignored. If the matcher cannot be built the
    /// query fails open and matches every resource.
    pub fn new(input: &str) -> Self {
        let text = input.trim().to_string();
        if text.is_empty() {
            return Self::default();
        }

        let matcher = match RegexBuilder::new(&regex::escape(&text))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("Search '{}' could not be compiled, ignoring: {}", text, e);
                None
            }
        };

        Self { text, matcher }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match &self.matcher {
            Some(re) => {
                re.is_match(&resource.name) || re.is_match(&resource.latest_version.display_name)
            }
            None => true,
        }
    }
}
