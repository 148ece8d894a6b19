//! Filter/search engine behind the event list.
//!
//! Everything here is a pure function of the dataset and a [`FilterState`];
//! callers recompute whenever an input changes. Empty inputs mean "no
//! constraint" and nothing in this module can fail.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::Event;

/// Number of results shown before "See More Events" expands the list.
pub const PAGE_SIZE: usize = 6;

/// Transient list-view state for one browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Exact location to keep, empty for all locations.
    #[serde(default)]
    pub location: String,
    /// Case-insensitive title/description substring, empty for no search.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub show_all: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn toggle_show_all(mut self) -> Self {
        self.show_all = !self.show_all;
        self
    }

    /// Drops location and search constraints; the show-all window is kept.
    pub fn cleared(mut self) -> Self {
        self.location.clear();
        self.search.clear();
        self
    }

    pub fn is_filtering(&self) -> bool {
        !self.location.is_empty() || !self.search.is_empty()
    }

    pub fn apply<'a>(&self, all: &'a [Event]) -> EventPage<'a> {
        let filtered = filter_events(all, &self.location, &self.search);
        let total = filtered.len();
        let visible = paginate(&filtered, self.show_all).to_vec();
        EventPage {
            visible,
            total,
            show_all: self.show_all,
        }
    }
}

/// The windowed result of applying a [`FilterState`] to the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPage<'a> {
    pub visible: Vec<&'a Event>,
    /// Size of the filtered sequence before pagination.
    pub total: usize,
    pub show_all: bool,
}

impl EventPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The collapsed window hides results ("See More Events").
    pub fn has_more(&self) -> bool {
        !self.show_all && self.total > PAGE_SIZE
    }

    /// The expanded window can be collapsed again ("Show Less Events").
    pub fn can_collapse(&self) -> bool {
        self.show_all && self.total > PAGE_SIZE
    }
}

pub fn matches_location(event: &Event, location: &str) -> bool {
    location.is_empty() || event.location == location
}

/// `needle` must already be lowercased.
fn matches_lowered_search(event: &Event, needle: &str) -> bool {
    needle.is_empty()
        || event.title.to_lowercase().contains(needle)
        || event.description.to_lowercase().contains(needle)
}

/// Keeps the events matching both the location and the search, in dataset order.
pub fn filter_events<'a>(all: &'a [Event], location: &str, search: &str) -> Vec<&'a Event> {
    let needle = search.to_lowercase();
    all.iter()
        .filter(|event| matches_location(event, location))
        .filter(|event| matches_lowered_search(event, &needle))
        .collect()
}

/// First [`PAGE_SIZE`] items unless `show_all` is set.
pub fn paginate<T>(filtered: &[T], show_all: bool) -> &[T] {
    if show_all {
        filtered
    } else {
        &filtered[..filtered.len().min(PAGE_SIZE)]
    }
}

/// Every location in the dataset once, ascending.
pub fn distinct_locations(all: &[Event]) -> Vec<String> {
    all.iter()
        .map(|event| event.location.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
