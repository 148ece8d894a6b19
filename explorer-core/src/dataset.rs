use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::common::error::{ExplorerError, Result};
use crate::domain::{Event, PLACEHOLDER_IMAGE};
use crate::filter::{distinct_locations, EventPage, FilterState};

/// The read-only event list, loaded once and shared for the lifetime of the
/// process. Location options and the id index are derived at load time.
#[derive(Debug, Clone, Default)]
pub struct EventDataset {
    events: Vec<Event>,
    locations: Vec<String>,
    by_id: HashMap<String, usize>,
}

impl EventDataset {
    pub fn from_events(mut events: Vec<Event>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(events.len());
        for (position, event) in events.iter_mut().enumerate() {
            if by_id.insert(event.id.clone(), position).is_some() {
                return Err(ExplorerError::DuplicateEventId(event.id.clone()));
            }
            if event.image.trim().is_empty() {
                debug!(event_id = %event.id, "No image, using placeholder");
                event.image = PLACEHOLDER_IMAGE.to_string();
            }
        }

        let locations = distinct_locations(&events);
        Ok(Self {
            events,
            locations,
            by_id,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        Self::from_events(events)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            events = dataset.len(),
            locations = dataset.locations.len(),
            "Loaded event dataset"
        );
        Ok(dataset)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Distinct locations, ascending, for the location selector.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.by_id.get(id).map(|&position| &self.events[position])
    }

    /// Identifiers in dataset order, one per detail route.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|event| event.id.as_str())
    }

    pub fn page(&self, state: &FilterState) -> EventPage<'_> {
        state.apply(&self.events)
    }
}

/// Finds the event with the given identifier; `None` means not found.
pub fn resolve_by_id<'a>(all: &'a [Event], id: &str) -> Option<&'a Event> {
    all.iter().find(|event| event.id == id)
}

pub fn event_ids(all: &[Event]) -> Vec<&str> {
    all.iter().map(|event| event.id.as_str()).collect()
}
