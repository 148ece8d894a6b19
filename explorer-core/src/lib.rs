//! Core logic for Events Explorer: the read-only event dataset, the
//! filter/search engine behind the list view, detail lookup, and the hero
//! carousel (pure state machine plus a cancellable auto-play task).
//!
//! Nothing in this crate knows about HTTP or templates.

pub mod autoplay;
pub mod carousel;
pub mod common;
pub mod dataset;
pub mod domain;
pub mod filter;
pub mod format;

pub use autoplay::{CarouselController, CarouselHandle, DEFAULT_INTERVAL};
pub use carousel::Carousel;
pub use common::error::{ExplorerError, Result};
pub use dataset::{event_ids, resolve_by_id, EventDataset};
pub use domain::*;
pub use filter::{distinct_locations, filter_events, paginate, EventPage, FilterState, PAGE_SIZE};
