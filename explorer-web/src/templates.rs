use askama::Template;
use explorer_core::{Event, EventDataset, ExplorerError, FilterState, Slide};
use uuid::Uuid;

use crate::models::{CarouselView, FilterView, PageLinks, ResultsView};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub carousel: CarouselView,
    pub filter: FilterView,
    pub results: ResultsView,
    /// Enables the htmx wiring and the search form; off for exported pages.
    pub server: bool,
    pub swap_show_all: bool,
}

impl IndexTemplate {
    /// `view_id` is `None` for pages rendered without a server behind them.
    pub fn build(
        dataset: &EventDataset,
        slides: &[Slide],
        state: &FilterState,
        links: PageLinks,
        view_id: Option<Uuid>,
    ) -> Result<Self, ExplorerError> {
        let carousel = CarouselView::at(slides, links, view_id)?;
        let links = PageLinks {
            slide: carousel.index,
            ..links
        };
        Ok(Self {
            carousel,
            filter: FilterView::new(dataset, state),
            results: ResultsView::new(&dataset.page(state), state, links),
            server: view_id.is_some(),
            swap_show_all: false,
        })
    }
}

/// The `#event-results` region, swapped in by htmx.
#[derive(Template)]
#[template(path = "partials/results.html")]
pub struct EventsListTemplate {
    pub results: ResultsView,
    pub server: bool,
    /// Also updates the filter form's `show_all` input out of band.
    pub swap_show_all: bool,
}

/// The hero slide, pushed over SSE and served for `/carousel`.
#[derive(Template)]
#[template(path = "partials/carousel.html")]
pub struct CarouselTemplate {
    pub carousel: CarouselView,
}

#[derive(Template)]
#[template(path = "event.html")]
pub struct EventDetailTemplate {
    pub event: Event,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub heading: &'static str,
    pub message: String,
}

impl NotFoundTemplate {
    pub fn for_event(id: &str) -> Self {
        Self {
            heading: "Event not found",
            message: format!("No event with id \"{}\" exists.", id),
        }
    }

    pub fn for_path(path: &str) -> Self {
        Self {
            heading: "Page not found",
            message: format!("Nothing lives at {}.", path),
        }
    }
}
