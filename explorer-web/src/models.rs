// View models handed to the askama templates. Anything a template would
// otherwise have to compute (selection flags, counts, neighbour slides) is
// worked out here.
use explorer_core::autoplay::Playback;
use explorer_core::{Carousel, Event, EventDataset, EventPage, ExplorerError, FilterState, Slide};
use serde::Deserialize;
use uuid::Uuid;

/// Query string of the list view (`/` and `/events`).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub show_all: bool,
    pub slide: Option<usize>,
}

impl ListQuery {
    pub fn filter_state(&self) -> FilterState {
        FilterState::new()
            .with_location(self.location.clone())
            .with_search(self.search.clone())
            .with_show_all(self.show_all)
    }

    pub fn links(&self) -> PageLinks {
        PageLinks {
            style: LinkStyle::Query,
            slide: self.slide.unwrap_or(0),
            show_all: self.show_all,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LiveQuery {
    pub start: Option<usize>,
    #[serde(default)]
    pub show_all: bool,
}

/// How a rendered page addresses the other list pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Query strings answered by the server, e.g. `/?slide=1&show_all=true`.
    Query,
    /// Pre-rendered directories of an exported site, e.g. `/slides/1/all/`.
    Static,
}

/// The list page being rendered, used to build links to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinks {
    pub style: LinkStyle,
    pub slide: usize,
    pub show_all: bool,
}

impl PageLinks {
    pub fn page(&self, slide: usize, show_all: bool) -> String {
        match self.style {
            LinkStyle::Query => match (slide, show_all) {
                (0, false) => "/".to_string(),
                (0, true) => "/?show_all=true".to_string(),
                (k, false) => format!("/?slide={}", k),
                (k, true) => format!("/?slide={}&show_all=true", k),
            },
            LinkStyle::Static => format!("/{}", static_page_dir(slide, show_all)),
        }
    }

    /// Same window, another slide.
    pub fn slide_href(&self, slide: usize) -> String {
        self.page(slide, self.show_all)
    }

    /// Same slide, another window.
    pub fn show_all_href(&self, show_all: bool) -> String {
        self.page(self.slide, show_all)
    }
}

/// Directory of an exported list page relative to the site root.
pub fn static_page_dir(slide: usize, show_all: bool) -> String {
    match (slide, show_all) {
        (0, false) => String::new(),
        (0, true) => "all/".to_string(),
        (k, false) => format!("slides/{}/", k),
        (k, true) => format!("slides/{}/all/", k),
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarouselAction {
    Next,
    Previous,
    Pause,
    Resume,
}

impl CarouselAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CarouselAction::Next => "next",
            CarouselAction::Previous => "previous",
            CarouselAction::Pause => "pause",
            CarouselAction::Resume => "resume",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocationOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct FilterView {
    pub search: String,
    pub options: Vec<LocationOption>,
    pub all_selected: bool,
    pub show_all: bool,
}

impl FilterView {
    pub fn new(dataset: &EventDataset, state: &FilterState) -> Self {
        let options = dataset
            .locations()
            .iter()
            .map(|name| LocationOption {
                selected: *name == state.location,
                name: name.clone(),
            })
            .collect::<Vec<_>>();
        Self {
            search: state.search.clone(),
            all_selected: !options.iter().any(|o| o.selected),
            options,
            show_all: state.show_all,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultsView {
    pub events: Vec<Event>,
    pub total: usize,
    pub shown: usize,
    pub has_more: bool,
    pub can_collapse: bool,
    pub location: String,
    pub search: String,
    pub show_all: bool,
    /// Offer "Clear All Filters" only when a location or search is set.
    pub filtering: bool,
    pub clear_href: String,
    pub more_href: String,
    pub less_href: String,
}

impl ResultsView {
    pub fn new(page: &EventPage<'_>, state: &FilterState, links: PageLinks) -> Self {
        let cleared = state.clone().cleared();
        Self {
            events: page.visible.iter().map(|&event| event.clone()).collect(),
            total: page.total,
            shown: page.visible.len(),
            has_more: page.has_more(),
            can_collapse: page.can_collapse(),
            location: state.location.clone(),
            search: state.search.clone(),
            show_all: state.show_all,
            filtering: state.is_filtering(),
            clear_href: links.show_all_href(cleared.show_all),
            more_href: links.show_all_href(true),
            less_href: links.show_all_href(false),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn found_label(&self) -> String {
        if self.total == 1 {
            "1 event found".to_string()
        } else {
            format!("{} events found", self.total)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlideView {
    pub id: u32,
    pub image: &'static str,
    pub gradient: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct DotView {
    pub index: usize,
    pub number: usize,
    pub active: bool,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct CarouselView {
    pub slides: Vec<SlideView>,
    pub dots: Vec<DotView>,
    pub current: Slide,
    pub index: usize,
    pub previous_index: usize,
    pub next_index: usize,
    pub previous_href: String,
    pub next_href: String,
    pub progress_percent: String,
    pub playing: bool,
    /// Set when the page streams the carousel from a server-side controller.
    pub live: bool,
    pub view_id: String,
}

impl CarouselView {
    pub fn new(
        playback: Playback,
        slides: &[Slide],
        view_id: Option<Uuid>,
        links: PageLinks,
    ) -> Result<Self, ExplorerError> {
        let carousel = playback.carousel;
        let index = carousel.index();
        let current = slides.get(index).copied().ok_or(ExplorerError::SlideOutOfRange {
            index,
            len: slides.len(),
        })?;
        let previous_index = carousel.previous().index();
        let next_index = carousel.next().index();

        Ok(Self {
            slides: slides
                .iter()
                .enumerate()
                .map(|(i, slide)| SlideView {
                    id: slide.id,
                    image: slide.image,
                    gradient: slide.gradient,
                    active: i == index,
                })
                .collect(),
            dots: (0..carousel.slide_count())
                .map(|i| DotView {
                    index: i,
                    number: i + 1,
                    active: i == index,
                    href: links.slide_href(i),
                })
                .collect(),
            current,
            index,
            previous_index,
            next_index,
            previous_href: links.slide_href(previous_index),
            next_href: links.slide_href(next_index),
            progress_percent: carousel.progress_percent(),
            playing: playback.playing,
            live: view_id.is_some(),
            view_id: view_id.map(|id| id.to_string()).unwrap_or_default(),
        })
    }

    /// The carousel at `links.slide` (slide 0 when out of range) in its
    /// initial playback state.
    pub fn at(slides: &[Slide], links: PageLinks, view_id: Option<Uuid>) -> Result<Self, ExplorerError> {
        let carousel = Carousel::starting_at(slides.len(), links.slide)?;
        Self::new(
            Playback {
                carousel,
                playing: view_id.is_some(),
            },
            slides,
            view_id,
            links,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_core::DEFAULT_SLIDES;

    fn query_links(slide: usize, show_all: bool) -> PageLinks {
        PageLinks {
            style: LinkStyle::Query,
            slide,
            show_all,
        }
    }

    fn dataset() -> EventDataset {
        EventDataset::from_json_str(
            r#"[
            {"id": "a", "title": "Jazz Night", "date": "2025-03-15", "time": "7:00 PM - 10:00 PM",
             "location": "NYC", "description": "live music", "fullDescription": "",
             "category": "Music", "organizer": "x", "price": "$5"},
            {"id": "b", "title": "Tech Talk", "date": "2025-03-16", "time": "6:00 PM - 8:00 PM",
             "location": "SF", "description": "developer meetup", "fullDescription": "",
             "category": "Tech", "organizer": "y", "price": "Free"}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_filter_view_marks_selection() {
        let dataset = dataset();
        let view = FilterView::new(&dataset, &FilterState::new().with_location("SF"));
        assert!(!view.all_selected);
        let selected: Vec<_> = view.options.iter().filter(|o| o.selected).map(|o| o.name.as_str()).collect();
        assert_eq!(selected, vec!["SF"]);

        let view = FilterView::new(&dataset, &FilterState::new());
        assert!(view.all_selected);
    }

    #[test]
    fn test_unknown_location_selects_all() {
        let dataset = dataset();
        let view = FilterView::new(&dataset, &FilterState::new().with_location("LA"));
        assert!(view.all_selected);
    }

    #[test]
    fn test_found_label_pluralises() {
        let dataset = dataset();
        let state = FilterState::new().with_search("jazz");
        let view = ResultsView::new(&dataset.page(&state), &state, query_links(0, false));
        assert_eq!(view.found_label(), "1 event found");

        let state = FilterState::new();
        let view = ResultsView::new(&dataset.page(&state), &state, query_links(0, false));
        assert_eq!(view.found_label(), "2 events found");
    }

    #[test]
    fn test_carousel_view_neighbours() {
        let view = CarouselView::at(&DEFAULT_SLIDES, query_links(0, false), None).unwrap();
        assert_eq!(view.previous_index, 2);
        assert_eq!(view.next_index, 1);
        assert_eq!(view.current.title, "DISCOVER YOUR");
        assert!(view.slides[0].active && !view.slides[1].active);
        assert!(!view.live);
        assert!(view.view_id.is_empty());
    }

    #[test]
    fn test_carousel_view_out_of_range_slide_falls_back() {
        let view = CarouselView::at(&DEFAULT_SLIDES, query_links(9, false), None).unwrap();
        assert_eq!(view.index, 0);
        assert_eq!(view.dots.iter().filter(|d| d.active).count(), 1);
    }

    #[test]
    fn test_carousel_links_keep_show_all() {
        let view = CarouselView::at(&DEFAULT_SLIDES, query_links(1, true), None).unwrap();
        assert_eq!(view.next_href, "/?slide=2&show_all=true");
        assert_eq!(view.previous_href, "/?show_all=true");
        assert_eq!(view.dots[1].href, "/?slide=1&show_all=true");
    }

    #[test]
    fn test_static_links_point_at_exported_pages() {
        let links = PageLinks {
            style: LinkStyle::Static,
            slide: 2,
            show_all: false,
        };
        assert_eq!(links.slide_href(0), "/");
        assert_eq!(links.slide_href(1), "/slides/1/");
        assert_eq!(links.show_all_href(true), "/slides/2/all/");
        assert_eq!(static_page_dir(0, true), "all/");
    }

    #[test]
    fn test_clear_keeps_show_all() {
        let dataset = dataset();
        let state = FilterState::new().with_search("zzz").with_show_all(true);
        let view = ResultsView::new(&dataset.page(&state), &state, query_links(0, true));
        assert!(view.filtering);
        assert_eq!(view.clear_href, "/?show_all=true");

        let state = FilterState::new();
        let view = ResultsView::new(&dataset.page(&state), &state, query_links(0, false));
        assert!(!view.filtering);
    }

    #[test]
    fn test_action_names() {
        let action: CarouselAction = serde_json::from_str("\"previous\"").unwrap();
        assert_eq!(action, CarouselAction::Previous);
    }
}
