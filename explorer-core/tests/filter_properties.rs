use explorer_core::{
    distinct_locations, event_ids, filter_events, paginate, resolve_by_id, EventDataset, FilterState,
    PAGE_SIZE,
};

fn dataset() -> EventDataset {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/events.json");
    EventDataset::load(path).expect("sample dataset should load")
}

fn sample_queries(dataset: &EventDataset) -> (Vec<String>, Vec<&'static str>) {
    let mut locations = dataset.locations().to_vec();
    locations.push(String::new());
    locations.push("Nowhere, ZZ".to_string());
    let searches = vec!["", "music", "CONFERENCE", "art", "zzz-no-match", " ", "Tech"];
    (locations, searches)
}

#[test]
fn location_filter_is_exact_or_absent() {
    let dataset = dataset();
    let (locations, _) = sample_queries(&dataset);
    for location in &locations {
        let results = filter_events(dataset.events(), location, "");
        if location.is_empty() {
            assert_eq!(results.len(), dataset.len());
        } else {
            assert!(results.iter().all(|e| &e.location == location));
            let expected = dataset.events().iter().filter(|e| &e.location == location).count();
            assert_eq!(results.len(), expected);
        }
    }
}

#[test]
fn search_filter_keeps_exactly_the_matches() {
    let dataset = dataset();
    let (_, searches) = sample_queries(&dataset);
    for search in searches {
        let needle = search.to_lowercase();
        let results = filter_events(dataset.events(), "", search);
        for event in dataset.events() {
            let matches = needle.is_empty()
                || event.title.to_lowercase().contains(&needle)
                || event.description.to_lowercase().contains(&needle);
            let kept = results.iter().any(|e| e.id == event.id);
            assert_eq!(matches, kept, "search {:?} event {}", search, event.id);
        }
    }
}

#[test]
fn filter_preserves_dataset_order() {
    let dataset = dataset();
    let (locations, searches) = sample_queries(&dataset);
    let position = |id: &str| dataset.ids().position(|candidate| candidate == id);
    for location in &locations {
        for search in &searches {
            let results = filter_events(dataset.events(), location, search);
            let positions: Vec<_> = results.iter().map(|e| position(e.id.as_str())).collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}

#[test]
fn paginate_returns_prefix() {
    let dataset = dataset();
    let filtered = filter_events(dataset.events(), "", "");
    assert!(filtered.len() > PAGE_SIZE, "sample data should exceed one page");

    let window = paginate(&filtered, false);
    assert_eq!(window.len(), PAGE_SIZE.min(filtered.len()));
    assert_eq!(window, &filtered[..window.len()]);
    assert_eq!(paginate(&filtered, true), filtered.as_slice());
}

#[test]
fn show_all_toggle_keeps_selections() {
    let dataset = dataset();
    let state = FilterState::new().with_search("a");
    let collapsed = dataset.page(&state);
    let expanded = dataset.page(&state.clone().toggle_show_all());
    assert_eq!(collapsed.total, expanded.total);
    assert_eq!(expanded.visible.len(), expanded.total);
    assert_eq!(&expanded.visible[..collapsed.visible.len()], collapsed.visible.as_slice());
}

#[test]
fn locations_are_unique_and_sorted() {
    let dataset = dataset();
    let locations = distinct_locations(dataset.events());
    assert!(locations.windows(2).all(|pair| pair[0] < pair[1]));
    for event in dataset.events() {
        assert!(locations.contains(&event.location));
    }
    assert_eq!(locations, dataset.locations());
}

#[test]
fn every_route_resolves() {
    let dataset = dataset();
    for id in event_ids(dataset.events()) {
        assert_eq!(resolve_by_id(dataset.events(), id).map(|e| e.id.as_str()), Some(id));
    }
    assert!(resolve_by_id(dataset.events(), "does-not-exist").is_none());
}
