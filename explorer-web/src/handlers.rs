use std::convert::Infallible;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use explorer_core::{Carousel, CarouselController};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, WebError};
use crate::metrics::{CAROUSEL_COMMANDS, EVENT_NOT_FOUND, PAGE_VIEWS};
use crate::models::{
    CarouselAction, CarouselView, LinkStyle, ListQuery, LiveQuery, PageLinks, ResultsView,
};
use crate::state::AppState;
use crate::templates::{
    CarouselTemplate, EventDetailTemplate, EventsListTemplate, IndexTemplate, NotFoundTemplate,
};

fn render_index(state: &AppState, query: &ListQuery) -> Result<Html<String>> {
    let template = IndexTemplate::build(
        &state.dataset,
        state.slides,
        &query.filter_state(),
        query.links(),
        Some(Uuid::new_v4()),
    )?;
    Ok(Html(template.render()?))
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    metrics::counter!(PAGE_VIEWS, "page" => "index").increment(1);
    render_index(&state, &query)
}

pub async fn events_htmx(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Html<String>> {
    // htmx swaps only the results region; a plain request gets the full page.
    if headers.get("HX-Request").is_none() {
        metrics::counter!(PAGE_VIEWS, "page" => "index").increment(1);
        return render_index(&state, &query);
    }

    let filter = query.filter_state();
    debug!(location = %filter.location, search = %filter.search, show_all = filter.show_all, "Filtering events");
    let template = EventsListTemplate {
        results: ResultsView::new(&state.dataset.page(&filter), &filter, query.links()),
        server: true,
        swap_show_all: true,
    };
    Ok(Html(template.render()?))
}

pub async fn event_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    match state.dataset.get(&id) {
        Some(event) => {
            metrics::counter!(PAGE_VIEWS, "page" => "event").increment(1);
            let template = EventDetailTemplate {
                event: event.clone(),
            };
            Ok(Html(template.render()?).into_response())
        }
        None => {
            metrics::counter!(EVENT_NOT_FOUND).increment(1);
            debug!(%id, "Event not found");
            let template = NotFoundTemplate::for_event(&id);
            Ok((StatusCode::NOT_FOUND, Html(template.render()?)).into_response())
        }
    }
}

/// Static rendering of one slide, used by the no-JS carousel links.
pub async fn carousel_partial(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    let template = CarouselTemplate {
        carousel: CarouselView::at(state.slides, query.links(), None)?,
    };
    Ok(Html(template.render()?))
}

/// Starts an auto-playing carousel for `view_id` and streams every slide
/// change as an SSE `slide` event. The view is unmounted when the client
/// disconnects and the stream is dropped.
pub async fn carousel_live(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Query(query): Query<LiveQuery>,
) -> Result<Sse<impl Stream<Item = std::result::Result<SseEvent, Infallible>>>> {
    let carousel = Carousel::starting_at(state.slides.len(), query.start.unwrap_or(0))?;
    let links = PageLinks {
        style: LinkStyle::Query,
        slide: carousel.index(),
        show_all: query.show_all,
    };
    let handle = CarouselController::spawn(carousel, state.carousel_interval);
    let updates = handle.subscribe();
    let guard = state.views.mount(view_id, handle);
    let slides = state.slides;

    let stream = WatchStream::new(updates).map(move |playback| {
        let _mounted = &guard;
        let html = CarouselView::new(playback, slides, Some(view_id), links)
            .map_err(WebError::from)
            .and_then(|carousel| Ok(CarouselTemplate { carousel }.render()?))
            .unwrap_or_else(|e| {
                warn!(%view_id, error = %e, "Failed to render carousel slide");
                String::new()
            });
        Ok(SseEvent::default().event("slide").data(html))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

pub async fn carousel_command(
    State(state): State<AppState>,
    Path((view_id, action)): Path<(Uuid, CarouselAction)>,
) -> Result<StatusCode> {
    metrics::counter!(CAROUSEL_COMMANDS, "action" => action.as_str()).increment(1);
    state
        .views
        .with_view(view_id, |handle| match action {
            CarouselAction::Next => handle.next(),
            CarouselAction::Previous => handle.previous(),
            CarouselAction::Pause => handle.pause(),
            CarouselAction::Resume => handle.resume(),
        })
        .ok_or(WebError::UnknownView(view_id))??;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn carousel_goto(
    State(state): State<AppState>,
    Path((view_id, index)): Path<(Uuid, usize)>,
) -> Result<StatusCode> {
    metrics::counter!(CAROUSEL_COMMANDS, "action" => "goto").increment(1);
    state
        .views
        .with_view(view_id, |handle| handle.go_to(index))
        .ok_or(WebError::UnknownView(view_id))??;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "explorer-web",
        "version": env!("CARGO_PKG_VERSION"),
        "events": state.dataset.len(),
        "live_carousels": state.views.running(),
    }))
}

pub async fn metrics_text(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "Metrics recorder not installed").into_response(),
    }
}

pub async fn not_found(uri: Uri) -> Result<Response> {
    let template = NotFoundTemplate::for_path(uri.path());
    Ok((StatusCode::NOT_FOUND, Html(template.render()?)).into_response())
}
