use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    carousel_command, carousel_goto, carousel_live, carousel_partial, event_detail, events_htmx,
    health, index, metrics_text, not_found,
};
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();

    Router::new()
        .route("/", get(index))
        .route("/events", get(events_htmx))
        .route("/events/:id", get(event_detail))
        .route("/carousel", get(carousel_partial))
        .route("/carousel/:view/live", get(carousel_live))
        .route("/carousel/:view/goto/:index", post(carousel_goto))
        .route("/carousel/:view/:action", post(carousel_command))
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route_service("/placeholder.svg", ServeFile::new(static_dir.join("placeholder.svg")))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
