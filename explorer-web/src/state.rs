use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use explorer_core::{EventDataset, Slide, DEFAULT_SLIDES};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::WebConfig;
use crate::views::CarouselViews;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<EventDataset>,
    pub slides: &'static [Slide],
    pub carousel_interval: Duration,
    pub views: CarouselViews,
    pub static_dir: PathBuf,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(dataset: EventDataset, config: &WebConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            slides: &DEFAULT_SLIDES,
            carousel_interval: config.carousel_interval,
            views: CarouselViews::default(),
            static_dir: config.static_dir.clone(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
