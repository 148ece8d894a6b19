use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

pub const PAGE_VIEWS: &str = "explorer_page_views_total";
pub const EVENT_NOT_FOUND: &str = "explorer_event_not_found_total";
pub const CAROUSEL_COMMANDS: &str = "explorer_carousel_commands_total";
pub const CAROUSEL_VIEWS_ACTIVE: &str = "explorer_carousel_views_active";

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder once and returns the handle used to
/// render `/metrics`. Returns `None` if another recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if let Some(handle) = HANDLE.get() {
        return Some(handle.clone());
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("Prometheus recorder installed");
            Some(HANDLE.get_or_init(|| handle).clone())
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            None
        }
    }
}
