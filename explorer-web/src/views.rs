//! Live carousel views.
//!
//! Each open page that streams the carousel gets a [`CarouselHandle`]
//! registered under the view id embedded in the page. The registry entry is
//! owned by a [`ViewGuard`] that lives inside the page's event stream, so a
//! closed page unmounts its view and stops its timer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use explorer_core::CarouselHandle;
use tracing::debug;
use uuid::Uuid;

use crate::metrics::CAROUSEL_VIEWS_ACTIVE;

#[derive(Default)]
struct Registry {
    views: HashMap<Uuid, (u64, CarouselHandle)>,
    next_generation: u64,
}

#[derive(Clone, Default)]
pub struct CarouselViews {
    inner: Arc<Mutex<Registry>>,
}

impl CarouselViews {
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `handle` for `view_id`, replacing (and stopping) any earlier
    /// controller for the same view.
    pub fn mount(&self, view_id: Uuid, handle: CarouselHandle) -> ViewGuard {
        let mut registry = self.lock();
        let generation = registry.next_generation;
        registry.next_generation += 1;
        registry.views.insert(view_id, (generation, handle));
        metrics::gauge!(CAROUSEL_VIEWS_ACTIVE).set(registry.views.len() as f64);
        debug!(%view_id, generation, "Carousel view mounted");

        ViewGuard {
            views: self.clone(),
            view_id,
            generation,
        }
    }

    /// Runs `f` against the view's controller, or returns `None` if the view
    /// is not mounted.
    pub fn with_view<R>(&self, view_id: Uuid, f: impl FnOnce(&CarouselHandle) -> R) -> Option<R> {
        let registry = self.lock();
        registry.views.get(&view_id).map(|(_, handle)| f(handle))
    }

    pub fn len(&self) -> usize {
        self.lock().views.len()
    }

    /// Mounted views whose controller task is still alive.
    pub fn running(&self) -> usize {
        self.lock()
            .views
            .values()
            .filter(|(_, handle)| handle.is_running())
            .count()
    }

    /// Unmounts every view and waits for the controllers to stop. Their
    /// event streams end, so open SSE connections close.
    pub async fn shutdown_all(&self) {
        let handles: Vec<CarouselHandle> = {
            let mut registry = self.lock();
            let handles = registry.views.drain().map(|(_, (_, handle))| handle).collect();
            metrics::gauge!(CAROUSEL_VIEWS_ACTIVE).set(0.0);
            handles
        };
        let count = handles.len();
        for handle in handles {
            handle.shutdown().await;
        }
        debug!(count, "Carousel views shut down");
    }

    fn unmount(&self, view_id: Uuid, generation: u64) {
        let removed = {
            let mut registry = self.lock();
            let current = matches!(registry.views.get(&view_id), Some((g, _)) if *g == generation);
            let removed = if current {
                registry.views.remove(&view_id)
            } else {
                None
            };
            metrics::gauge!(CAROUSEL_VIEWS_ACTIVE).set(registry.views.len() as f64);
            removed
        };
        // Dropping the handle aborts the controller task.
        if removed.is_some() {
            debug!(%view_id, generation, "Carousel view unmounted");
        }
    }
}

/// Keeps a view mounted while alive.
pub struct ViewGuard {
    views: CarouselViews,
    view_id: Uuid,
    generation: u64,
}

impl Drop for ViewGuard {
    fn drop(&mut self) {
        self.views.unmount(self.view_id, self.generation);
    }
}
