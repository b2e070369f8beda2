//! Catalog fetched once per session and shared through a broadcast cache.

use contracts::domain::a002_proficiency::aggregate::ProficiencyCatalog;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::api;
use crate::shared::broadcast_cache::{BroadcastCache, SubscriptionId};

/// Provided at the app root. Only `refresh` writes the cache.
#[derive(Clone, Copy)]
pub struct CatalogService {
    cache: StoredValue<BroadcastCache<ProficiencyCatalog>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self {
            cache: StoredValue::new(BroadcastCache::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn latest(&self) -> Option<ProficiencyCatalog> {
        self.cache.with_value(|c| c.latest().cloned())
    }

    /// Receive the cached catalog now (if any) and every later refresh
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&ProficiencyCatalog) + Send + Sync + 'static,
    ) -> Option<SubscriptionId> {
        self.cache.try_update_value(|c| c.subscribe(subscriber))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.cache.update_value(|c| c.unsubscribe(id));
    }

    /// Subscribe a signal for the lifetime of the calling component
    pub fn bind(&self, target: RwSignal<ProficiencyCatalog>) {
        let svc = *self;
        if let Some(id) = svc.subscribe(move |catalog| target.set(catalog.clone())) {
            on_cleanup(move || svc.unsubscribe(id));
        }
        svc.ensure_loaded();
    }

    /// Fetch unless a catalog is cached or a fetch is running
    pub fn ensure_loaded(&self) {
        if self.latest().is_none() && !self.loading.get_untracked() {
            self.refresh();
        }
    }

    pub fn refresh(&self) {
        let svc = *self;
        svc.loading.set(true);
        spawn_local(async move {
            match api::fetch_catalog().await {
                Ok(catalog) => {
                    log::debug!("catalog: {} syllabi loaded", catalog.proficiencies.len());
                    svc.error.set(None);
                    svc.cache.update_value(|c| c.publish(catalog));
                }
                Err(e) => {
                    log::error!("catalog: fetch failed: {}", e);
                    svc.error
                        .set(Some(e.message_or("Could not load the proficiency catalog.")));
                }
            }
            svc.loading.set(false);
        });
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_catalog() -> CatalogService {
    use_context::<CatalogService>().expect("CatalogService not provided in context")
}
