//! Visitor id to store handle mapping.

use std::sync::Arc;
use std::time::Duration;

use fabu_core::{Catalog, UiState};
use moka::future::Cache;
use tracing::{debug, warn};
use uuid::Uuid;

use super::StoreHandle;
use crate::config::StoreConfig;

/// Live visitor stores, evicted after the configured idle time.
///
/// Dropping the cached handle stops the visitor's store task, so eviction
/// also releases its state and timers.
#[derive(Clone)]
pub struct VisitorRegistry {
    inner: Arc<VisitorRegistryInner>,
}

struct VisitorRegistryInner {
    visitors: Cache<Uuid, StoreHandle>,
    catalog: Catalog,
    grace: Duration,
}

impl VisitorRegistry {
    #[must_use]
    pub fn new(catalog: Catalog, config: &StoreConfig) -> Self {
        let visitors = Cache::builder()
            .max_capacity(config.max_visitors)
            .time_to_idle(config.visitor_idle)
            .build();

        Self {
            inner: Arc::new(VisitorRegistryInner {
                visitors,
                catalog,
                grace: config.modal_grace,
            }),
        }
    }

    /// The store for `visitor`, spawning one if the visitor is new or was
    /// evicted.
    ///
    /// A new store starts on the home view; the page reports its fragment
    /// once loaded.
    pub async fn get_or_spawn(&self, visitor: Uuid) -> StoreHandle {
        let inner = &self.inner;
        let handle = inner
            .visitors
            .get_with(visitor, async {
                debug!(%visitor, "new visitor store");
                self.spawn(visitor)
            })
            .await;

        if !handle.is_closed() {
            return handle;
        }

        warn!(%visitor, "visitor store had stopped, replacing it");
        let handle = self.spawn(visitor);
        inner.visitors.insert(visitor, handle.clone()).await;
        handle
    }

    fn spawn(&self, visitor: Uuid) -> StoreHandle {
        StoreHandle::spawn(
            visitor,
            self.inner.catalog.clone(),
            self.inner.grace,
            UiState::new(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fabu_core::{Action, Fragment, ProductId, View};

    use super::*;

    fn registry() -> VisitorRegistry {
        VisitorRegistry::new(Catalog::fabu().unwrap(), &StoreConfig::default())
    }

    #[tokio::test]
    async fn test_same_visitor_same_store() {
        let registry = registry();
        let visitor = Uuid::new_v4();

        let first = registry.get_or_spawn(visitor).await;
        first
            .dispatch(Action::AddToCart(ProductId::new("2")))
            .await
            .unwrap();

        let second = registry.get_or_spawn(visitor).await;
        assert_eq!(second.snapshot().await.unwrap().item_count, 1);
    }

    #[tokio::test]
    async fn test_visitors_are_isolated() {
        let registry = registry();
        let a = registry.get_or_spawn(Uuid::new_v4()).await;
        let b = registry.get_or_spawn(Uuid::new_v4()).await;

        a.dispatch(Action::AddToCart(ProductId::new("1")))
            .await
            .unwrap();
        assert_eq!(b.snapshot().await.unwrap().item_count, 0);
    }

    #[tokio::test]
    async fn test_state_survives_lookups() {
        let registry = registry();
        let visitor = Uuid::new_v4();

        let store = registry.get_or_spawn(visitor).await;
        assert_eq!(store.snapshot().await.unwrap().view, View::Home);
        store
            .dispatch(Action::FragmentChanged(Fragment::from("#our-story")))
            .await
            .unwrap();

        let store = registry.get_or_spawn(visitor).await;
        assert_eq!(store.snapshot().await.unwrap().view, View::OurStory);
    }
}
