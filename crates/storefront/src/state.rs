//! Application state shared across handlers.

use std::sync::Arc;

use fabu_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::store::VisitorRegistry;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("content error: {0}")]
    Content(#[from] ContentError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, rendered content and visitor stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
    visitors: VisitorRegistry,
}

impl AppState {
    /// Create application state with the FABU catalog and content loaded
    /// from `config.content_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fails validation or the content
    /// directory cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = Catalog::fabu()?;
        let content = ContentStore::load(&config.content_dir)?;
        Ok(Self::with_parts(config, catalog, content))
    }

    /// Assemble state from already-loaded parts.
    #[must_use]
    pub fn with_parts(config: StorefrontConfig, catalog: Catalog, content: ContentStore) -> Self {
        let visitors = VisitorRegistry::new(catalog.clone(), &config.store);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
                visitors,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    #[must_use]
    pub fn visitors(&self) -> &VisitorRegistry {
        &self.inner.visitors
    }
}
