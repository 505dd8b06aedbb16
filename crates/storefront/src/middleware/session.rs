//! Session middleware configuration.
//!
//! Sessions live in process memory, like the visitor stores they point at.
//! A restart forgets both.

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::{StoreConfig, StorefrontConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "fabu_session";

/// In-memory session store bounded like the visitor registry.
///
/// Records are dropped after the visitor idle time or when the store is
/// full, so one-off visitors cannot grow it without limit.
#[derive(Debug, Clone)]
pub struct VisitorSessionStore {
    records: Cache<Id, Record>,
}

impl VisitorSessionStore {
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let records = Cache::builder()
            .max_capacity(config.max_visitors)
            .time_to_idle(config.visitor_idle)
            .build();

        Self { records }
    }

    #[cfg(test)]
    async fn len(&self) -> u64 {
        self.records.run_pending_tasks().await;
        self.records.entry_count()
    }
}

#[async_trait]
impl SessionStore for VisitorSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer backed by [`VisitorSessionStore`].
///
/// Sessions expire after the same idle time as visitor stores.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<VisitorSessionStore> {
    let idle_secs = i64::try_from(config.store.visitor_idle.as_secs()).unwrap_or(i64::MAX);

    SessionManagerLayer::new(VisitorSessionStore::new(&config.store))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_secs),
        ))
        .with_secure(config.is_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use tower_sessions::cookie::time::Duration;

    use super::*;

    fn record(expires_in: Duration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    fn store(max_visitors: u64) -> VisitorSessionStore {
        VisitorSessionStore::new(&StoreConfig {
            max_visitors,
            ..StoreConfig::default()
        })
    }

    #[tokio::test]
    async fn test_saved_record_loads() {
        let store = store(10);
        let mut record = record(Duration::minutes(5));
        record.data.insert("visitor_id".to_string(), serde_json::json!("abc"));

        store.create(&mut record).await.unwrap();
        let loaded = store.load(&record.id).await.unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_expired_record_does_not_load() {
        let store = store(10);
        let record = record(Duration::seconds(-1));

        store.save(&record).await.unwrap();
        assert!(store.load(&record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleted_record_does_not_load() {
        let store = store(10);
        let record = record(Duration::minutes(5));

        store.save(&record).await.unwrap();
        store.delete(&record.id).await.unwrap();
        assert!(store.load(&record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_is_bounded_by_max_visitors() {
        let store = store(2);
        for _ in 0..50 {
            let mut record = record(Duration::minutes(5));
            store.create(&mut record).await.unwrap();
        }

        assert!(store.len().await <= 2);
    }
}
