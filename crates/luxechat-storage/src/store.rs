// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the KeyValueStore trait.

use async_trait::async_trait;
use tokio::sync::{OnceCell, broadcast};
use tracing::debug;

use luxechat_config::model::StorageConfig;
use luxechat_core::{Adapter, HealthStatus, KeyValueStore, LuxeError, StoreChange};

use crate::database::Database;
use crate::queries;

/// Capacity of the change broadcast. Listeners that lag simply miss events
/// and re-read on the next one.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// SQLite-backed key-value store.
///
/// Wraps a [`Database`] handle and delegates query operations to the typed
/// query module. The database is lazily initialized on the first call to
/// [`KeyValueStore::initialize`]. Every `set`/`remove` fires the generic
/// change broadcast.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
    changes: broadcast::Sender<StoreChange>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`KeyValueStore::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            config,
            db: OnceCell::new(),
            changes,
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, LuxeError> {
        self.db.get().ok_or_else(|| LuxeError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    fn notify(&self) {
        // No receivers is fine; the dashboard may simply not be watching.
        let _ = self.changes.send(StoreChange);
    }
}

#[async_trait]
impl Adapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LuxeError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn initialize(&self) -> Result<(), LuxeError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| LuxeError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), LuxeError> {
        self.db()?.close().await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, LuxeError> {
        queries::get_value(self.db()?, key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LuxeError> {
        queries::set_value(self.db()?, key, value).await?;
        self.notify();
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LuxeError> {
        queries::remove_value(self.db()?, key).await?;
        self.notify();
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    async fn open_store(dir: &tempfile::TempDir) -> SqliteStore {
        let db_path = dir.path().join("store.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();
        store
    }

    #[tokio::test]
    async fn implements_adapter_identity() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(make_config(
            dir.path().join("id.db").to_str().unwrap(),
        ));
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn get_set_remove_round_trip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        assert_eq!(store.get("leads.records").await.unwrap(), None);
        store.set("leads.records", "[]").await.unwrap();
        assert_eq!(
            store.get("leads.records").await.unwrap().as_deref(),
            Some("[]")
        );
        store.remove("leads.records").await.unwrap();
        assert_eq!(store.get("leads.records").await.unwrap(), None);

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(make_config(
            dir.path().join("uninit.db").to_str().unwrap(),
        ));
        assert!(store.get("k").await.is_err());
        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn set_and_remove_fire_change_broadcast() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        let mut rx = store.subscribe();

        store.set("k", "v").await.unwrap();
        rx.recv().await.expect("set should broadcast a change");

        store.remove("k").await.unwrap();
        rx.recv().await.expect("remove should broadcast a change");
    }

    #[tokio::test]
    async fn values_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("persist.db");
        let config = make_config(db_path.to_str().unwrap());

        let store = SqliteStore::new(config.clone());
        store.initialize().await.unwrap();
        store.set("chat.history", "[1,2,3]").await.unwrap();
        store.close().await.unwrap();
        drop(store);

        let reopened = SqliteStore::new(config);
        reopened.initialize().await.unwrap();
        assert_eq!(
            reopened.get("chat.history").await.unwrap().as_deref(),
            Some("[1,2,3]")
        );
        reopened.close().await.unwrap();
    }
}
