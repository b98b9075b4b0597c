// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory KeyValueStore for deterministic tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast};

use luxechat_core::{Adapter, HealthStatus, KeyValueStore, LuxeError, StoreChange};

/// HashMap-backed store with the same change-broadcast semantics as the
/// SQLite implementation.
pub struct MemoryKv {
    map: Mutex<HashMap<String, String>>,
    changes: broadcast::Sender<StoreChange>,
}

impl MemoryKv {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            map: Mutex::new(HashMap::new()),
            changes,
        }
    }

    /// Seeds a key without firing the change broadcast, for test setup.
    pub async fn seed(&self, key: &str, value: &str) {
        self.map
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MemoryKv {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LuxeError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, LuxeError> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LuxeError> {
        self.map
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        let _ = self.changes.send(StoreChange);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LuxeError> {
        self.map.lock().await.remove(key);
        let _ = self.changes.send(StoreChange);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
