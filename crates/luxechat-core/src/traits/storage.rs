// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store trait for persistence backends.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::LuxeError;
use crate::traits::adapter::Adapter;
use crate::types::StoreChange;

/// Adapter for the browser-local-storage-shaped persistence layer.
///
/// Values are opaque strings (the stores serialize JSON into them). Every
/// successful `set` or `remove` fires the change broadcast; the event has
/// no payload, so listeners re-read whichever key they care about.
#[async_trait]
pub trait KeyValueStore: Adapter {
    /// Prepares the backend (connections, migrations). Idempotent backends
    /// may keep the default no-op.
    async fn initialize(&self) -> Result<(), LuxeError> {
        Ok(())
    }

    /// Flushes pending writes and releases the backend.
    async fn close(&self) -> Result<(), LuxeError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, LuxeError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), LuxeError>;

    async fn remove(&self, key: &str) -> Result<(), LuxeError>;

    /// Subscribes to the generic change broadcast.
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}
