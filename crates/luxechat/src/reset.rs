// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `luxechat reset` command implementation.

use std::sync::Arc;

use luxechat_config::LuxeConfig;
use luxechat_core::{KeyValueStore, LuxeError};
use luxechat_engine::ConversationStore;
use luxechat_storage::SqliteStore;

/// Clears the persisted conversation history back to the greeting turn.
pub async fn run_reset(config: LuxeConfig) -> Result<(), LuxeError> {
    let storage = SqliteStore::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(storage);

    let mut conversation = ConversationStore::open(
        storage.clone(),
        config.agent.greeting.clone(),
        config.history.max_turns,
    )
    .await?;
    conversation.reset().await?;
    println!("conversation history cleared");

    storage.close().await?;
    Ok(())
}
