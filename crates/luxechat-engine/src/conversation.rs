// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history backed by the key-value store.
//!
//! The full turn sequence is serialized under one key after every append.
//! An empty or unparsable payload falls back to the canned greeting turn
//! instead of failing.

use std::sync::Arc;

use tracing::{debug, warn};

use luxechat_core::{ChatTurn, KeyValueStore, LuxeError};

/// Storage key holding the serialized turn sequence.
pub const HISTORY_KEY: &str = "chat.history";

/// Ordered conversation history with persist-on-append semantics.
pub struct ConversationStore {
    store: Arc<dyn KeyValueStore>,
    greeting: String,
    /// Maximum persisted turns; 0 disables the cap.
    max_turns: usize,
    turns: Vec<ChatTurn>,
}

impl ConversationStore {
    /// Loads the conversation from storage, falling back to the greeting
    /// turn when the key is absent, empty, or corrupt.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        greeting: impl Into<String>,
        max_turns: usize,
    ) -> Result<Self, LuxeError> {
        let greeting = greeting.into();
        let turns = load_turns(store.as_ref(), &greeting).await?;
        Ok(Self {
            store,
            greeting,
            max_turns,
            turns,
        })
    }

    /// The current turn sequence, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Appends a turn and persists the full sequence.
    ///
    /// When the configured cap is exceeded, the oldest turns are dropped
    /// before persisting.
    pub async fn append(&mut self, turn: ChatTurn) -> Result<(), LuxeError> {
        self.turns.push(turn);
        if self.max_turns > 0 && self.turns.len() > self.max_turns {
            let excess = self.turns.len() - self.max_turns;
            self.turns.drain(..excess);
            debug!(dropped = excess, "trimmed conversation to configured cap");
        }
        self.persist().await
    }

    /// Clears storage and reinitializes to the greeting turn.
    pub async fn reset(&mut self) -> Result<(), LuxeError> {
        self.store.remove(HISTORY_KEY).await?;
        self.turns = vec![ChatTurn::assistant(self.greeting.clone())];
        Ok(())
    }

    async fn persist(&self) -> Result<(), LuxeError> {
        let payload = serde_json::to_string(&self.turns).map_err(|e| LuxeError::Storage {
            source: Box::new(e),
        })?;
        self.store.set(HISTORY_KEY, &payload).await
    }
}

async fn load_turns(
    store: &dyn KeyValueStore,
    greeting: &str,
) -> Result<Vec<ChatTurn>, LuxeError> {
    let fallback = || vec![ChatTurn::assistant(greeting)];

    match store.get(HISTORY_KEY).await? {
        None => Ok(fallback()),
        Some(raw) => match serde_json::from_str::<Vec<ChatTurn>>(&raw) {
            Ok(turns) if turns.is_empty() => Ok(fallback()),
            Ok(turns) => Ok(turns),
            Err(e) => {
                warn!(error = %e, "discarding unparsable conversation history");
                Ok(fallback())
            }
        },
    }
}
