// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin session management for the dashboard commands.
//!
//! Credentials come from the `[admin]` config section, never from code.
//! A successful login issues an opaque session token persisted through
//! the key-value store; dashboard commands verify the token before
//! reading lead data. This is a client-side trust boundary only --
//! hardening beyond config-sourced credentials is out of scope.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use luxechat_config::model::AdminConfig;
use luxechat_core::{KeyValueStore, LuxeError};

/// Storage key holding the serialized admin session.
pub const SESSION_KEY: &str = "admin.session";

/// An issued admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Opaque session token.
    pub token: String,
    pub username: String,
    /// RFC 3339 issue timestamp.
    pub issued_at: String,
}

/// Verifies admin credentials and manages the persisted session.
pub struct AdminAuth {
    store: Arc<dyn KeyValueStore>,
    config: AdminConfig,
}

impl AdminAuth {
    pub fn new(store: Arc<dyn KeyValueStore>, config: AdminConfig) -> Self {
        Self { store, config }
    }

    /// Whether admin login is enabled at all (a password is configured).
    pub fn enabled(&self) -> bool {
        self.config.password.is_some()
    }

    /// Verifies the credentials and persists a fresh session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminSession, LuxeError> {
        let Some(expected_password) = self.config.password.as_deref() else {
            return Err(LuxeError::Auth(
                "admin login is disabled: no admin.password configured".to_string(),
            ));
        };

        if username != self.config.username || password != expected_password {
            warn!(username, "admin login rejected");
            return Err(LuxeError::Auth("wrong username or password".to_string()));
        }

        let session = AdminSession {
            token: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            issued_at: chrono::Utc::now().to_rfc3339(),
        };
        let payload = serde_json::to_string(&session).map_err(|e| LuxeError::Storage {
            source: Box::new(e),
        })?;
        self.store.set(SESSION_KEY, &payload).await?;
        info!(username, "admin session issued");
        Ok(session)
    }

    /// Returns the persisted session, if any. A corrupt payload is
    /// discarded and reads as no session.
    pub async fn current(&self) -> Result<Option<AdminSession>, LuxeError> {
        match self.store.get(SESSION_KEY).await? {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    warn!(error = %e, "discarding unparsable admin session");
                    Ok(None)
                }
            },
        }
    }

    /// Checks a token against the persisted session.
    pub async fn verify(&self, token: &str) -> Result<bool, LuxeError> {
        Ok(self
            .current()
            .await?
            .is_some_and(|session| session.token == token))
    }

    /// Removes the persisted session.
    pub async fn logout(&self) -> Result<(), LuxeError> {
        self.store.remove(SESSION_KEY).await?;
        info!("admin session cleared");
        Ok(())
    }
}
