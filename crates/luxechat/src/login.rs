// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `luxechat login` / `luxechat logout` command implementations.

use std::sync::Arc;

use luxechat_auth::AdminAuth;
use luxechat_config::LuxeConfig;
use luxechat_core::{KeyValueStore, LuxeError};
use luxechat_storage::SqliteStore;

/// Runs the `luxechat login` command.
pub async fn run_login(
    config: LuxeConfig,
    username: Option<String>,
) -> Result<(), LuxeError> {
    let storage = SqliteStore::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(storage);

    let auth = AdminAuth::new(storage.clone(), config.admin.clone());
    if !auth.enabled() {
        storage.close().await?;
        return Err(LuxeError::Auth(
            "admin login is disabled: set admin.password in luxechat.toml".to_string(),
        ));
    }

    let username = username.unwrap_or_else(|| config.admin.username.clone());
    let password = rpassword::prompt_password(format!("Password for {username}: "))
        .map_err(|e| LuxeError::Internal(format!("failed to read password: {e}")))?;

    let session = auth.login(&username, &password).await?;
    println!("logged in as {}", session.username);

    storage.close().await?;
    Ok(())
}

/// Runs the `luxechat logout` command.
pub async fn run_logout(config: LuxeConfig) -> Result<(), LuxeError> {
    let storage = SqliteStore::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(storage);

    let auth = AdminAuth::new(storage.clone(), config.admin.clone());
    auth.logout().await?;
    println!("logged out");

    storage.close().await?;
    Ok(())
}
