// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./luxechat.toml` > `~/.config/luxechat/luxechat.toml`
//! > `/etc/luxechat/luxechat.toml` with environment variable overrides via the
//! `LUXECHAT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LuxeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/luxechat/luxechat.toml` (system-wide)
/// 3. `~/.config/luxechat/luxechat.toml` (user XDG config)
/// 4. `./luxechat.toml` (local directory)
/// 5. `LUXECHAT_*` environment variables
pub fn load_config() -> Result<LuxeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LuxeConfig::default()))
        .merge(Toml::file("/etc/luxechat/luxechat.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("luxechat/luxechat.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("luxechat.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LuxeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LuxeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LuxeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LuxeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LUXECHAT_GROQ_API_KEY` must map to
/// `groq.api_key`, not `groq.api.key`.
fn env_provider() -> Env {
    Env::prefixed("LUXECHAT_").map(|key| {
        // `key` is the env var name with prefix stripped. Figment lowercases
        // keys only after this mapper runs, so lowercase here to match.
        // Example: LUXECHAT_GROQ_API_KEY -> "groq_api_key"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("groq_", "groq.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("history_", "history.", 1)
            .replacen("admin_", "admin.", 1)
            .replacen("payment_", "payment.", 1);
        mapped.into()
    })
}
