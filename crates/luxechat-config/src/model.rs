// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the luxechat lead engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level luxechat configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LuxeConfig {
    /// Assistant identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Groq completion API settings.
    #[serde(default)]
    pub groq: GroqConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Conversation history settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Admin panel credentials.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Simulated payment settings.
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The canned greeting shown as the first turn of every conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            greeting: default_greeting(),
        }
    }
}

fn default_agent_name() -> String {
    "Luxe Assistant".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_greeting() -> String {
    "Halo! Selamat datang di LuxeEstate. Ada properti impian yang sedang Anda cari?"
        .to_string()
}

/// Groq completion API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroqConfig {
    /// Groq API key. `None` requires the GROQ_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for completion requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Chat completions endpoint. Overridable for tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: default_base_url(),
        }
    }
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.5
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("luxechat").join("luxechat.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("luxechat.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Conversation history configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum persisted turns per conversation; oldest turns are dropped
    /// first. 0 disables the cap.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// How many trailing turns accompany each resolver request.
    #[serde(default = "default_context_window")]
    pub context_window: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            context_window: default_context_window(),
        }
    }
}

fn default_max_turns() -> usize {
    200
}

fn default_context_window() -> usize {
    3
}

/// Admin panel credential configuration.
///
/// Credentials live here (or in env overrides), never in code. A missing
/// password disables admin login entirely.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Admin username.
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// Admin password. `None` disables admin login.
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: None,
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

/// Simulated payment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentConfig {
    /// Artificial processing delay, in milliseconds.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

fn default_processing_delay_ms() -> u64 {
    2500
}
