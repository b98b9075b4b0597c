// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as sampling ranges and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::LuxeConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LuxeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.agent.greeting.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.greeting must not be empty".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.groq.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "groq.max_tokens must be at least 1".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.groq.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "groq.temperature must be within 0.0..=2.0, got {}",
                config.groq.temperature
            ),
        });
    }

    if config.groq.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "groq.base_url must not be empty".to_string(),
        });
    }

    if config.history.context_window == 0 {
        errors.push(ConfigError::Validation {
            message: "history.context_window must be at least 1".to_string(),
        });
    }

    // A cap smaller than the resolver window would starve the prompt.
    if config.history.max_turns != 0
        && config.history.max_turns < config.history.context_window
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "history.max_turns ({}) must be 0 or >= history.context_window ({})",
                config.history.max_turns, config.history.context_window
            ),
        });
    }

    if let Some(password) = &config.admin.password
        && password.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "admin.password must not be blank; omit it to disable admin login"
                .to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
