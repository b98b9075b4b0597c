// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the luxechat lead engine.

use thiserror::Error;

/// The primary error type used across all luxechat adapter traits and core operations.
#[derive(Debug, Error)]
pub enum LuxeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (API failure, malformed response, network).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The completion API returned HTTP 429. Distinguished so callers can
    /// surface a specific busy message instead of the generic apology.
    #[error("provider rate limited")]
    RateLimited,

    /// Rejected user input (empty submission, malformed card number).
    /// Raised before any state change.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Admin authentication failures (bad credentials, missing session).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
