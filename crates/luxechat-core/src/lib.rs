// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the luxechat lead engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the luxechat workspace. Storage backends and
//! completion providers implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LuxeError;
pub use types::{
    BuyType, ChatTurn, CompletionMessage, CompletionRequest, CompletionResponse,
    HealthStatus, Intent, LeadRecord, PaymentStatus, PropertyId, ResolvedReply, Role,
    StoreChange, TokenUsage,
};

// Re-export adapter traits at crate root.
pub use traits::{Adapter, CompletionProvider, KeyValueStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luxe_error_has_all_variants() {
        // Verify all 7 error variants exist and can be constructed.
        let _config = LuxeError::Config("test".into());
        let _storage = LuxeError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _provider = LuxeError::Provider {
            message: "test".into(),
            source: None,
        };
        let _rate_limited = LuxeError::RateLimited;
        let _invalid = LuxeError::InvalidInput("test".into());
        let _auth = LuxeError::Auth("test".into());
        let _internal = LuxeError::Internal("test".into());
    }

    #[test]
    fn error_messages_are_prefixed() {
        assert_eq!(
            LuxeError::Config("bad key".into()).to_string(),
            "configuration error: bad key"
        );
        assert_eq!(LuxeError::RateLimited.to_string(), "provider rate limited");
        assert_eq!(
            LuxeError::InvalidInput("empty".into()).to_string(),
            "invalid input: empty"
        );
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // Verifies the adapter traits compile and are accessible through
        // the public API. If any module is missing or has a compile error,
        // this test won't compile.
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_provider<T: CompletionProvider>() {}
        fn _assert_store<T: KeyValueStore>() {}
    }
}
