// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for hosted language-model APIs.

use async_trait::async_trait;

use crate::error::LuxeError;
use crate::traits::adapter::Adapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a hosted completion API.
///
/// The contract is single-shot: one request, one full JSON body back.
/// Providers must map an HTTP 429 to [`LuxeError::RateLimited`] so the
/// resolver can surface the busy-specific apology.
#[async_trait]
pub trait CompletionProvider: Adapter {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LuxeError>;
}
