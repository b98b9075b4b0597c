// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockCompletion` implements `CompletionProvider` with pre-scripted
//! outcomes, enabling fast, CI-runnable tests without external API calls.
//! It also counts calls so tests can assert the quick-reply fast path
//! really bypasses the network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use luxechat_core::{
    Adapter, CompletionProvider, CompletionRequest, CompletionResponse, HealthStatus,
    LuxeError, TokenUsage,
};

/// One scripted provider outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this raw message content.
    Reply(String),
    /// Return a response with no content at all.
    MissingContent,
    /// Fail with [`LuxeError::RateLimited`].
    RateLimited,
    /// Fail with a generic provider error.
    Failure(String),
}

/// A mock completion provider that pops outcomes from a FIFO queue.
///
/// When the queue is empty, a benign chat reply is returned. Every
/// request is recorded for later inspection.
pub struct MockCompletion {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl MockCompletion {
    /// Create a new mock with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(outcomes)),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a raw reply body.
    pub async fn push_reply(&self, content: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(MockOutcome::Reply(content.into()));
    }

    /// Queue an arbitrary outcome.
    pub async fn push_outcome(&self, outcome: MockOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Number of `complete` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copies of every request received, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LuxeError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LuxeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);

        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                MockOutcome::Reply(
                    r#"{"text":"Ada yang bisa saya bantu?","ids":[],"intent":"chat"}"#
                        .to_string(),
                )
            });

        match outcome {
            MockOutcome::Reply(content) => Ok(CompletionResponse {
                content: Some(content),
                usage: Some(TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                }),
            }),
            MockOutcome::MissingContent => Ok(CompletionResponse {
                content: None,
                usage: None,
            }),
            MockOutcome::RateLimited => Err(LuxeError::RateLimited),
            MockOutcome::Failure(message) => Err(LuxeError::Provider {
                message,
                source: None,
            }),
        }
    }
}
