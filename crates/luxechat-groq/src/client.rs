// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Groq chat completions API.
//!
//! Provides [`GroqClient`] which handles request construction and
//! authentication. There is deliberately no retry or backoff: a failed
//! call surfaces immediately and the resolver degrades it to a canned
//! apology reply. HTTP 429 maps to [`LuxeError::RateLimited`] so callers
//! can distinguish it.

use luxechat_config::model::GroqConfig;
use luxechat_core::LuxeError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// HTTP client for Groq API communication.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    /// Creates a new Groq API client.
    ///
    /// The API key is taken from the config, falling back to the
    /// `GROQ_API_KEY` environment variable.
    pub fn new(config: &GroqConfig) -> Result<Self, LuxeError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .ok_or_else(|| {
                LuxeError::Config(
                    "Groq API key required: set groq.api_key or GROQ_API_KEY".to_string(),
                )
            })?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            LuxeError::Config(format!("invalid API key header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LuxeError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Sends a chat completion request and returns the full response.
    ///
    /// Single attempt: no retry, no backoff.
    pub async fn complete_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, LuxeError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| LuxeError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if status.as_u16() == 429 {
            return Err(LuxeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body)
            {
                format!("Groq API error ({}): {}", api_err.error.type_, api_err.error.message)
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(LuxeError::Provider {
                message,
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| LuxeError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| LuxeError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
