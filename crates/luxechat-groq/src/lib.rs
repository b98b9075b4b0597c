// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq provider adapter for luxechat.
//!
//! Wraps [`GroqClient`] behind the [`CompletionProvider`] trait, mapping
//! the engine's request shape onto the OpenAI-compatible wire format.

pub mod client;
pub mod types;

use async_trait::async_trait;

use luxechat_config::model::GroqConfig;
use luxechat_core::{
    Adapter, CompletionProvider, CompletionRequest, CompletionResponse, HealthStatus,
    LuxeError, Role, TokenUsage,
};

pub use client::GroqClient;
use types::{ChatRequest, ResponseFormat, WireMessage};

/// Completion provider backed by the Groq chat completions API.
pub struct GroqProvider {
    client: GroqClient,
    model: String,
}

impl GroqProvider {
    /// Creates a provider from the `[groq]` config section.
    pub fn new(config: &GroqConfig) -> Result<Self, LuxeError> {
        Ok(Self {
            client: GroqClient::new(config)?,
            model: config.model.clone(),
        })
    }

    fn to_wire(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: request.system.clone(),
        });
        for message in &request.messages {
            // The wire format only knows user/assistant here; anything the
            // engine marked system was folded into the instruction above.
            let role = match message.role {
                Role::User => "user",
                _ => "assistant",
            };
            messages.push(WireMessage {
                role: role.to_string(),
                content: message.content.clone(),
            });
        }

        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: 1.0,
            response_format: request.json_mode.then(ResponseFormat::json_object),
        }
    }
}

#[async_trait]
impl Adapter for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LuxeError> {
        // No dedicated health endpoint; construction validated the key.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LuxeError> {
        let wire = self.to_wire(&request);
        let response = self.client.complete_chat(&wire).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        let usage = response.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok(CompletionResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxechat_core::CompletionMessage;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> GroqProvider {
        let config = GroqConfig {
            api_key: Some("gsk_test".into()),
            base_url: format!("{}/openai/v1/chat/completions", server.uri()),
            ..GroqConfig::default()
        };
        GroqProvider::new(&config).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "Role: LuxeEstate Assistant.".into(),
            messages: vec![
                CompletionMessage {
                    role: Role::Assistant,
                    content: "Halo!".into(),
                },
                CompletionMessage {
                    role: Role::User,
                    content: "Ada villa di Bali?".into(),
                },
            ],
            max_tokens: 500,
            temperature: 0.5,
            json_mode: true,
        }
    }

    #[tokio::test]
    async fn system_instruction_leads_the_message_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "Role: LuxeEstate Assistant."},
                    {"role": "assistant", "content": "Halo!"},
                    {"role": "user", "content": "Ada villa di Bali?"}
                ],
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "{}"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider(&server);
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content.as_deref(), Some("{}"));
        assert_eq!(
            response.usage,
            Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 2
            })
        );
    }

    #[tokio::test]
    async fn empty_choices_yields_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = provider(&server);
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, None);
        assert_eq!(response.usage, None);
    }

    #[tokio::test]
    async fn provider_reports_identity() {
        let server = MockServer::start().await;
        let provider = provider(&server);
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.version(), semver::Version::new(0, 1, 0));
        assert_eq!(
            provider.health_check().await.unwrap(),
            HealthStatus::Healthy
        );
    }
}
