// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent resolution over the completion API.
//!
//! Canned greetings are answered locally without touching the network.
//! Everything else goes to the provider with a fixed system instruction,
//! the reduced catalog projection, and a bounded history window. Provider
//! failures never escape: they degrade to canned apology replies.

use std::sync::Arc;

use tracing::{debug, warn};

use luxechat_catalog::Catalog;
use luxechat_core::{
    ChatTurn, CompletionMessage, CompletionProvider, CompletionRequest, Intent, LuxeError,
    PropertyId, ResolvedReply, Role,
};

/// Reply text used when the provider answer has no `text` field.
pub const FALLBACK_TEXT: &str = "Ada lagi yang bisa saya bantu?";

/// Canned reply for any provider failure other than rate limiting.
pub const APOLOGY_GENERIC: &str = "Maaf, terjadi sedikit gangguan teknis.";

/// Canned reply for HTTP 429 from the provider.
pub const APOLOGY_BUSY: &str =
    "Maaf, server AI kami sedang sangat sibuk karena banyak permintaan. Mohon tunggu sebentar ya.";

/// Instant answers for common greetings, bypassing the API entirely.
fn quick_response(normalized: &str) -> Option<&'static str> {
    match normalized {
        "halo" => Some("Halo! Selamat datang di LuxeEstate. Ada properti yang bisa saya bantu carikan?"),
        "hi" => Some("Hi! Ada yang bisa saya bantu hari ini?"),
        "p" => Some("Halo! Ada yang bisa saya bantu?"),
        "terima kasih" => Some("Sama-sama! Senang bisa membantu Anda."),
        _ => None,
    }
}

/// Classifies user messages and produces assistant replies.
///
/// The resolver has no side effects: it mutates neither the conversation
/// nor the transaction. Callers own all state changes.
pub struct IntentResolver {
    provider: Arc<dyn CompletionProvider>,
    catalog: Arc<Catalog>,
    context_window: usize,
    max_tokens: u32,
    temperature: f32,
}

impl IntentResolver {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        catalog: Arc<Catalog>,
        context_window: usize,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            catalog,
            context_window,
            max_tokens,
            temperature,
        }
    }

    /// Resolves one user message against the recent history.
    ///
    /// `user_text` must be non-empty after trimming. The returned reply is
    /// always usable; provider failures are absorbed into apologies.
    pub async fn resolve(
        &self,
        user_text: &str,
        history: &[ChatTurn],
    ) -> Result<ResolvedReply, LuxeError> {
        let trimmed = user_text.trim();
        if trimmed.is_empty() {
            return Err(LuxeError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        let normalized = trimmed.to_lowercase();
        if let Some(text) = quick_response(&normalized) {
            debug!("quick reply served without a provider call");
            return Ok(ResolvedReply {
                text: text.to_string(),
                property_ids: Vec::new(),
                intent: Intent::Chat,
            });
        }

        let request = self.build_request(trimmed, history)?;
        match self.provider.complete(request).await {
            Ok(response) => {
                let raw = response.content.unwrap_or_else(|| "{}".to_string());
                match parse_reply(&raw) {
                    Some(reply) => Ok(reply),
                    None => {
                        warn!("provider returned a malformed reply body");
                        Ok(apology(APOLOGY_GENERIC))
                    }
                }
            }
            Err(LuxeError::RateLimited) => {
                warn!("provider rate limited; serving busy apology");
                Ok(apology(APOLOGY_BUSY))
            }
            Err(e) => {
                warn!(error = %e, "provider call failed; serving generic apology");
                Ok(apology(APOLOGY_GENERIC))
            }
        }
    }

    fn build_request(
        &self,
        user_text: &str,
        history: &[ChatTurn],
    ) -> Result<CompletionRequest, LuxeError> {
        let context =
            serde_json::to_string(&self.catalog.context()).map_err(|e| {
                LuxeError::Internal(format!("catalog projection failed to encode: {e}"))
            })?;

        let system = format!(
            "Role: LuxeEstate Assistant. \
             Format JSON: {{\"text\": \"msg\", \"ids\": [number], \"intent\": \"buy\"|\"chat\"}}. \
             Data: {context}. \
             Aturan: Ramah, Bahasa Indonesia, berikan ID jika menyebut properti, \
             intent \"buy\" hanya saat pelanggan siap membeli atau menyewa."
        );

        // Only the trailing window travels; older turns are dropped outright.
        let start = history.len().saturating_sub(self.context_window);
        let mut messages: Vec<CompletionMessage> = history[start..]
            .iter()
            .map(|turn| CompletionMessage {
                role: match turn.role {
                    Role::User => Role::User,
                    _ => Role::Assistant,
                },
                content: turn.content.clone(),
            })
            .collect();
        messages.push(CompletionMessage {
            role: Role::User,
            content: user_text.to_string(),
        });

        Ok(CompletionRequest {
            system,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            json_mode: true,
        })
    }
}

fn apology(text: &str) -> ResolvedReply {
    ResolvedReply {
        text: text.to_string(),
        property_ids: Vec::new(),
        intent: Intent::Chat,
    }
}

/// Parses the provider's `{text, ids, intent}` body with explicit
/// defaulting. Returns `None` only when the body is not a JSON object.
fn parse_reply(raw: &str) -> Option<ResolvedReply> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;

    let text = object
        .get("text")
        .and_then(serde_json::Value::as_str)
        .unwrap_or(FALLBACK_TEXT)
        .to_string();

    let property_ids = object
        .get("ids")
        .and_then(serde_json::Value::as_array)
        .map(|ids| ids.iter().filter_map(value_to_property_id).collect())
        .unwrap_or_default();

    let intent = match object.get("intent").and_then(serde_json::Value::as_str) {
        Some("buy") => Intent::Buy,
        _ => Intent::Chat,
    };

    Some(ResolvedReply {
        text,
        property_ids,
        intent,
    })
}

/// Models occasionally return ids as strings; accept both shapes.
fn value_to_property_id(value: &serde_json::Value) -> Option<PropertyId> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .map(PropertyId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxechat_test_utils::{MockCompletion, MockOutcome};

    fn resolver_with(mock: Arc<MockCompletion>) -> IntentResolver {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        IntentResolver::new(mock, catalog, 3, 500, 0.5)
    }

    #[tokio::test]
    async fn quick_replies_bypass_the_provider() {
        let mock = Arc::new(MockCompletion::new());
        let resolver = resolver_with(mock.clone());

        for input in ["halo", "  HALO  ", "Hi", "p", "Terima Kasih"] {
            let reply = resolver.resolve(input, &[]).await.unwrap();
            assert_eq!(reply.intent, Intent::Chat, "input: {input}");
            assert!(reply.property_ids.is_empty(), "input: {input}");
            assert!(!reply.text.is_empty(), "input: {input}");
        }
        assert_eq!(mock.calls(), 0, "no provider call for canned greetings");
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_a_call() {
        let mock = Arc::new(MockCompletion::new());
        let resolver = resolver_with(mock.clone());

        let err = resolver.resolve("   ", &[]).await.unwrap_err();
        assert!(matches!(err, LuxeError::InvalidInput(_)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn buy_reply_parses_ids_and_intent() {
        let mock = Arc::new(MockCompletion::new());
        mock.push_reply(r#"{"text":"Villa bagus!","ids":[5,2],"intent":"buy"}"#)
            .await;
        let resolver = resolver_with(mock);

        let reply = resolver.resolve("mau beli villa", &[]).await.unwrap();
        assert_eq!(reply.intent, Intent::Buy);
        assert_eq!(reply.property_ids, vec![PropertyId(5), PropertyId(2)]);
        assert_eq!(reply.text, "Villa bagus!");
    }

    #[tokio::test]
    async fn missing_fields_are_defaulted() {
        let mock = Arc::new(MockCompletion::new());
        mock.push_reply("{}").await;
        let resolver = resolver_with(mock);

        let reply = resolver.resolve("ada apartemen?", &[]).await.unwrap();
        assert_eq!(reply.text, FALLBACK_TEXT);
        assert!(reply.property_ids.is_empty());
        assert_eq!(reply.intent, Intent::Chat);
    }

    #[tokio::test]
    async fn missing_content_defaults_like_empty_object() {
        let mock = Arc::new(MockCompletion::with_outcomes(vec![
            MockOutcome::MissingContent,
        ]));
        let resolver = resolver_with(mock);

        let reply = resolver.resolve("ada apartemen?", &[]).await.unwrap();
        assert_eq!(reply.text, FALLBACK_TEXT);
        assert_eq!(reply.intent, Intent::Chat);
    }

    #[tokio::test]
    async fn string_ids_are_accepted() {
        let mock = Arc::new(MockCompletion::new());
        mock.push_reply(r#"{"text":"ok","ids":["3"," 4 ",true],"intent":"chat"}"#)
            .await;
        let resolver = resolver_with(mock);

        let reply = resolver.resolve("lihat", &[]).await.unwrap();
        assert_eq!(reply.property_ids, vec![PropertyId(3), PropertyId(4)]);
    }

    #[tokio::test]
    async fn non_object_body_becomes_generic_apology() {
        let mock = Arc::new(MockCompletion::new());
        mock.push_reply("42").await;
        let resolver = resolver_with(mock);

        let reply = resolver.resolve("halo kak", &[]).await.unwrap();
        assert_eq!(reply.text, APOLOGY_GENERIC);
        assert_eq!(reply.intent, Intent::Chat);
        assert!(reply.property_ids.is_empty());
    }

    #[tokio::test]
    async fn rate_limit_gets_the_busy_apology() {
        let mock = Arc::new(MockCompletion::with_outcomes(vec![MockOutcome::RateLimited]));
        let resolver = resolver_with(mock);

        let reply = resolver.resolve("ada villa?", &[]).await.unwrap();
        assert_eq!(reply.text, APOLOGY_BUSY);
        assert_eq!(reply.intent, Intent::Chat);
    }

    #[tokio::test]
    async fn other_failures_get_the_generic_apology() {
        let mock = Arc::new(MockCompletion::with_outcomes(vec![MockOutcome::Failure(
            "boom".into(),
        )]));
        let resolver = resolver_with(mock);

        let reply = resolver.resolve("ada villa?", &[]).await.unwrap();
        assert_eq!(reply.text, APOLOGY_GENERIC);
    }

    #[tokio::test]
    async fn request_carries_window_catalog_and_json_mode() {
        let mock = Arc::new(MockCompletion::new());
        let resolver = resolver_with(mock.clone());

        let history: Vec<ChatTurn> = (0..5)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::user(format!("tanya {i}"))
                } else {
                    ChatTurn::assistant(format!("jawab {i}"))
                }
            })
            .collect();

        resolver.resolve("ada villa?", &history).await.unwrap();

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        // Last 3 history turns plus the fresh user message.
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[0].content, "tanya 2");
        assert_eq!(request.messages[3].content, "ada villa?");
        assert_eq!(request.messages[3].role, Role::User);

        assert!(request.json_mode);
        assert_eq!(request.max_tokens, 500);
        // The reduced projection travels in the system instruction.
        assert!(request.system.contains("\"t\":"), "got: {}", request.system);
        assert!(request.system.contains("Bahasa Indonesia"));
    }

    #[test]
    fn parse_reply_rejects_non_json() {
        assert!(parse_reply("not json").is_none());
        assert!(parse_reply("[1,2]").is_none());
        assert!(parse_reply("{}").is_some());
    }
}
