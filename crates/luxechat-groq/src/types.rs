// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq OpenAI-compatible chat completions request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the Groq chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "llama-3.1-8b-instant").
    pub model: String,

    /// System instruction plus the trimmed conversation window.
    pub messages: Vec<WireMessage>,

    pub temperature: f32,

    pub max_tokens: u32,

    pub top_p: f32,

    /// Set to request a JSON-constrained response body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// A single message in the OpenAI-compatible wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    pub content: String,
}

/// Response format constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// Constrains the response body to a single JSON object.
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

// --- Response types ---

/// A full response from the chat completions endpoint.
///
/// Only the fields the engine consumes are modeled; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,

    #[serde(default)]
    pub usage: Option<WireUsage>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

/// The assistant message inside a choice. `content` may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Error envelope returned on non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_response_format_only_when_set() {
        let mut request = ChatRequest {
            model: "llama-3.1-8b-instant".into(),
            messages: vec![WireMessage {
                role: "user".into(),
                content: "halo".into(),
            }],
            temperature: 0.5,
            max_tokens: 500,
            top_p: 1.0,
            response_format: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("response_format"), "got: {json}");

        request.response_format = Some(ResponseFormat::json_object());
        let json = serde_json::to_string(&request).unwrap();
        assert!(
            json.contains(r#""response_format":{"type":"json_object"}"#),
            "got: {json}"
        );
    }

    #[test]
    fn response_with_missing_content_deserializes() {
        let body = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, None);
        assert!(response.usage.is_none());
    }

    #[test]
    fn response_with_no_choices_deserializes() {
        let body = r#"{"id":"cmpl-1"}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn error_envelope_deserializes() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"tokens"}}"#;
        let err: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.message, "Rate limit reached");
        assert_eq!(err.error.type_, "tokens");
    }
}
