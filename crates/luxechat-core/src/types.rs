// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the luxechat workspace: chat turns, lead
//! records, transaction vocabulary, and the provider request/response pair.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a property in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PropertyId(pub u32);

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Attribution of a chat turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation. Immutable once appended to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    /// Properties the assistant referenced in this turn, in reply order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_ids: Vec<PropertyId>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            property_ids: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            property_ids: Vec::new(),
        }
    }

    pub fn assistant_with_properties(
        content: impl Into<String>,
        property_ids: Vec<PropertyId>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            property_ids,
        }
    }
}

/// Resolver classification of a user message: transact or converse.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Intent {
    Buy,
    #[default]
    Chat,
}

/// The resolver's answer for one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReply {
    pub text: String,
    pub property_ids: Vec<PropertyId>,
    pub intent: Intent,
}

/// Whether the customer wants to buy or rent.
///
/// Serialized with the Indonesian labels the rest of the product uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyType {
    Beli,
    Sewa,
}

impl BuyType {
    /// Classifies a free-text reply: a case-insensitive "sewa" substring
    /// means rent, anything else means buy.
    pub fn classify(reply: &str) -> Self {
        if reply.to_lowercase().contains("sewa") {
            BuyType::Sewa
        } else {
            BuyType::Beli
        }
    }
}

impl std::fmt::Display for BuyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            BuyType::Beli => "Beli",
            BuyType::Sewa => "Sewa",
        })
    }
}

/// Payment progress of a lead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// A prospective buyer/renter captured by the chat flow.
///
/// Uniqueness is carried by `(name, property_id)`; `id` is a millisecond
/// timestamp kept for display and is not a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: i64,
    pub name: String,
    pub buy_type: BuyType,
    pub payment_status: PaymentStatus,
    pub property_id: PropertyId,
    pub date: String,
}

/// Change notification emitted by a [`crate::KeyValueStore`].
///
/// Carries no payload on purpose: listeners re-read whichever key they
/// care about.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreChange;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

// --- Provider request/response types ---

/// A single message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
}

/// A request to a completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction fixing the output schema, language, and tone.
    pub system: String,
    /// Trimmed history window plus the latest user message, oldest first.
    pub messages: Vec<CompletionMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask the API for a JSON-constrained response body.
    pub json_mode: bool,
}

/// A response from a completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Raw message content. `None` when the API omitted it; callers apply
    /// their own defaulting.
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Token accounting reported by the completion API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
