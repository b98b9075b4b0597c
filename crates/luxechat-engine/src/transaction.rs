// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation purchase/rental state machine.
//!
//! Each conversation walks through: Idle -> AskName -> AskType -> Payment -> Idle.
//! While in AskName or AskType the next user submission is consumed by the
//! machine and never reaches the resolver.

use luxechat_core::{BuyType, PropertyId};

/// States in the transaction FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStep {
    /// No transaction underway; submissions go to the resolver.
    Idle,
    /// A property was chosen; the next submission is the customer's name.
    AskName,
    /// The next submission decides buy vs. rent.
    AskType,
    /// Waiting for the simulated payment confirmation.
    Payment,
}

impl std::fmt::Display for TransactionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStep::Idle => write!(f, "idle"),
            TransactionStep::AskName => write!(f, "ask_name"),
            TransactionStep::AskType => write!(f, "ask_type"),
            TransactionStep::Payment => write!(f, "payment"),
        }
    }
}

/// State of one conversation's transaction flow.
///
/// Lives for the session only; it is not persisted across restarts.
/// Invariants: `property_id` is set on entering AskName, `user_name` on
/// entering AskType, `buy_type` on entering Payment.
#[derive(Debug, Clone)]
pub struct Transaction {
    step: TransactionStep,
    user_name: Option<String>,
    property_id: Option<PropertyId>,
    buy_type: Option<BuyType>,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            step: TransactionStep::Idle,
            user_name: None,
            property_id: None,
            buy_type: None,
        }
    }

    pub fn step(&self) -> TransactionStep {
        self.step
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn property_id(&self) -> Option<PropertyId> {
        self.property_id
    }

    pub fn buy_type(&self) -> Option<BuyType> {
        self.buy_type
    }

    /// Transition: Idle -> AskName, capturing the chosen property.
    pub fn begin(&mut self, property_id: PropertyId) {
        self.user_name = None;
        self.buy_type = None;
        self.property_id = Some(property_id);
        self.step = TransactionStep::AskName;
    }

    /// Transition: AskName -> AskType. The submission is taken as the
    /// customer's name verbatim; there is no validation by design of the
    /// flow.
    pub fn record_name(&mut self, name: &str) {
        self.user_name = Some(name.trim().to_string());
        self.step = TransactionStep::AskType;
    }

    /// Transition: AskType -> Payment, classifying the reply.
    pub fn record_buy_type(&mut self, reply: &str) -> BuyType {
        let buy_type = BuyType::classify(reply);
        self.buy_type = Some(buy_type);
        self.step = TransactionStep::Payment;
        buy_type
    }

    /// Returns to Idle and clears all captured fields.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
