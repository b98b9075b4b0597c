// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestrator for one chat conversation.
//!
//! `ChatSession` owns the conversation history, the transaction state
//! machine, the resolver, and the lead store, and routes every user
//! submission through the right branch. Methods take `&mut self`, so a
//! second resolver call for the same conversation cannot start while one
//! is in flight.

use std::sync::Arc;

use tracing::info;

use luxechat_catalog::Catalog;
use luxechat_core::{
    ChatTurn, CompletionProvider, Intent, KeyValueStore, LuxeError, PaymentStatus,
    PropertyId,
};
use luxechat_config::LuxeConfig;

use crate::conversation::ConversationStore;
use crate::leads::LeadStore;
use crate::payment::PaymentSimulator;
use crate::resolver::IntentResolver;
use crate::transaction::{Transaction, TransactionStep};

const ASK_NAME_REPLY: &str =
    "Pilihan yang sangat bagus! Untuk memproses lebih lanjut, boleh saya tahu nama Anda?";
const ASK_TYPE_REPLY_TEMPLATE: &str =
    "Senang berkenalan dengan Anda, {name}. Apakah Anda ingin Membeli atau Menyewa properti tersebut?";
const PAYMENT_PROMPT_REPLY: &str =
    "Baik, silakan selesaikan pembayaran simulasi untuk melanjutkan pesanan Anda.";
const PAYMENT_SUCCESS_REPLY: &str = "✅ Pembayaran berhasil! Tim kami akan segera menghubungi \
     Anda melalui WhatsApp untuk proses verifikasi dokumen. Terima kasih!";

/// One buyer-facing chat conversation and its transaction flow.
pub struct ChatSession {
    conversation: ConversationStore,
    transaction: Transaction,
    resolver: IntentResolver,
    leads: LeadStore,
    payment: PaymentSimulator,
}

impl ChatSession {
    /// Wires a session over the given store, provider, and catalog.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        provider: Arc<dyn CompletionProvider>,
        catalog: Arc<Catalog>,
        config: &LuxeConfig,
    ) -> Result<Self, LuxeError> {
        let conversation = ConversationStore::open(
            store.clone(),
            config.agent.greeting.clone(),
            config.history.max_turns,
        )
        .await?;
        let resolver = IntentResolver::new(
            provider,
            catalog,
            config.history.context_window,
            config.groq.max_tokens,
            config.groq.temperature,
        );

        Ok(Self {
            conversation,
            transaction: Transaction::new(),
            resolver,
            leads: LeadStore::new(store),
            payment: PaymentSimulator::new(config.payment.processing_delay_ms),
        })
    }

    /// The full conversation, oldest turn first.
    pub fn turns(&self) -> &[ChatTurn] {
        self.conversation.turns()
    }

    /// Current step of the transaction flow.
    pub fn transaction_step(&self) -> TransactionStep {
        self.transaction.step()
    }

    /// The property under transaction, if any.
    pub fn pending_property(&self) -> Option<PropertyId> {
        self.transaction.property_id()
    }

    /// The captured customer name, if any.
    pub fn customer_name(&self) -> Option<&str> {
        self.transaction.user_name()
    }

    /// Handles one user submission end to end and returns the assistant
    /// turns it produced.
    ///
    /// Empty input is rejected before any state change. While the
    /// transaction is collecting the name or buy type, the submission is
    /// consumed by the state machine and never reaches the resolver.
    pub async fn handle_message(
        &mut self,
        input: &str,
    ) -> Result<Vec<ChatTurn>, LuxeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LuxeError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        match self.transaction.step() {
            TransactionStep::AskName => {
                self.conversation.append(ChatTurn::user(trimmed)).await?;
                self.transaction.record_name(trimmed);
                let reply = ChatTurn::assistant(
                    ASK_TYPE_REPLY_TEMPLATE.replace("{name}", trimmed),
                );
                self.conversation.append(reply.clone()).await?;
                Ok(vec![reply])
            }
            TransactionStep::AskType => {
                self.conversation.append(ChatTurn::user(trimmed)).await?;
                let buy_type = self.transaction.record_buy_type(trimmed);
                self.write_lead(PaymentStatus::Pending).await?;
                info!(%buy_type, "transaction entered payment step");
                let reply = ChatTurn::assistant(PAYMENT_PROMPT_REPLY);
                self.conversation.append(reply.clone()).await?;
                Ok(vec![reply])
            }
            TransactionStep::Idle | TransactionStep::Payment => {
                // The resolver window must not include the fresh submission.
                let history = self.conversation.turns().to_vec();
                self.conversation.append(ChatTurn::user(trimmed)).await?;

                let resolved = self.resolver.resolve(trimmed, &history).await?;
                if resolved.intent == Intent::Buy
                    && let Some(first) = resolved.property_ids.first().copied()
                {
                    // Only the first returned id is tracked; the rest are
                    // discarded.
                    self.transaction.begin(first);
                    info!(property_id = %first, "buy intent detected, asking for name");
                    let reply = ChatTurn::assistant(ASK_NAME_REPLY);
                    self.conversation.append(reply.clone()).await?;
                    Ok(vec![reply])
                } else {
                    let reply = ChatTurn::assistant_with_properties(
                        resolved.text,
                        resolved.property_ids,
                    );
                    self.conversation.append(reply.clone()).await?;
                    Ok(vec![reply])
                }
            }
        }
    }

    /// Confirms the simulated payment with the given card number.
    ///
    /// Rejects instantly (before the processing delay, with no state
    /// change) unless a payment is awaiting confirmation and the card
    /// number carries exactly 16 digits.
    pub async fn confirm_payment(
        &mut self,
        card_number: &str,
    ) -> Result<Vec<ChatTurn>, LuxeError> {
        if self.transaction.step() != TransactionStep::Payment {
            return Err(LuxeError::InvalidInput(
                "no payment is awaiting confirmation".to_string(),
            ));
        }
        PaymentSimulator::validate_card(card_number)?;

        self.payment.process().await;
        self.write_lead(PaymentStatus::Paid).await?;
        self.transaction.reset();
        info!("simulated payment confirmed, lead marked paid");

        let reply = ChatTurn::assistant(PAYMENT_SUCCESS_REPLY);
        self.conversation.append(reply.clone()).await?;
        Ok(vec![reply])
    }

    /// Clears the conversation and aborts any in-flight transaction.
    pub async fn reset(&mut self) -> Result<(), LuxeError> {
        self.conversation.reset().await?;
        self.transaction.reset();
        Ok(())
    }

    async fn write_lead(&self, status: PaymentStatus) -> Result<(), LuxeError> {
        let (Some(name), Some(property_id), Some(buy_type)) = (
            self.transaction.user_name(),
            self.transaction.property_id(),
            self.transaction.buy_type(),
        ) else {
            return Err(LuxeError::Internal(
                "transaction is missing lead fields".to_string(),
            ));
        };
        let record = LeadStore::make_record(name, buy_type, status, property_id);
        self.leads.upsert(record).await
    }
}
