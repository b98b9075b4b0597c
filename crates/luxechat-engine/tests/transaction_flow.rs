// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end exercise of the chat flow over in-memory adapters:
//! greeting fast path, buy intent, name and type capture, pending lead,
//! simulated payment, and persistence across a session restart.

use std::sync::Arc;

use luxechat_catalog::Catalog;
use luxechat_config::LuxeConfig;
use luxechat_core::{BuyType, Intent, PaymentStatus, PropertyId, Role};
use luxechat_engine::{ChatSession, LeadStore, TransactionStep};
use luxechat_test_utils::{MemoryKv, MockCompletion};

fn config() -> LuxeConfig {
    let mut config = LuxeConfig::default();
    config.payment.processing_delay_ms = 0;
    config
}

async fn open_session(kv: Arc<MemoryKv>, mock: Arc<MockCompletion>) -> ChatSession {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    ChatSession::open(kv, mock, catalog, &config()).await.unwrap()
}

#[tokio::test]
async fn greeting_then_full_purchase_flow() {
    let kv = Arc::new(MemoryKv::new());
    let mock = Arc::new(MockCompletion::new());
    mock.push_reply(r#"{"text":"Villa Canggu cocok untuk Anda!","ids":[5],"intent":"buy"}"#)
        .await;

    let mut session = open_session(kv.clone(), mock.clone()).await;
    let leads = LeadStore::new(kv.clone());

    // Conversation opens with the canned greeting.
    assert_eq!(session.turns().len(), 1);
    assert_eq!(session.turns()[0].role, Role::Assistant);

    // Canned greeting input: answered locally, no provider call.
    let replies = session.handle_message("halo").await.unwrap();
    assert_eq!(mock.calls(), 0);
    assert!(replies[0].content.contains("LuxeEstate"));

    // Buy intent: resolver consulted once, transaction starts.
    session.handle_message("saya mau villa di Bali").await.unwrap();
    assert_eq!(mock.calls(), 1);
    assert_eq!(session.transaction_step(), TransactionStep::AskName);
    assert_eq!(session.pending_property(), Some(PropertyId(5)));

    // Name capture.
    let replies = session.handle_message("Ani").await.unwrap();
    assert!(replies[0].content.contains("Ani"));
    assert_eq!(session.transaction_step(), TransactionStep::AskType);

    // Type capture writes the pending lead.
    session.handle_message("saya mau sewa").await.unwrap();
    assert_eq!(session.transaction_step(), TransactionStep::Payment);
    let pending = leads.list().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].buy_type, BuyType::Sewa);
    assert_eq!(pending[0].payment_status, PaymentStatus::Pending);

    // Payment upgrades the same record; no duplicate appears.
    session.confirm_payment("4522 8890 1234 1098").await.unwrap();
    let paid = leads.list().await.unwrap();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].payment_status, PaymentStatus::Paid);
    assert_eq!(paid[0].name, "Ani");
    assert_eq!(paid[0].property_id, PropertyId(5));
    assert_eq!(session.transaction_step(), TransactionStep::Idle);

    // State machine consumed the two captured submissions without
    // consulting the resolver again.
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn conversation_survives_session_restart_but_transaction_does_not() {
    let kv = Arc::new(MemoryKv::new());
    let mock = Arc::new(MockCompletion::new());
    mock.push_reply(r#"{"text":"Cocok!","ids":[2],"intent":"buy"}"#)
        .await;

    let mut session = open_session(kv.clone(), mock.clone()).await;
    session.handle_message("mau apartemen Sudirman").await.unwrap();
    assert_eq!(session.transaction_step(), TransactionStep::AskName);
    let turn_count = session.turns().len();
    drop(session);

    // A fresh session over the same store restores the history but starts
    // a clean transaction.
    let restarted = open_session(kv, mock).await;
    assert_eq!(restarted.turns().len(), turn_count);
    assert_eq!(restarted.transaction_step(), TransactionStep::Idle);
}

#[tokio::test]
async fn resolver_reply_with_buy_intent_but_no_ids_is_plain_chat() {
    let kv = Arc::new(MemoryKv::new());
    let mock = Arc::new(MockCompletion::new());
    mock.push_reply(r#"{"text":"Properti yang mana ya?","intent":"buy"}"#)
        .await;

    let mut session = open_session(kv, mock).await;
    let replies = session.handle_message("beli dong").await.unwrap();

    assert_eq!(session.transaction_step(), TransactionStep::Idle);
    assert_eq!(replies[0].content, "Properti yang mana ya?");
    assert!(replies[0].property_ids.is_empty());
}

#[tokio::test]
async fn quick_reply_contract_holds_for_every_mapped_greeting() {
    let kv = Arc::new(MemoryKv::new());
    let mock = Arc::new(MockCompletion::new());
    let mut session = open_session(kv, mock.clone()).await;

    for input in ["halo", "hi", "p", "terima kasih"] {
        let replies = session.handle_message(input).await.unwrap();
        assert_eq!(replies.len(), 1, "input: {input}");
        assert!(replies[0].property_ids.is_empty(), "input: {input}");
    }
    assert_eq!(mock.calls(), 0);

    // Sanity: intents behind the fast path are all chat.
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let resolver = luxechat_engine::IntentResolver::new(mock, catalog, 3, 500, 0.5);
    let reply = resolver.resolve("Terima Kasih", &[]).await.unwrap();
    assert_eq!(reply.intent, Intent::Chat);
}
