// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The luxechat engine: conversation history, the purchase/rental
//! transaction state machine, the intent resolver, the lead record store,
//! and the simulated payment step, tied together by [`ChatSession`].
//!
//! Everything here is UI-agnostic. The CLI (and any future front end)
//! drives a `ChatSession` and renders the returned turns however it likes.

pub mod conversation;
pub mod leads;
pub mod payment;
pub mod resolver;
pub mod session;
pub mod transaction;

pub use conversation::{ConversationStore, HISTORY_KEY};
pub use leads::{LEADS_KEY, LeadStore};
pub use payment::PaymentSimulator;
pub use resolver::{APOLOGY_BUSY, APOLOGY_GENERIC, FALLBACK_TEXT, IntentResolver};
pub use session::ChatSession;
pub use transaction::{Transaction, TransactionStep};
