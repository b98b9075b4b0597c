// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the luxechat workspace: an in-memory key-value store
//! and a scripted completion provider. Intended for dev-dependency use
//! only.

pub mod memory_store;
pub mod mock_provider;

pub use memory_store::MemoryKv;
pub use mock_provider::{MockCompletion, MockOutcome};
