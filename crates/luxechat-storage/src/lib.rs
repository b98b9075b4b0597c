// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the luxechat lead engine.
//!
//! Implements the [`luxechat_core::KeyValueStore`] trait over a single
//! `kv_store` table: conversation history, lead records, and the admin
//! session each live under one key as opaque JSON.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod store;

pub use store::SqliteStore;
