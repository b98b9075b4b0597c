// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead records captured by the chat flow.
//!
//! The whole mapping lives under one storage key. `(name, property_id)` is
//! the uniqueness key: an upsert replaces any prior record for the pair,
//! so a payment upgrade never duplicates the pending entry.

use std::sync::Arc;

use tracing::{info, warn};

use luxechat_core::{BuyType, KeyValueStore, LeadRecord, LuxeError, PaymentStatus, PropertyId};

/// Storage key holding the serialized lead list.
pub const LEADS_KEY: &str = "leads.records";

/// Store of prospective buyer/renter records, shared with the dashboard.
pub struct LeadStore {
    store: Arc<dyn KeyValueStore>,
}

impl LeadStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Builds a record stamped with the current time.
    pub fn make_record(
        name: &str,
        buy_type: BuyType,
        payment_status: PaymentStatus,
        property_id: PropertyId,
    ) -> LeadRecord {
        let now = chrono::Local::now();
        LeadRecord {
            id: now.timestamp_millis(),
            name: name.to_string(),
            buy_type,
            payment_status,
            property_id,
            date: now.format("%d/%m/%Y %H.%M.%S").to_string(),
        }
    }

    /// All records in insertion order. A corrupt payload is discarded and
    /// reads as empty.
    pub async fn list(&self) -> Result<Vec<LeadRecord>, LuxeError> {
        match self.store.get(LEADS_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(records) => Ok(records),
                Err(e) => {
                    warn!(error = %e, "discarding unparsable lead records");
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Inserts or replaces the record for `(name, property_id)` and writes
    /// the full mapping back, firing the storage change broadcast.
    pub async fn upsert(&self, record: LeadRecord) -> Result<(), LuxeError> {
        let mut records = self.list().await?;
        records.retain(|existing| {
            existing.name != record.name || existing.property_id != record.property_id
        });
        info!(
            name = %record.name,
            property_id = %record.property_id,
            status = %record.payment_status,
            "lead upserted"
        );
        records.push(record);

        let payload = serde_json::to_string(&records).map_err(|e| LuxeError::Storage {
            source: Box::new(e),
        })?;
        self.store.set(LEADS_KEY, &payload).await
    }

    /// Deletes the entire mapping.
    pub async fn clear(&self) -> Result<(), LuxeError> {
        self.store.remove(LEADS_KEY).await
    }
}
