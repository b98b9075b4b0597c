// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `luxechat leads` command implementation.
//!
//! The admin dashboard over the lead records: a table (or `--json`) of
//! every captured lead joined with catalog titles. `--watch` re-renders
//! whenever the storage change broadcast fires; the event has no payload,
//! so the command simply re-reads the records. Requires a logged-in admin
//! session.

use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;

use luxechat_auth::AdminAuth;
use luxechat_catalog::Catalog;
use luxechat_config::LuxeConfig;
use luxechat_core::{KeyValueStore, LeadRecord, LuxeError, PaymentStatus};
use luxechat_engine::LeadStore;
use luxechat_storage::SqliteStore;

/// Runs the `luxechat leads` command.
pub async fn run_leads(
    config: LuxeConfig,
    json: bool,
    clear: bool,
    watch: bool,
) -> Result<(), LuxeError> {
    let storage = SqliteStore::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(storage);

    let auth = AdminAuth::new(storage.clone(), config.admin.clone());
    if auth.current().await?.is_none() {
        return Err(LuxeError::Auth(
            "not logged in: run `luxechat login` first".to_string(),
        ));
    }

    let leads = LeadStore::new(storage.clone());
    let catalog = Catalog::builtin()?;

    if clear {
        leads.clear().await?;
        println!("all lead records cleared");
        storage.close().await?;
        return Ok(());
    }

    render(&leads.list().await?, &catalog, json);

    if watch {
        let mut changes = storage.subscribe();
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                event = changes.recv() => {
                    if event.is_err() {
                        break;
                    }
                    // The broadcast does not say which key changed; re-read.
                    render(&leads.list().await?, &catalog, json);
                }
            }
        }
    }

    storage.close().await?;
    Ok(())
}

fn render(records: &[LeadRecord], catalog: &Catalog, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
        );
        return;
    }

    let use_color = std::io::stdout().is_terminal();

    println!();
    println!("  leads ({})", records.len());
    println!("  {}", "-".repeat(78));
    if records.is_empty() {
        println!("  belum ada lead dari chat");
        println!();
        return;
    }

    for record in records {
        let title = catalog
            .property(record.property_id)
            .map(|p| p.title.as_str())
            .unwrap_or("(properti tidak dikenal)");
        let status = format_status(record.payment_status, use_color);
        println!(
            "  {:<20} {:<10} {:<34} {:<6} {}",
            record.date, record.name, title, record.buy_type, status
        );
    }
    println!();
}

fn format_status(status: PaymentStatus, use_color: bool) -> String {
    match (status, use_color) {
        (PaymentStatus::Paid, true) => "paid".green().to_string(),
        (PaymentStatus::Pending, true) => "pending".yellow().to_string(),
        (PaymentStatus::Paid, false) => "paid".to_string(),
        (PaymentStatus::Pending, false) => "pending".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_status_has_no_escape_codes() {
        assert_eq!(format_status(PaymentStatus::Paid, false), "paid");
        assert_eq!(format_status(PaymentStatus::Pending, false), "pending");
    }
}
