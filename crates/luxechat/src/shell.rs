// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `luxechat shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline
//! history. Every line goes through the chat session; while a payment is
//! pending, `pay <nomor kartu>` confirms it. `/reset` clears the
//! conversation and `/quit` exits.

use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use luxechat_catalog::Catalog;
use luxechat_config::LuxeConfig;
use luxechat_core::{
    ChatTurn, CompletionProvider, KeyValueStore, LuxeError, Role,
};
use luxechat_engine::{ChatSession, TransactionStep};
use luxechat_groq::GroqProvider;
use luxechat_storage::SqliteStore;

/// Runs the `luxechat shell` interactive REPL.
pub async fn run_shell(config: LuxeConfig) -> Result<(), LuxeError> {
    // Initialize storage.
    let storage = SqliteStore::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(storage);

    // Initialize the Groq provider.
    let provider: Arc<dyn CompletionProvider> =
        Arc::new(GroqProvider::new(&config.groq).inspect_err(|_| {
            eprintln!(
                "error: Groq API key required. Set groq.api_key in luxechat.toml or the GROQ_API_KEY env var"
            );
        })?);

    let catalog = Arc::new(Catalog::builtin()?);
    let mut session =
        ChatSession::open(storage.clone(), provider, catalog.clone(), &config).await?;

    println!();
    println!("  {} - ketik /quit untuk keluar, /reset untuk mulai ulang", config.agent.name.bold());
    println!();
    for turn in session.turns() {
        render_turn(turn, &catalog);
    }
    print_payment_hint(&session);

    let mut editor = DefaultEditor::new().map_err(|e| {
        LuxeError::Internal(format!("failed to initialize readline: {e}"))
    })?;

    loop {
        let line = match editor.readline(&"anda> ".cyan().to_string()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(LuxeError::Internal(format!("readline failed: {e}")));
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset().await?;
                println!("{}", "percakapan dimulai ulang".dimmed());
                for turn in session.turns() {
                    render_turn(turn, &catalog);
                }
                continue;
            }
            _ => {}
        }

        let result = if let Some(card_number) = input.strip_prefix("pay ") {
            println!("{}", "memproses pembayaran...".dimmed());
            session.confirm_payment(card_number).await
        } else {
            session.handle_message(input).await
        };

        match result {
            Ok(replies) => {
                for reply in &replies {
                    render_turn(reply, &catalog);
                }
                print_payment_hint(&session);
            }
            Err(LuxeError::InvalidInput(notice)) => {
                println!("{}", notice.yellow());
            }
            Err(e) => return Err(e),
        }
    }

    debug!("shell exiting, closing storage");
    storage.close().await?;
    Ok(())
}

/// Prints one turn, with property cards under assistant replies.
fn render_turn(turn: &ChatTurn, catalog: &Catalog) {
    match turn.role {
        Role::User => println!("{} {}", "anda>".cyan(), turn.content),
        _ => println!("{} {}", "luxe>".green(), turn.content),
    }
    for id in &turn.property_ids {
        if let Some(property) = catalog.property(*id) {
            println!(
                "       {} {} | {} | {}",
                "·".dimmed(),
                property.title.bold(),
                property.price,
                property.location
            );
        }
    }
}

fn print_payment_hint(session: &ChatSession) {
    if session.transaction_step() == TransactionStep::Payment {
        println!(
            "{}",
            "ketik `pay <nomor kartu 16 angka>` untuk menyelesaikan pembayaran simulasi"
                .dimmed()
        );
    }
}
