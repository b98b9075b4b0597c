// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! luxechat - conversational lead engine for the LuxeEstate site.
//!
//! This is the binary entry point: an interactive chat shell plus the
//! admin commands over the lead records.

use clap::{Parser, Subcommand};

mod leads;
mod login;
mod reset;
mod shell;

/// luxechat - conversational lead engine for the LuxeEstate site.
#[derive(Parser, Debug)]
#[command(name = "luxechat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the assistant in an interactive shell.
    Shell,
    /// List captured leads (admin only).
    Leads {
        /// Output structured JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Delete every lead record.
        #[arg(long)]
        clear: bool,
        /// Keep running and re-render whenever the records change.
        #[arg(long)]
        watch: bool,
    },
    /// Log in to the admin panel.
    Login {
        /// Username; defaults to the configured admin.username.
        #[arg(long)]
        username: Option<String>,
    },
    /// Clear the admin session.
    Logout,
    /// Clear the persisted conversation history.
    Reset,
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match luxechat_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            luxechat_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Leads { json, clear, watch }) => {
            leads::run_leads(config, json, clear, watch).await
        }
        Some(Commands::Login { username }) => login::run_login(config, username).await,
        Some(Commands::Logout) => login::run_logout(config).await,
        Some(Commands::Reset) => reset::run_reset(config).await,
        None => {
            println!("luxechat: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        super::Cli::command().debug_assert();
    }

    #[test]
    fn default_config_is_valid() {
        let config = luxechat_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.agent.log_level, "info");
    }
}
