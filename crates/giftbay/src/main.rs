// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Giftbay - Telegram unique-gift intake bot with a gift-card lookup API.
//!
//! This is the binary entry point for the Giftbay service.

mod serve;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

/// Giftbay - Telegram unique-gift intake bot with a gift-card lookup API.
#[derive(Parser, Debug)]
#[command(name = "giftbay", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot and the lookup API server.
    Serve,
    /// Print the resolved configuration (secrets redacted).
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match giftbay_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            giftbay_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                eprintln!("giftbay serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config(config);
        }
        None => {
            println!("giftbay: use --help for available commands");
        }
    }
}

/// Prints the resolved configuration as TOML, with secrets redacted.
fn print_config(mut config: giftbay_config::GiftbayConfig) {
    if config.telegram.bot_token.is_some() {
        config.telegram.bot_token = Some("[redacted]".to_string());
    }
    if !config.s3.secret_access_key.is_empty() {
        config.s3.secret_access_key = "[redacted]".to_string();
    }
    match toml::to_string_pretty(&config) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => eprintln!("failed to render config: {e}"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn default_config_is_valid() {
        // Verify config loads with defaults (no config file needed)
        let config = giftbay_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.api.port, 8080);
    }
}
