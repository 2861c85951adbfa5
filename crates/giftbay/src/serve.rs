// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `giftbay serve` command implementation.
//!
//! Wires the SQLite record store, the S3 uploader, the Telegram intake
//! loop, and the lookup API server together. The bot loop and the API
//! server run as independent tasks sharing only the record store, so a
//! slow upload or store call for one user never blocks lookups or other
//! users' sessions.

use std::sync::Arc;
use std::time::Duration;

use teloxide::Bot;
use tracing::info;
use tracing_subscriber::EnvFilter;

use giftbay_api::{ApiState, ServerConfig};
use giftbay_config::GiftbayConfig;
use giftbay_core::{AssetTransfer, GiftbayError, RecordStore};
use giftbay_s3::S3Uploader;
use giftbay_storage::SqliteStore;
use giftbay_telegram::flow::GiftFlow;
use giftbay_telegram::transfer::StickerTransfer;

/// Runs the `giftbay serve` command until shutdown.
pub async fn run(config: GiftbayConfig) -> Result<(), GiftbayError> {
    init_tracing(&config.log.level);

    info!("starting giftbay serve");

    let token = config
        .telegram
        .bot_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GiftbayError::Config("telegram.bot_token is required for serve".into()))?;

    let webapp_base_url = config
        .webapp
        .base_url
        .clone()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| GiftbayError::Config("webapp.base_url is required for serve".into()))?;

    // Storage: shared by the bot's persistence path and the lookup API.
    let sqlite = Arc::new(SqliteStore::open(&config.storage).await?);
    let store: Arc<dyn RecordStore> = sqlite.clone();

    // Asset transfer: Telegram download leg + S3 upload leg.
    let uploader = S3Uploader::new(&config.s3).await?;
    let bot = Bot::new(token);
    let transfer: Arc<dyn AssetTransfer> = Arc::new(StickerTransfer::new(bot.clone(), uploader));

    let flow = Arc::new(GiftFlow::new(
        store.clone(),
        transfer,
        webapp_base_url,
        config.telegram.bot_username.clone(),
        Duration::from_secs(config.telegram.session_ttl_secs),
    ));

    // Lookup API runs beside the bot loop and must not block on it.
    let server_config = ServerConfig {
        host: config.api.host.clone(),
        port: config.api.port,
    };
    let api_state = ApiState {
        store: store.clone(),
    };
    let api_task = tokio::spawn(async move {
        if let Err(e) = giftbay_api::start_server(&server_config, api_state).await {
            tracing::error!(error = %e, "lookup api server stopped");
        }
    });

    // Blocks until Ctrl-C stops the dispatcher.
    giftbay_telegram::dispatch(bot, flow).await;

    api_task.abort();
    if let Err(e) = sqlite.close().await {
        tracing::warn!(error = %e, "store close failed during shutdown");
    }
    info!("giftbay serve stopped");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
