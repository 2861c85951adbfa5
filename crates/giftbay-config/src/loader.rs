// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./giftbay.toml` > `~/.config/giftbay/giftbay.toml`
//! > `/etc/giftbay/giftbay.toml` with environment variable overrides via the
//! `GIFTBAY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GiftbayConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/giftbay/giftbay.toml` (system-wide)
/// 3. `~/.config/giftbay/giftbay.toml` (user XDG config)
/// 4. `./giftbay.toml` (local directory)
/// 5. `GIFTBAY_*` environment variables
pub fn load_config() -> Result<GiftbayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GiftbayConfig::default()))
        .merge(Toml::file("/etc/giftbay/giftbay.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("giftbay/giftbay.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("giftbay.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<GiftbayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GiftbayConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GiftbayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GiftbayConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GIFTBAY_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("GIFTBAY_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: GIFTBAY_S3_ACCESS_KEY_ID -> "s3_access_key_id"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("log_", "log.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("webapp_", "webapp.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("s3_", "s3.", 1)
            .replacen("api_", "api.", 1);
        mapped.into()
    })
}
