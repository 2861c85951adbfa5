// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Giftbay service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Giftbay configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; fields required only by `serve` (bot token, webapp base URL,
/// bucket) are checked at serve time, not load time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GiftbayConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Companion web front-end settings.
    #[serde(default)]
    pub webapp: WebappConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// S3 object storage settings.
    #[serde(default)]
    pub s3: S3Config,

    /// Lookup API server settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required for `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Bot username (without `@`), used for the redirect deep link shown
    /// when a gift arrives in a group chat.
    #[serde(default)]
    pub bot_username: Option<String>,

    /// Seconds an awaiting-price session is kept before lazy eviction.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            bot_username: None,
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_session_ttl_secs() -> u64 {
    1800
}

/// Companion web front-end configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebappConfig {
    /// Base URL of the gift-card web app, e.g. `https://gifts.example.com`.
    /// The bot links to `{base_url}/gift/{slug}`. Required for `serve`.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("giftbay").join("giftbay.db"))
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| "giftbay.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// S3 object storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct S3Config {
    /// Bucket receiving gift images. Required for `serve`.
    #[serde(default)]
    pub bucket: String,

    /// AWS region of the bucket. Also selects the public URL form:
    /// `us-east-1` uses the region-less virtual-hosted host.
    #[serde(default = "default_s3_region")]
    pub region: String,

    /// Static access key id. Leave empty to use the default AWS
    /// credential provider chain.
    #[serde(default)]
    pub access_key_id: String,

    /// Static secret access key, paired with `access_key_id`.
    #[serde(default)]
    pub secret_access_key: String,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_s3_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

fn default_s3_region() -> String {
    "us-east-1".to_string()
}

/// Lookup API server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Host address to bind.
    #[serde(default = "default_api_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = GiftbayConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.telegram.session_ttl_secs, 1800);
        assert!(config.storage.wal_mode);
        assert_eq!(config.s3.region, "us-east-1");
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn config_roundtrips_through_serde() {
        let config = GiftbayConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GiftbayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api.host, config.api.host);
        assert_eq!(back.storage.database_path, config.storage.database_path);
    }
}
