// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Giftbay service.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and diagnostic error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use giftbay_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("API port: {}", config.api.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::GiftbayConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to diagnostics with typo suggestions
pub fn load_and_validate() -> Result<GiftbayConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<GiftbayConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = load_and_validate_str("").expect("empty config should be valid");
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.s3.region, "us-east-1");
        assert_eq!(config.log.level, "info");
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn toml_sections_override_defaults() {
        let toml = r#"
            [telegram]
            bot_token = "123456:ABC"
            bot_username = "giftbaybot"

            [webapp]
            base_url = "https://gifts.example.com"

            [s3]
            bucket = "giftbay-media"
            region = "eu-central-1"

            [api]
            port = 9090
        "#;
        let config = load_and_validate_str(toml).unwrap();
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123456:ABC"));
        assert_eq!(config.webapp.base_url.as_deref(), Some("https://gifts.example.com"));
        assert_eq!(config.s3.bucket, "giftbay-media");
        assert_eq!(config.s3.region, "eu-central-1");
        assert_eq!(config.api.port, 9090);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let toml = r#"
            [telegram]
            bot_tken = "123456:ABC"
        "#;
        let errors = load_and_validate_str(toml).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn invalid_level_fails_validation() {
        let toml = r#"
            [log]
            level = "loud"
        "#;
        let errors = load_and_validate_str(toml).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("log.level")));
    }
}
