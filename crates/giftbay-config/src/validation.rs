// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, recognized log levels, and
//! well-formed URLs.

use crate::diagnostic::ConfigError;
use crate::model::GiftbayConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &GiftbayConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate log level is a recognized tracing level
    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // Validate api.host is not empty and looks like an IP or hostname
    let host = config.api.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("api.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate s3.region is not empty (it selects the public URL form)
    if config.s3.region.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "s3.region must not be empty".to_string(),
        });
    }

    // Validate session TTL is positive
    if config.telegram.session_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "telegram.session_ttl_secs must be positive".to_string(),
        });
    }

    // Validate webapp.base_url scheme when set
    if let Some(base_url) = &config.webapp.base_url
        && !base_url.starts_with("http://")
        && !base_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!("webapp.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
