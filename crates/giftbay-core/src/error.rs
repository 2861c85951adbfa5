// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Giftbay service.

use thiserror::Error;

/// The primary error type used across all Giftbay crates.
#[derive(Debug, Error)]
pub enum GiftbayError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Telegram Bot API errors (connection failure, file resolution, message delivery).
    #[error("telegram error: {message}")]
    Telegram {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Object storage upload errors.
    #[error("upload error: {message}")]
    Upload {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A gift record with this slug already exists.
    #[error("slug already taken: {slug}")]
    DuplicateSlug { slug: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = GiftbayError::DuplicateSlug {
            slug: "a1b2c3d4".into(),
        };
        assert_eq!(err.to_string(), "slug already taken: a1b2c3d4");

        let err = GiftbayError::Upload {
            message: "failed to upload gifts/x.webp".into(),
            source: None,
        };
        assert!(err.to_string().contains("gifts/x.webp"));
    }

    #[test]
    fn storage_error_preserves_source() {
        let err = GiftbayError::Storage {
            source: Box::new(std::io::Error::other("disk full")),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
