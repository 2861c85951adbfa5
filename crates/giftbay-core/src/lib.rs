// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Giftbay gift-card service.
//!
//! This crate provides the error type, the domain types shared between the
//! Telegram intake pipeline, the record store, and the lookup API, plus the
//! adapter traits implemented by the storage and upload crates.

pub mod error;
pub mod slug;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GiftbayError;
pub use slug::generate_slug;
pub use traits::{AssetTransfer, RecordStore};
pub use types::{ChatEvent, GiftFields, GiftPayload, GiftRecord, PendingGift};
