// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the seams of the intake pipeline.
//!
//! Both traits use `#[async_trait]` for dynamic dispatch so the conversation
//! flow can be driven against fakes in tests.

use async_trait::async_trait;

use crate::error::GiftbayError;
use crate::types::{GiftPayload, GiftRecord};

/// Append-only keyed store for gift records.
///
/// The store is the only writer of gift records; the lookup API reads
/// through it. Slug uniqueness is enforced by the backend, not the caller.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a payload under `slug`.
    ///
    /// Fails with [`GiftbayError::DuplicateSlug`] if the slug is already
    /// taken; the existing record is left untouched.
    async fn put(&self, slug: &str, payload: &GiftPayload) -> Result<(), GiftbayError>;

    /// Resolves a slug to its record, or `None` if no such record exists.
    async fn get(&self, slug: &str) -> Result<Option<GiftRecord>, GiftbayError>;
}

/// Two-legged transfer of a gift image: download from Telegram by file id,
/// upload to object storage, return the durable public URL.
///
/// `external_id` feeds the storage key so repeated uploads of the same gift
/// stay distinguishable; it may be empty, in which case the key is purely
/// random.
#[async_trait]
pub trait AssetTransfer: Send + Sync {
    async fn transfer(
        &self,
        sticker_file_id: &str,
        external_id: &str,
    ) -> Result<String, GiftbayError>;
}
