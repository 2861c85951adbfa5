// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`RecordStore`] trait.

use async_trait::async_trait;
use tracing::debug;

use giftbay_config::model::StorageConfig;
use giftbay_core::{GiftbayError, GiftPayload, GiftRecord, RecordStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates to the typed query module.
/// Payloads are stored as opaque serialized JSON keyed by slug; there is no
/// update or delete surface.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Opens the database at the configured path (running migrations) and
    /// returns a ready store.
    pub async fn open(config: &StorageConfig) -> Result<Self, GiftbayError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite record store initialized");
        Ok(Self { db })
    }

    /// Wraps an already-open database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Checkpoints and releases the underlying connection.
    pub async fn close(&self) -> Result<(), GiftbayError> {
        self.db.close().await
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn put(&self, slug: &str, payload: &GiftPayload) -> Result<(), GiftbayError> {
        let payload_json = serde_json::to_string(payload).map_err(|e| GiftbayError::Storage {
            source: Box::new(e),
        })?;
        queries::gifts::insert_gift(&self.db, slug, &payload_json).await
    }

    async fn get(&self, slug: &str) -> Result<Option<GiftRecord>, GiftbayError> {
        let Some((payload_json, created_at)) = queries::gifts::get_gift(&self.db, slug).await?
        else {
            return Ok(None);
        };
        let payload: GiftPayload =
            serde_json::from_str(&payload_json).map_err(|e| GiftbayError::Storage {
                source: Box::new(e),
            })?;
        Ok(Some(GiftRecord {
            slug: slug.to_string(),
            payload,
            created_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn sample_payload(price: &str) -> GiftPayload {
        GiftPayload {
            title: "Star Cap".into(),
            id: "starcap-11".into(),
            model_name: "Nebula".into(),
            model_rarity_per_mille: 12,
            symbol_name: "Comet".into(),
            symbol_rarity_per_mille: 40,
            backdrop_color: "#102030".into(),
            backdrop_rarity_per_mille: 7,
            image_url: "https://bucket.s3.amazonaws.com/gifts/starcap-11_a.webp".into(),
            price: price.into(),
        }
    }

    #[tokio::test]
    async fn put_then_get_returns_deep_equal_payload() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("roundtrip.db");
        let store = SqliteStore::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();

        let payload = sample_payload("9.9 TON");
        store.put("a1b2c3d4", &payload).await.unwrap();

        let record = store.get("a1b2c3d4").await.unwrap().unwrap();
        assert_eq!(record.slug, "a1b2c3d4");
        assert_eq!(record.payload, payload);
        assert!(!record.created_at.is_empty());

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_slug_is_none() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("missing.db");
        let store = SqliteStore::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();

        assert!(store.get("00000000").await.unwrap().is_none());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn second_put_with_same_slug_fails() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("dup.db");
        let store = SqliteStore::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();

        store.put("a1b2c3d4", &sample_payload("1 TON")).await.unwrap();
        let err = store
            .put("a1b2c3d4", &sample_payload("2 TON"))
            .await
            .unwrap_err();
        assert!(matches!(err, GiftbayError::DuplicateSlug { .. }));

        // First record still retrievable, unchanged.
        let record = store.get("a1b2c3d4").await.unwrap().unwrap();
        assert_eq!(record.payload.price, "1 TON");

        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn distinct_slugs_store_distinct_records() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("two.db");
        let store = SqliteStore::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();

        store.put("aaaa1111", &sample_payload("1 TON")).await.unwrap();
        store.put("bbbb2222", &sample_payload("2 TON")).await.unwrap();

        assert_eq!(store.get("aaaa1111").await.unwrap().unwrap().payload.price, "1 TON");
        assert_eq!(store.get("bbbb2222").await.unwrap().unwrap().payload.price, "2 TON");

        store.close().await.unwrap();
    }
}
