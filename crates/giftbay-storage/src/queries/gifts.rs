// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gift record queries: insert-once and lookup-by-slug.

use giftbay_core::GiftbayError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Inserts a serialized payload under `slug`.
///
/// The slug's `UNIQUE` constraint is the only uniqueness enforcement; a
/// violation surfaces as [`GiftbayError::DuplicateSlug`] and leaves any
/// existing record untouched.
pub async fn insert_gift(
    db: &Database,
    slug: &str,
    payload_json: &str,
) -> Result<(), GiftbayError> {
    let slug_owned = slug.to_string();
    let payload_owned = payload_json.to_string();
    let inserted = db
        .connection()
        .call(move |conn| {
            match conn.execute(
                "INSERT INTO gifts (slug, payload_json) VALUES (?1, ?2)",
                params![slug_owned, payload_owned],
            ) {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;

    if inserted {
        Ok(())
    } else {
        Err(GiftbayError::DuplicateSlug {
            slug: slug.to_string(),
        })
    }
}

/// Looks up a record by slug. Returns the raw payload JSON and the
/// store-assigned creation timestamp, or `None` if the slug is unknown.
pub async fn get_gift(
    db: &Database,
    slug: &str,
) -> Result<Option<(String, String)>, GiftbayError> {
    let slug = slug.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT payload_json, created_at FROM gifts WHERE slug = ?1",
            )?;
            let result = stmt.query_row(params![slug], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            });
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true)
            .await
            .unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn insert_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;
        insert_gift(&db, "abc12345", r#"{"price":"9.9 TON"}"#)
            .await
            .unwrap();

        let row = get_gift(&db, "abc12345").await.unwrap();
        let (payload, created_at) = row.expect("record should exist");
        assert_eq!(payload, r#"{"price":"9.9 TON"}"#);
        assert!(created_at.ends_with('Z'), "created_at should be UTC RFC 3339");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_unknown_slug_returns_none() {
        let (db, _dir) = setup_db().await;
        let row = get_gift(&db, "deadbeef").await.unwrap();
        assert!(row.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_slug_fails_and_keeps_first_record() {
        let (db, _dir) = setup_db().await;
        insert_gift(&db, "abc12345", r#"{"price":"first"}"#)
            .await
            .unwrap();

        let err = insert_gift(&db, "abc12345", r#"{"price":"second"}"#)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GiftbayError::DuplicateSlug { ref slug } if slug == "abc12345"
        ));

        // The first record survives unchanged.
        let (payload, _) = get_gift(&db, "abc12345").await.unwrap().unwrap();
        assert_eq!(payload, r#"{"price":"first"}"#);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn repeated_get_returns_identical_payload() {
        let (db, _dir) = setup_db().await;
        insert_gift(&db, "feedc0de", r#"{"title":"Star Cap"}"#)
            .await
            .unwrap();

        let first = get_gift(&db, "feedc0de").await.unwrap();
        let second = get_gift(&db, "feedc0de").await.unwrap();
        assert_eq!(first, second);

        db.close().await.unwrap();
    }
}
