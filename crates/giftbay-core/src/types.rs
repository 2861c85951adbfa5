// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the intake pipeline, record store, and lookup API.

use serde::{Deserialize, Serialize};

/// Fields extracted from a unique-gift service message.
///
/// All descriptive fields default to empty/zero when the source payload omits
/// them. `sticker_file_id` is consumed exactly once by the asset transfer and
/// is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftFields {
    pub title: String,
    /// Opaque gift identifier assigned by Telegram.
    pub external_id: String,
    pub model_name: String,
    /// Rarity in parts per thousand, range [0, 1000].
    pub model_rarity_per_mille: u32,
    pub symbol_name: String,
    pub symbol_rarity_per_mille: u32,
    pub backdrop_color: String,
    pub backdrop_rarity_per_mille: u32,
    /// Telegram file reference for the gift's sticker image.
    pub sticker_file_id: String,
}

impl GiftFields {
    /// Converts extracted fields into session-held state once the sticker has
    /// been transferred to object storage. The file id is dropped here.
    pub fn into_pending(self, image_url: String) -> PendingGift {
        PendingGift {
            title: self.title,
            external_id: self.external_id,
            model_name: self.model_name,
            model_rarity_per_mille: self.model_rarity_per_mille,
            symbol_name: self.symbol_name,
            symbol_rarity_per_mille: self.symbol_rarity_per_mille,
            backdrop_color: self.backdrop_color,
            backdrop_rarity_per_mille: self.backdrop_rarity_per_mille,
            image_url,
        }
    }
}

/// Gift state held in a user's session between the gift message and the
/// price message. Gone as soon as the record is persisted or the session
/// is abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGift {
    pub title: String,
    pub external_id: String,
    pub model_name: String,
    pub model_rarity_per_mille: u32,
    pub symbol_name: String,
    pub symbol_rarity_per_mille: u32,
    pub backdrop_color: String,
    pub backdrop_rarity_per_mille: u32,
    pub image_url: String,
}

impl PendingGift {
    /// Assembles the durable payload once the user has supplied a price.
    pub fn into_payload(self, price: String) -> GiftPayload {
        GiftPayload {
            title: self.title,
            id: self.external_id,
            model_name: self.model_name,
            model_rarity_per_mille: self.model_rarity_per_mille,
            symbol_name: self.symbol_name,
            symbol_rarity_per_mille: self.symbol_rarity_per_mille,
            backdrop_color: self.backdrop_color,
            backdrop_rarity_per_mille: self.backdrop_rarity_per_mille,
            image_url: self.image_url,
            price,
        }
    }
}

/// The serialized body of a gift record, served verbatim by the lookup API.
///
/// `price` is a free-form string (e.g. "9.9 TON"); it is stored exactly as
/// the user typed it and never parsed as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftPayload {
    pub title: String,
    pub id: String,
    pub model_name: String,
    pub model_rarity_per_mille: u32,
    pub symbol_name: String,
    pub symbol_rarity_per_mille: u32,
    pub backdrop_color: String,
    pub backdrop_rarity_per_mille: u32,
    pub image_url: String,
    pub price: String,
}

/// A durable gift record. Created once, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftRecord {
    /// Short public identifier, unique across all records.
    pub slug: String,
    pub payload: GiftPayload,
    /// RFC 3339 timestamp, set by the store.
    pub created_at: String,
}

/// A channel-agnostic inbound chat event consumed by the conversation flow.
///
/// `payload` carries the full serialized message so the gift extractor can
/// probe it without depending on which attribute paths the Bot API library
/// version exposes.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub chat_id: i64,
    pub user_id: i64,
    pub is_private: bool,
    pub text: Option<String>,
    pub payload: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> GiftFields {
        GiftFields {
            title: "Star Cap".into(),
            external_id: "starcap-11".into(),
            model_name: "Nebula".into(),
            model_rarity_per_mille: 12,
            symbol_name: "Comet".into(),
            symbol_rarity_per_mille: 40,
            backdrop_color: "#102030".into(),
            backdrop_rarity_per_mille: 7,
            sticker_file_id: "BAADAgAD".into(),
        }
    }

    #[test]
    fn into_pending_drops_sticker_file_id() {
        let pending = sample_fields().into_pending("https://cdn/img.webp".into());
        assert_eq!(pending.external_id, "starcap-11");
        assert_eq!(pending.image_url, "https://cdn/img.webp");
        // PendingGift has no sticker_file_id field; nothing further to check.
    }

    #[test]
    fn into_payload_maps_external_id_to_id() {
        let payload = sample_fields()
            .into_pending("https://cdn/img.webp".into())
            .into_payload("9.9 TON".into());
        assert_eq!(payload.id, "starcap-11");
        assert_eq!(payload.price, "9.9 TON");
    }

    #[test]
    fn payload_serializes_with_wire_field_names() {
        let payload = sample_fields()
            .into_pending("https://cdn/img.webp".into())
            .into_payload("1 TON".into());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["id"], "starcap-11");
        assert_eq!(json["model_rarity_per_mille"], 12);
        assert_eq!(json["image_url"], "https://cdn/img.webp");
        assert_eq!(json["price"], "1 TON");
        // sticker_file_id must never reach the wire.
        assert!(json.get("sticker_file_id").is_none());
    }

    #[test]
    fn payload_roundtrips_through_json() {
        let payload = sample_fields()
            .into_pending("https://cdn/img.webp".into())
            .into_payload("5 TON".into());
        let text = serde_json::to_string(&payload).unwrap();
        let back: GiftPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(back, payload);
    }
}
