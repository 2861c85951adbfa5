// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gift field extraction from inbound message payloads.
//!
//! Bot API library versions expose the embedded unique-gift structure under
//! different attribute paths, so extraction probes an explicit ordered list
//! of strategies over the serialized message instead of relying on any one
//! typed accessor: the wrapper path, the direct path, then a recursive
//! search over the whole payload.

use giftbay_core::GiftFields;
use serde_json::Value;
use tracing::warn;

/// Fallback title when the payload carries none.
const DEFAULT_TITLE: &str = "Gift";

/// Outcome of probing one inbound message for a unique gift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiftExtraction {
    /// A unique gift with a usable sticker reference.
    Gift(GiftFields),
    /// A unique gift was found but carries no sticker file id; the message
    /// is malformed and the user must be told.
    MissingSticker,
    /// No gift structure anywhere in the payload. Not an error -- most
    /// inbound messages are unrelated.
    Absent,
}

/// Probes `payload` for a unique-gift structure.
///
/// Pure function of the payload; tolerates any descriptive subfield being
/// absent (empty/zero defaults) but treats a missing sticker reference as a
/// hard condition.
pub fn extract(payload: &Value) -> GiftExtraction {
    let strategies: [fn(&Value) -> Option<&Value>; 3] =
        [wrapped_gift, direct_gift, nested_gift];

    for strategy in strategies {
        if let Some(unique) = strategy(payload) {
            return build_fields(payload, unique);
        }
    }
    GiftExtraction::Absent
}

/// Strategy 1: the gift wrapper object holding a nested unique-gift
/// reference (`gift.unique_gift`).
fn wrapped_gift(payload: &Value) -> Option<&Value> {
    payload
        .get("gift")?
        .get("unique_gift")
        .filter(|v| v.is_object())
}

/// Strategy 2: a unique-gift reference directly on the message.
fn direct_gift(payload: &Value) -> Option<&Value> {
    payload.get("unique_gift").filter(|v| v.is_object())
}

/// Strategy 3: depth-first search for a `unique_gift` object anywhere in
/// the payload. Last resort for schema variants the first two strategies
/// do not know about.
fn nested_gift(payload: &Value) -> Option<&Value> {
    find_key(payload, "unique_gift")
}

fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key)
                && found.is_object()
            {
                return Some(found);
            }
            map.values().find_map(|v| find_key(v, key))
        }
        Value::Array(items) => items.iter().find_map(|v| find_key(v, key)),
        _ => None,
    }
}

fn build_fields(payload: &Value, unique: &Value) -> GiftExtraction {
    let model = unique.get("model");
    let symbol = unique.get("symbol");
    let backdrop = unique.get("backdrop");

    // The sticker can sit under model.sticker or directly on the gift.
    let sticker_file_id = model
        .and_then(|m| m.get("sticker"))
        .and_then(|s| s.get("file_id"))
        .and_then(Value::as_str)
        .or_else(|| {
            unique
                .get("sticker")
                .and_then(|s| s.get("file_id"))
                .and_then(Value::as_str)
        });

    let Some(file_id) = sticker_file_id.filter(|id| !id.is_empty()) else {
        warn!("unique gift carries no sticker file_id");
        return GiftExtraction::MissingSticker;
    };

    let title = unique
        .get("title")
        .and_then(Value::as_str)
        .or_else(|| {
            payload
                .get("gift")
                .and_then(|g| g.get("title"))
                .and_then(Value::as_str)
        })
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    GiftExtraction::Gift(GiftFields {
        title,
        external_id: string_at(unique, "id"),
        model_name: str_field(model, "name"),
        model_rarity_per_mille: rarity_field(model, "rarity_per_mille"),
        symbol_name: str_field(symbol, "name"),
        symbol_rarity_per_mille: rarity_field(symbol, "rarity_per_mille"),
        backdrop_color: backdrop.map(|b| string_at(b, "color")).unwrap_or_default(),
        backdrop_rarity_per_mille: rarity_field(backdrop, "rarity_per_mille"),
        sticker_file_id: file_id.to_string(),
    })
}

/// Reads a string field from an optional parent object, defaulting to empty.
fn str_field(parent: Option<&Value>, key: &str) -> String {
    parent
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Reads a field that may arrive as a string or a number, coercing to a
/// string. Used for the opaque gift id and the backdrop color encoding.
fn string_at(parent: &Value, key: &str) -> String {
    match parent.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Reads a per-mille rarity, clamped to [0, 1000], defaulting to zero.
fn rarity_field(parent: Option<&Value>, key: &str) -> u32 {
    parent
        .and_then(|v| v.get(key))
        .and_then(Value::as_u64)
        .map(|n| n.min(1000) as u32)
        .unwrap_or(0)
}
