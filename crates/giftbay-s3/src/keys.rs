// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object key derivation and content-type mapping for gift images.

/// Namespace prefix for all gift image objects.
pub const KEY_PREFIX: &str = "gifts/";

/// Derives a storage key for a gift image.
///
/// Combines the namespace prefix, the gift's external id, and a fresh random
/// component so repeated uploads of the same gift never collide. An empty
/// external id falls back to a purely random key.
pub fn object_key(external_id: &str, ext: &str) -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    if external_id.is_empty() {
        format!("{KEY_PREFIX}{token}{ext}")
    } else {
        format!("{KEY_PREFIX}{external_id}_{token}{ext}")
    }
}

/// Maps a filename extension (with or without the leading dot) to a
/// content type, defaulting to a generic binary type when unknown.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "webp" => "image/webp",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
