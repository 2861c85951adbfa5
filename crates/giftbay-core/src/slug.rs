// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short public identifiers for gift records.

/// Length of a generated slug in hex characters.
pub const SLUG_LEN: usize = 8;

/// Generates a fresh random slug: the first 8 hex characters of a v4 UUID.
///
/// Collisions across the 32-bit space are possible but treated as an
/// unexpected failure by the store's unique constraint, not pre-checked here.
pub fn generate_slug() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    hex[..SLUG_LEN].to_string()
}
