// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sticker download from Telegram servers.
//!
//! Resolves a file id to its transient remote path via `getFile`, then
//! buffers the bytes fully into memory. Gift stickers are small, so full
//! buffering is acceptable.

use std::path::Path;

use giftbay_core::GiftbayError;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::FileId;
use tracing::debug;

/// Extension used when the remote path carries none.
pub const DEFAULT_EXT: &str = ".webp";

/// Downloads a sticker by file id, returning its bytes and the filename
/// extension derived from the remote path.
pub async fn download_sticker(
    bot: &Bot,
    file_id: &str,
) -> Result<(Vec<u8>, String), GiftbayError> {
    let file = bot
        .get_file(FileId(file_id.to_owned()))
        .await
        .map_err(|e| GiftbayError::Telegram {
            message: format!("failed to resolve file {file_id}: {e}"),
            source: Some(Box::new(e)),
        })?;

    let ext = ext_from_path(&file.path);

    let mut buf = Vec::new();
    bot.download_file(&file.path, &mut buf)
        .await
        .map_err(|e| GiftbayError::Telegram {
            message: format!("failed to download file {file_id}: {e}"),
            source: Some(Box::new(e)),
        })?;

    debug!(file_id, size = buf.len(), "downloaded sticker from Telegram");
    Ok((buf, ext))
}

/// Derives a dotted, lowercased filename extension from a remote path,
/// falling back to [`DEFAULT_EXT`].
pub fn ext_from_path(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| DEFAULT_EXT.to_string())
}
