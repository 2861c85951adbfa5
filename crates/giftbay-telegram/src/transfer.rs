// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Production [`AssetTransfer`]: Telegram download leg plus S3 upload leg.

use async_trait::async_trait;
use teloxide::prelude::*;

use giftbay_core::{AssetTransfer, GiftbayError};
use giftbay_s3::{keys, S3Uploader};

use crate::media;

/// Moves a gift sticker from Telegram file storage into the public bucket.
pub struct StickerTransfer {
    bot: Bot,
    uploader: S3Uploader,
}

impl StickerTransfer {
    pub fn new(bot: Bot, uploader: S3Uploader) -> Self {
        Self { bot, uploader }
    }
}

#[async_trait]
impl AssetTransfer for StickerTransfer {
    async fn transfer(
        &self,
        sticker_file_id: &str,
        external_id: &str,
    ) -> Result<String, GiftbayError> {
        let (bytes, ext) = media::download_sticker(&self.bot, sticker_file_id).await?;
        let content_type = keys::content_type_for(&ext);
        let key = keys::object_key(external_id, &ext);
        self.uploader.upload_public(bytes, &key, content_type).await
    }
}
