// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two-step gift-intake conversation.
//!
//! Sequencing per user: a gift message is extracted and its sticker
//! transferred to object storage, then the session awaits a price; the next
//! text message becomes the price and the assembled record is persisted
//! under a fresh slug. The flow is pure with respect to delivery -- it
//! returns an [`Action`] the dispatcher executes.

use std::sync::Arc;
use std::time::Duration;

use giftbay_core::{
    generate_slug, AssetTransfer, ChatEvent, GiftFields, RecordStore,
};
use tracing::{error, info};

use crate::extract::{extract, GiftExtraction};
use crate::session::{SessionState, SessionStore};

pub const MSG_GREETING: &str =
    "Welcome! Forward me a unique gift service message and I will prepare a sale card for it.";
pub const MSG_REDIRECT: &str = "Open the bot in a private chat to continue.";
pub const MSG_NO_IMAGE: &str =
    "This gift arrived without a sticker image, so it cannot be processed.";
pub const MSG_UPLOAD_FAILED: &str =
    "Failed to upload the gift image. Please resend the gift.";
pub const MSG_PRICE_PROMPT: &str =
    "Enter the price this gift will be sold for (for example: 9.9 TON):";
pub const MSG_PRICE_RETRY: &str = "Please enter a valid price.";
pub const MSG_SAVE_FAILED: &str =
    "Failed to save the gift. Please send it again.";
pub const MSG_SAVED: &str = "Done! Open the gift card:";
pub const MSG_SESSION_EXPIRED: &str =
    "This session has expired. Please resend the gift.";

/// What the dispatcher should do with the chat after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to say; the message was unrelated or already handled.
    Silent,
    /// A plain text reply.
    Reply(String),
    /// A reply carrying a single-button keyboard opening the gift card
    /// web view.
    ReplyWithWebApp { text: String, webapp_url: String },
}

/// Drives gift intake and price entry for all users.
pub struct GiftFlow {
    sessions: SessionStore,
    store: Arc<dyn RecordStore>,
    transfer: Arc<dyn AssetTransfer>,
    webapp_base_url: String,
    bot_username: Option<String>,
}

impl GiftFlow {
    pub fn new(
        store: Arc<dyn RecordStore>,
        transfer: Arc<dyn AssetTransfer>,
        webapp_base_url: String,
        bot_username: Option<String>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            sessions: SessionStore::new(session_ttl),
            store,
            transfer,
            webapp_base_url,
            bot_username,
        }
    }

    /// Handles one inbound event and returns the reply to deliver.
    ///
    /// Never fails: every failure inside the flow maps to a user-visible
    /// reply (or silence), so a single user's bad luck cannot take down the
    /// dispatch loop.
    pub async fn handle(&self, event: &ChatEvent) -> Action {
        match extract(&event.payload) {
            GiftExtraction::Gift(fields) => self.on_gift(event, fields).await,
            GiftExtraction::MissingSticker => Action::Reply(MSG_NO_IMAGE.to_string()),
            GiftExtraction::Absent => self.on_text(event).await,
        }
    }

    async fn on_gift(&self, event: &ChatEvent, fields: GiftFields) -> Action {
        if !event.is_private {
            return Action::Reply(self.redirect_text());
        }

        match self
            .transfer
            .transfer(&fields.sticker_file_id, &fields.external_id)
            .await
        {
            Ok(image_url) => {
                info!(
                    user_id = event.user_id,
                    external_id = %fields.external_id,
                    "gift image transferred, awaiting price"
                );
                self.sessions
                    .begin(event.user_id, fields.into_pending(image_url));
                Action::Reply(MSG_PRICE_PROMPT.to_string())
            }
            Err(e) => {
                // The session is deliberately left untouched: the gift can
                // be resent and a previously held gift stays priceable.
                error!(
                    error = %e,
                    user_id = event.user_id,
                    external_id = %fields.external_id,
                    "gift image transfer failed"
                );
                Action::Reply(MSG_UPLOAD_FAILED.to_string())
            }
        }
    }

    async fn on_text(&self, event: &ChatEvent) -> Action {
        let Some(text) = event.text.as_deref() else {
            return Action::Silent;
        };

        if text.trim().starts_with("/start") {
            if !event.is_private {
                return Action::Reply(self.redirect_text());
            }
            return Action::Reply(MSG_GREETING.to_string());
        }

        match self.sessions.state(event.user_id) {
            SessionState::Idle => Action::Silent,
            SessionState::Expired => Action::Reply(MSG_SESSION_EXPIRED.to_string()),
            SessionState::AwaitingPrice(pending) => {
                let price = text.trim();
                if price.is_empty() {
                    return Action::Reply(MSG_PRICE_RETRY.to_string());
                }

                let slug = generate_slug();
                let payload = pending.into_payload(price.to_string());
                let result = self.store.put(&slug, &payload).await;
                // The session is cleared on both outcomes; a persistence
                // failure loses the in-flight gift and the user re-enters it.
                self.sessions.clear(event.user_id);

                match result {
                    Ok(()) => {
                        info!(user_id = event.user_id, slug = %slug, "gift record persisted");
                        Action::ReplyWithWebApp {
                            text: MSG_SAVED.to_string(),
                            webapp_url: format!(
                                "{}/gift/{slug}",
                                self.webapp_base_url.trim_end_matches('/')
                            ),
                        }
                    }
                    Err(e) => {
                        error!(
                            error = %e,
                            user_id = event.user_id,
                            slug = %slug,
                            "failed to persist gift record"
                        );
                        Action::Reply(MSG_SAVE_FAILED.to_string())
                    }
                }
            }
        }
    }

    fn redirect_text(&self) -> String {
        match &self.bot_username {
            Some(username) => format!("{MSG_REDIRECT}\nhttps://t.me/{username}"),
            None => MSG_REDIRECT.to_string(),
        }
    }
}
