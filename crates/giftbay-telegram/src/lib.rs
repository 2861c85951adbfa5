// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram intake pipeline for the Giftbay service.
//!
//! Long-polls the Bot API via teloxide, converts messages into
//! channel-agnostic events, drives the gift-intake conversation through
//! [`GiftFlow`], and delivers the resulting replies -- optionally with a
//! web-app keyboard opening the gift card.

pub mod extract;
pub mod flow;
pub mod handler;
pub mod media;
pub mod session;
pub mod transfer;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, ChatId, KeyboardButton, KeyboardMarkup, Recipient, ReplyMarkup, WebAppInfo};
use tracing::{error, info, warn};

use giftbay_core::GiftbayError;

use crate::flow::{Action, GiftFlow};

/// Label on the single keyboard button opening the gift card web view.
const WEBAPP_BUTTON_LABEL: &str = "Open gift card";

/// Runs the long-polling dispatcher until shutdown (Ctrl-C).
///
/// Every message is routed through `flow`; delivery failures are logged and
/// never propagate, so one user's failure cannot stop the loop.
pub async fn dispatch(bot: Bot, flow: Arc<GiftFlow>) {
    info!("starting Telegram long polling");

    let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let flow = flow.clone();
        async move {
            let event = handler::to_chat_event(&msg);
            let action = flow.handle(&event).await;
            if let Err(e) = send_action(&bot, event.chat_id, action).await {
                error!(error = %e, chat_id = event.chat_id, "failed to deliver reply");
            }
            respond(())
        }
    });

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {}) // Silently ignore non-message updates
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Delivers one flow action to a chat.
async fn send_action(bot: &Bot, chat_id: i64, action: Action) -> Result<(), GiftbayError> {
    match action {
        Action::Silent => Ok(()),
        Action::Reply(text) => {
            bot.send_message(Recipient::Id(ChatId(chat_id)), text)
                .await
                .map_err(send_err)?;
            Ok(())
        }
        Action::ReplyWithWebApp { text, webapp_url } => {
            let request = bot.send_message(Recipient::Id(ChatId(chat_id)), text);
            match webapp_keyboard(&webapp_url) {
                Some(keyboard) => {
                    request
                        .reply_markup(ReplyMarkup::Keyboard(keyboard))
                        .await
                        .map_err(send_err)?;
                }
                None => {
                    warn!(url = %webapp_url, "webapp url failed to parse, replying without keyboard");
                    request.await.map_err(send_err)?;
                }
            }
            Ok(())
        }
    }
}

/// Builds the single-button keyboard opening the gift card web view, or
/// `None` if the URL does not parse.
pub fn webapp_keyboard(url: &str) -> Option<KeyboardMarkup> {
    let url = reqwest::Url::parse(url).ok()?;
    let button =
        KeyboardButton::new(WEBAPP_BUTTON_LABEL).request(ButtonRequest::WebApp(WebAppInfo { url }));
    Some(
        KeyboardMarkup::new(vec![vec![button]])
            .resize_keyboard()
            .one_time_keyboard(),
    )
}

fn send_err(err: teloxide::RequestError) -> GiftbayError {
    GiftbayError::Telegram {
        message: format!("failed to send message: {err}"),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webapp_keyboard_for_valid_url() {
        let keyboard = webapp_keyboard("https://gifts.example.com/gift/a1b2c3d4");
        let keyboard = keyboard.expect("valid url builds a keyboard");
        assert_eq!(keyboard.keyboard.len(), 1);
        assert_eq!(keyboard.keyboard[0].len(), 1);
        assert_eq!(keyboard.keyboard[0][0].text, WEBAPP_BUTTON_LABEL);
    }

    #[test]
    fn webapp_keyboard_rejects_unparseable_url() {
        assert!(webapp_keyboard("not a url").is_none());
    }
}
