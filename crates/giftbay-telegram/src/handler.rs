// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of Telegram messages into channel-agnostic chat events.
//!
//! The conversation flow never touches teloxide types directly; it consumes
//! a [`ChatEvent`] carrying the chat/user ids, the chat kind, any text, and
//! the full serialized message for gift probing.

use giftbay_core::ChatEvent;
use teloxide::prelude::*;
use teloxide::types::ChatKind;

/// Checks whether the message is from a private one-to-one chat.
///
/// Group, supergroup, and channel messages return `false`.
pub fn is_private(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Converts a Telegram message into a [`ChatEvent`].
///
/// Messages without a sender (e.g. channel posts) fall back to the chat id
/// as the session key.
pub fn to_chat_event(msg: &Message) -> ChatEvent {
    let user_id = msg
        .from
        .as_ref()
        .map(|u| u.id.0 as i64)
        .unwrap_or(msg.chat.id.0);

    ChatEvent {
        chat_id: msg.chat.id.0,
        user_id,
        is_private: is_private(msg),
        text: msg.text().map(str::to_string),
        payload: serde_json::to_value(msg).unwrap_or(serde_json::Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a mock private chat message from JSON, matching Telegram Bot
    /// API structure.
    fn make_private_message(user_id: u64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": user_id as i64,
                "type": "private",
                "first_name": "Test",
            },
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    /// Build a mock group chat message.
    fn make_group_message(user_id: u64, text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": -100123i64,
                "type": "supergroup",
                "title": "Test Group",
            },
            "from": {
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock group message")
    }

    #[test]
    fn private_chat_is_private() {
        let msg = make_private_message(12345, "hello");
        assert!(is_private(&msg));
    }

    #[test]
    fn group_chat_is_not_private() {
        let msg = make_group_message(12345, "hello");
        assert!(!is_private(&msg));
    }

    #[test]
    fn to_chat_event_maps_ids_and_text() {
        let msg = make_private_message(12345, "9.9 TON");
        let event = to_chat_event(&msg);
        assert_eq!(event.chat_id, 12345);
        assert_eq!(event.user_id, 12345);
        assert!(event.is_private);
        assert_eq!(event.text.as_deref(), Some("9.9 TON"));
    }

    #[test]
    fn to_chat_event_keeps_group_chat_id() {
        let msg = make_group_message(12345, "hi");
        let event = to_chat_event(&msg);
        assert_eq!(event.chat_id, -100123);
        assert_eq!(event.user_id, 12345);
        assert!(!event.is_private);
    }

    #[test]
    fn payload_carries_the_serialized_message() {
        let msg = make_private_message(12345, "hello");
        let event = to_chat_event(&msg);
        assert_eq!(event.payload["text"], "hello");
    }
}
