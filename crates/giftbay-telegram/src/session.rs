// SPDX-FileCopyrightText: 2026 Giftbay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation sessions with TTL eviction.
//!
//! One single-slot session per user: either the user is idle or a gift is
//! held awaiting its price. A new gift overwrites a held one (last-gift-wins).
//! Sessions are evicted lazily on access once their TTL has elapsed; the
//! upstream implementation held sessions forever, which is a documented
//! divergence.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use giftbay_core::PendingGift;
use tracing::debug;

/// Observed state of one user's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No gift in flight.
    Idle,
    /// A gift is held and the next text message is its price.
    AwaitingPrice(PendingGift),
    /// A gift was held but sat unanswered past the TTL; the entry has been
    /// evicted as a side effect of this observation.
    Expired,
}

struct HeldGift {
    gift: PendingGift,
    since: Instant,
}

/// Map of user id to held gift, owned exclusively by the conversation flow.
pub struct SessionStore {
    sessions: DashMap<i64, HeldGift>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Holds `gift` for `user_id`, overwriting any previous held gift.
    pub fn begin(&self, user_id: i64, gift: PendingGift) {
        debug!(user_id, external_id = %gift.external_id, "session awaiting price");
        self.sessions.insert(
            user_id,
            HeldGift {
                gift,
                since: Instant::now(),
            },
        );
    }

    /// Returns the user's current state, evicting the entry if it expired.
    pub fn state(&self, user_id: i64) -> SessionState {
        // The shard guard must be dropped before remove(), so the expiry
        // check cannot be folded into a single map operation.
        match self.sessions.get(&user_id) {
            None => return SessionState::Idle,
            Some(held) if held.since.elapsed() <= self.ttl => {
                return SessionState::AwaitingPrice(held.gift.clone());
            }
            Some(_) => {}
        }
        self.sessions.remove(&user_id);
        debug!(user_id, "session expired");
        SessionState::Expired
    }

    /// Drops the user's session, if any.
    pub fn clear(&self, user_id: i64) {
        self.sessions.remove(&user_id);
    }

    /// Number of live (possibly expired but not yet evicted) sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
