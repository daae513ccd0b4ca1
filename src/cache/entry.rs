//! Cache Entry Module
//!
//! A cached value together with the instants bounding its lifetime.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cached value with its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// When the value was stored
    pub populated_at: Instant,
    /// When the value stops being served; `None` if that lies beyond what
    /// `Instant` can represent
    pub expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry that lives for `ttl` from now.
    pub fn new(value: T, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            populated_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches `expires_at`, so a
    /// zero TTL is never served.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        match self.expires_at {
            Some(expires_at) => expires_at.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }

    /// Time since the value was stored.
    pub fn age(&self) -> Duration {
        self.populated_at.elapsed()
    }
}
