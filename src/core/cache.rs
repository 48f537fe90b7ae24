use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::core::types::ResolvedAccount;

struct CachedEntry {
    value: ResolvedAccount,
    stored_at: Instant,
}

/// Short-lived memoization of resolve results keyed by handle, bounding
/// outbound call volume. Owned by the engine layer; the scoring path never
/// touches it. A TTL of zero disables caching entirely.
pub struct ResolveCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedEntry>>,
}

impl ResolveCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, handle: &str) -> Option<ResolvedAccount> {
        if self.ttl.is_zero() {
            return None;
        }
        let entries = self.entries.lock().ok()?;
        entries.get(handle).and_then(|entry| {
            if entry.stored_at.elapsed() < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    pub fn put(&self, handle: &str, value: &ResolvedAccount) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock().expect("cache poisoned");
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            handle.to_string(),
            CachedEntry {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
    }
}
