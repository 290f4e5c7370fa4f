//! In-memory quote cache.
//!
//! Entries are served while younger than the freshness window and silently
//! overwritten on refetch. An optional capacity bound evicts expired entries
//! first, then the oldest retrieval. The cache is in-memory and resets on
//! application restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::time::Instant;

use crate::models::Quote;

#[derive(Debug)]
struct CacheEntry {
    quote: Quote,
    fetched_at: Instant,
}

/// TTL cache of quotes keyed by requested symbol.
pub struct QuoteCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    capacity: Option<usize>,
}

impl QuoteCache {
    pub fn new(ttl: Duration, capacity: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity,
        }
    }

    fn key(symbol: &str) -> String {
        format!("quote_{}", symbol)
    }

    /// Lock the entries mutex, recovering from poison if necessary.
    ///
    /// The worst case after a poisoned lock is a stale or missing entry.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Quote cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Return the cached quote if it is still fresh.
    pub fn get(&self, symbol: &str) -> Option<Quote> {
        let entries = self.lock_entries();
        entries
            .get(&Self::key(symbol))
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.quote.clone())
    }

    /// Store a freshly fetched quote, replacing any previous entry.
    pub fn insert(&self, symbol: &str, quote: Quote) {
        let key = Self::key(symbol);
        let mut entries = self.lock_entries();

        if let Some(capacity) = self.capacity {
            if !entries.contains_key(&key) && entries.len() >= capacity {
                self.make_room(&mut entries, capacity);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                quote,
                fetched_at: Instant::now(),
            },
        );
    }

    fn make_room(&self, entries: &mut HashMap<String, CacheEntry>, capacity: usize) {
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);

        while entries.len() >= capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    debug!("Quote cache full, evicting {}", key);
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Number of entries currently held, fresh or not.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
