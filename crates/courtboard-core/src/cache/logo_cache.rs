//! Two-tier TTL cache for team logo URLs
//!
//! Memory tier: `DashMap` for same-process speed.
//! Durable tier: one JSON slot holding the whole snapshot, rewritten on every `set`.
//!
//! Expiry is lazy: stale entries are ignored at read time and stay on disk
//! until overwritten or cleared. Every durable-tier failure degrades to a miss.

use super::durable::{DurableStore, FileSlot, MemorySlot};
use super::entry::{parse_snapshot, CacheEntry, Snapshot, LOGO_TTL};
use crate::clock::{Clock, SystemClock};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Durable entry as shown by inspection tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedLogo {
    pub key: String,
    pub url: String,
    pub timestamp: i64,
    pub fresh: bool,
}

/// Team logo cache (thread-safe, share via `Arc`)
pub struct LogoCache {
    memory: DashMap<String, CacheEntry>,
    durable: Box<dyn DurableStore>,
    clock: Arc<dyn Clock>,
    /// Serializes the read-modify-write of the durable snapshot
    write_lock: Mutex<()>,
    ttl: Duration,
}

impl LogoCache {
    pub fn new(durable: impl DurableStore + 'static, clock: Arc<dyn Clock>) -> Self {
        Self {
            memory: DashMap::new(),
            durable: Box::new(durable),
            clock,
            write_lock: Mutex::new(()),
            ttl: LOGO_TTL,
        }
    }

    /// File-backed cache in `cache_dir` using the wall clock
    pub fn with_defaults(cache_dir: &Path) -> Self {
        Self::new(FileSlot::in_dir(cache_dir), Arc::new(SystemClock))
    }

    /// Cache without cross-process persistence
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(MemorySlot::new(), clock)
    }

    /// Look up a normalized key. Memory first, then the durable snapshot.
    ///
    /// A fresh durable hit is promoted into memory. Never fails.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = self.clock.now_millis();

        let in_memory = self.memory.get(key).map(|entry| entry.value().clone());
        if let Some(entry) = in_memory {
            if entry.is_fresh(now, self.ttl) {
                debug!(key, "Logo cache hit (memory)");
                return Some(entry.url);
            }
        }

        let snapshot = self.read_snapshot();
        match snapshot.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl) => {
                debug!(key, "Logo cache hit (durable), promoting");
                self.memory.insert(key.to_string(), entry.clone());
                Some(entry.url.clone())
            }
            Some(_) => {
                debug!(key, "Logo cache entry expired");
                None
            }
            None => {
                debug!(key, "Logo cache miss");
                None
            }
        }
    }

    /// Store `url` under `key` in both tiers. Durable failures are logged only.
    ///
    /// When the durable slot cannot be read, only the memory tier is updated.
    pub fn set(&self, key: &str, url: &str) {
        let entry = CacheEntry::new(url, self.clock.now_millis());
        self.memory.insert(key.to_string(), entry.clone());

        let _guard = self.write_lock.lock();
        // An unreadable slot is not an empty one; rewriting it would drop every other key
        let Some(mut snapshot) = self.load_snapshot() else {
            warn!(key, "Logo cache snapshot unreadable, skipping durable write");
            return;
        };
        snapshot.insert(key.to_string(), entry);

        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize logo cache snapshot");
                return;
            }
        };

        if let Err(e) = self.durable.save(&json) {
            warn!(key, error = %e, "Failed to persist logo cache, keeping memory tier only");
        }
    }

    /// Empty both tiers
    pub fn clear(&self) {
        self.memory.clear();

        let _guard = self.write_lock.lock();
        if let Err(e) = self.durable.remove() {
            warn!(error = %e, "Failed to remove logo cache snapshot");
        }
        debug!("Logo cache cleared");
    }

    /// Drop the memory tier only, as a fresh process would see it
    pub fn clear_memory(&self) {
        self.memory.clear();
    }

    /// Number of entries currently held in memory
    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    /// All durable entries, with freshness evaluated now
    pub fn entries(&self) -> Vec<CachedLogo> {
        let now = self.clock.now_millis();
        self.read_snapshot()
            .into_iter()
            .map(|(key, entry)| CachedLogo {
                fresh: entry.is_fresh(now, self.ttl),
                key,
                url: entry.url,
                timestamp: entry.timestamp,
            })
            .collect()
    }

    /// Durable snapshot for reads: unreadable counts as empty
    fn read_snapshot(&self) -> Snapshot {
        self.load_snapshot().unwrap_or_default()
    }

    /// `None` when the slot could not be read; missing or malformed is `Some(empty)`
    fn load_snapshot(&self) -> Option<Snapshot> {
        match self.durable.load() {
            Ok(Some(raw)) => Some(parse_snapshot(&raw)),
            Ok(None) => Some(Snapshot::new()),
            Err(e) => {
                warn!(error = %e, "Logo cache snapshot unreadable");
                None
            }
        }
    }
}

impl std::fmt::Debug for LogoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoCache")
            .field("memory_len", &self.memory.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
