//! Cache entry and durable snapshot (de)serialization

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Logo entries expire 24 hours after they were written
pub const LOGO_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A cached logo URL with its creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Resolved logo URL (may be empty)
    pub url: String,

    /// Creation time in epoch milliseconds
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(url: impl Into<String>, timestamp: i64) -> Self {
        Self {
            url: url.into(),
            timestamp,
        }
    }

    /// Valid iff `now - timestamp < ttl`
    pub fn is_fresh(&self, now_millis: i64, ttl: Duration) -> bool {
        now_millis.saturating_sub(self.timestamp) < ttl.as_millis() as i64
    }
}

/// Full durable snapshot: normalized team name -> entry
pub type Snapshot = BTreeMap<String, CacheEntry>;

/// Parse a durable snapshot, dropping anything that is not a valid entry.
///
/// Never fails: unparsable content yields an empty snapshot, and individual
/// records with the wrong shape are skipped.
pub fn parse_snapshot(raw: &str) -> Snapshot {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Logo cache snapshot is not valid JSON, treating as empty");
            return Snapshot::new();
        }
    };

    let serde_json::Value::Object(map) = value else {
        warn!("Logo cache snapshot is not a JSON object, treating as empty");
        return Snapshot::new();
    };

    let mut snapshot = Snapshot::new();
    for (key, record) in map {
        match serde_json::from_value::<CacheEntry>(record) {
            Ok(entry) => {
                snapshot.insert(key, entry);
            }
            Err(e) => {
                debug!(key = %key, error = %e, "Skipping malformed logo cache record");
            }
        }
    }
    snapshot
}
