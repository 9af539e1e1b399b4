//! This module provides a time-bounded cache for parsed calendars

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::calendar::Calendar;

/// How long a cached calendar stays fresh
fn default_ttl() -> Duration {
    Duration::minutes(5)
}

/// A cached parsed calendar and its creation timestamp.
///
/// Entries are immutable: a stale entry is superseded by inserting a new one
/// under the same key, never updated in place.
pub struct CacheEntry {
    calendar: Arc<Calendar>,
    timestamp: DateTime<Utc>,
}

impl CacheEntry {
    fn new(calendar: Arc<Calendar>) -> Self {
        Self {
            calendar,
            timestamp: Utc::now(),
        }
    }

    /// Time elapsed since this entry was created
    pub fn age(&self) -> Duration {
        Utc::now() - self.timestamp
    }
}

/// Decides when a cached entry is too old to be served.
///
/// Staleness is the only eviction the cache knows about; keeping the decision
/// behind this trait means a size bound could be added without touching the
/// fetch or filter code.
pub trait ExpiryPolicy: Send + Sync {
    fn is_expired(&self, entry: &CacheEntry) -> bool;
}

/// Time-based expiry: entries older than the TTL are treated as absent
pub struct TtlExpiry {
    ttl: Duration,
}

impl TtlExpiry {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl ExpiryPolicy for TtlExpiry {
    fn is_expired(&self, entry: &CacheEntry) -> bool {
        entry.age() >= self.ttl
    }
}

/// A cache of parsed calendars, keyed by target and query parameters.
///
/// Lookups share a reader lock; inserts take the writer lock. Stale entries
/// are never served: they are reported as absent and stay in the map until a
/// refetch overwrites them. Nothing is ever evicted by size.
pub struct CalendarCache {
    policy: Box<dyn ExpiryPolicy>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for CalendarCache {
    fn default() -> Self {
        Self::new(TtlExpiry::new(default_ttl()))
    }
}

impl CalendarCache {
    pub fn new<P: ExpiryPolicy + 'static>(policy: P) -> Self {
        Self {
            policy: Box::new(policy),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry, returning the shared calendar and the entry age.
    ///
    /// Stale entries are treated as absent.
    pub fn lookup(&self, key: &str) -> Option<(Arc<Calendar>, Duration)> {
        // A poisoned lock only means some other thread panicked while holding
        // it; the map itself is still usable.
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        if self.policy.is_expired(entry) {
            return None;
        }
        Some((entry.calendar.clone(), entry.age()))
    }

    /// Insert or overwrite the entry for `key`, timestamped now
    pub fn insert(&self, key: String, calendar: Arc<Calendar>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, CacheEntry::new(calendar));
    }
}

/// Derive the cache key for a target and its query parameters.
///
/// The parameters are canonically encoded (stable sort by key, then
/// form-urlencoded), so two logically identical parameter sets always map to
/// the same key.
pub fn cache_key(target: &str, params: &[(String, String)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish();

    format!("{}:{}", target, encoded)
}
