use super::codec::{decode_expiry, decode_records, encode_entry};
use super::key::cache_key;
use dashmap::DashMap;
use dnsbox_application::ports::CacheStatsPort;
use dnsbox_domain::CacheStats;
use hickory_proto::rr::{Record, RecordType};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Answer cache keyed by `name|qtype`.
///
/// Values are stored encoded (see [`super::codec`]). Expired entries are
/// evicted lazily by the first read that observes them; there is no sweeper.
pub struct ResponseCache {
    entries: DashMap<String, Vec<u8>, FxBuildHasher>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, name: &str, record_type: RecordType) -> Option<Vec<Record>> {
        let key = cache_key(name, record_type);
        let now = now_secs();

        let lookup = self.entries.get(&key).map(|entry| {
            let buf = entry.value();
            match decode_expiry(buf) {
                Some(expires_at) if now <= expires_at => decode_records(buf),
                _ => Vec::new(),
            }
        });

        match lookup {
            Some(records) if !records.is_empty() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, records = records.len(), "Cache hit");
                Some(records)
            }
            Some(_) => {
                self.entries.remove_if(&key, |_, buf| {
                    decode_expiry(buf).map_or(true, |expires_at| now > expires_at)
                        || decode_records(buf).is_empty()
                });
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache entry expired");
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores `records` for `ttl_secs`. Empty record sets are never stored.
    pub fn set(&self, name: &str, record_type: RecordType, records: &[Record], ttl_secs: u32) {
        self.set_with_expiry(name, record_type, records, now_secs() + u64::from(ttl_secs));
    }

    /// Caches the answers matching `record_type` for their minimum TTL.
    pub fn store_answers(&self, name: &str, record_type: RecordType, answers: &[Record]) {
        let matching: Vec<Record> = answers
            .iter()
            .filter(|r| r.record_type() == record_type)
            .cloned()
            .collect();

        let Some(min_ttl) = matching.iter().map(Record::ttl).min() else {
            return;
        };

        self.set(name, record_type, &matching, min_ttl);
    }

    pub(crate) fn set_with_expiry(
        &self,
        name: &str,
        record_type: RecordType,
        records: &[Record],
        expires_at: u64,
    ) {
        if records.is_empty() {
            return;
        }
        let key = cache_key(name, record_type);
        debug!(key = %key, records = records.len(), expires_at, "Caching answer");
        self.entries.insert(key, encode_entry(expires_at, records));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStatsPort for ResponseCache {
    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
