use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;
use tracing::debug;

/// Short-lived cache of successful GET response bodies, keyed by path and
/// query string. Any mutation clears it wholesale because the backend
/// recomputes aggregate counts across resources.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, CachedBody>>,
}

#[derive(Debug, Clone)]
struct CachedBody {
    body: String,
    stored_at: Instant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        let mut entries = self.entries.lock().ok()?;
        let expired = match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => {
                debug!(key, "response cache hit");
                return Some(entry.body.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub fn put(&self, key: String, body: String) {
        if !self.is_enabled() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(
                key,
                CachedBody {
                    body,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            if !entries.is_empty() {
                debug!(entries = entries.len(), "response cache cleared");
            }
            entries.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.entries
            .lock()
            .map(|entries| CacheStats {
                entries: entries.len(),
                capacity: entries.cap().get(),
            })
            .unwrap_or_default()
    }
}
