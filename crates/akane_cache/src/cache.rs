//! Preview cache implementation.

use derive_getters::Getters;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Cached value with its insertion time.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.created_at.elapsed() > ttl)
    }
}

/// Configuration for the preview cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct PreviewCacheConfig {
    /// Seconds an entry stays valid; 0 keeps entries until evicted
    #[serde(default = "default_ttl_secs")]
    #[builder(default = "default_ttl_secs()")]
    ttl_secs: u64,

    /// Maximum number of cached entries
    #[serde(default = "default_max_size")]
    #[builder(default = "default_max_size()")]
    max_size: usize,

    /// Whether values are cached at all (claims still work when disabled)
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_ttl_secs() -> u64 {
    900 // 15 minutes
}

fn default_max_size() -> usize {
    256
}

fn default_enabled() -> bool {
    true
}

impl Default for PreviewCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

impl PreviewCacheConfig {
    fn ttl(&self) -> Option<Duration> {
        (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
    }
}

struct Inner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    access_order: VecDeque<K>,
    claims: HashSet<K>,
}

impl<K: Hash + Eq + Clone + Debug, V> Inner<K, V> {
    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
        self.access_order.push_back(key.clone());
    }

    fn remove(&mut self, key: &K) -> bool {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
        self.entries.remove(key).is_some()
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.pop_front() {
            tracing::debug!(key = ?key, "Evicting LRU preview entry");
            self.entries.remove(&key);
        }
    }
}

/// Process-wide cache of expensive per-message values.
///
/// The cache is a shared handle: clones refer to the same storage. Reading
/// and writing happen through a [`CacheSlot`], which [`PreviewCache::claim`]
/// hands out at most once per key. The slot's owner is therefore the only
/// party able to populate or clear that key, and dropping the slot clears it.
///
/// # Example
///
/// ```
/// use akane_cache::{PreviewCache, PreviewCacheConfig};
///
/// let cache: PreviewCache<u64, Vec<String>> = PreviewCache::new(PreviewCacheConfig::default());
///
/// let slot = cache.claim(42).expect("key is free");
/// assert!(cache.claim(42).is_none());
///
/// slot.insert(vec!["preview page".to_string()]);
/// assert_eq!(slot.get(), Some(vec!["preview page".to_string()]));
///
/// slot.release();
/// assert!(!cache.contains(&42));
/// assert!(cache.claim(42).is_some());
/// ```
pub struct PreviewCache<K, V> {
    config: PreviewCacheConfig,
    inner: Arc<Mutex<Inner<K, V>>>,
}

impl<K, V> Clone for PreviewCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Debug for PreviewCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<K, V> PreviewCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Create a new preview cache with configuration.
    pub fn new(config: PreviewCacheConfig) -> Self {
        tracing::debug!(
            ttl_secs = config.ttl_secs,
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new PreviewCache"
        );
        Self {
            config,
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                access_order: VecDeque::new(),
                claims: HashSet::new(),
            })),
        }
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &PreviewCacheConfig {
        &self.config
    }

    /// Claim exclusive ownership of `key`.
    ///
    /// Returns `None` if another slot for the same key is still alive.
    #[tracing::instrument(skip(self), fields(claims))]
    pub fn claim(&self, key: K) -> Option<CacheSlot<K, V>> {
        let mut inner = self.inner.lock();
        if !inner.claims.insert(key.clone()) {
            tracing::warn!("Preview cache key already claimed");
            return None;
        }
        tracing::Span::current().record("claims", inner.claims.len());
        Some(CacheSlot {
            key,
            cache: self.clone(),
            released: false,
        })
    }

    /// Whether `key` currently has a live owner.
    pub fn is_claimed(&self, key: &K) -> bool {
        self.inner.lock().claims.contains(key)
    }

    /// Whether a value is stored for `key` (expired entries count as absent).
    pub fn contains(&self, key: &K) -> bool {
        let ttl = self.config.ttl();
        self.inner
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(ttl))
    }

    /// Remove expired entries from the cache.
    pub fn cleanup_expired(&self) -> usize {
        let ttl = self.config.ttl();
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(ttl));
        let Inner {
            entries,
            access_order,
            ..
        } = &mut *inner;
        access_order.retain(|key| entries.contains_key(key));

        let removed = before - inner.entries.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = inner.entries.len(),
                "Cleaned up expired preview entries"
            );
        }
        removed
    }

    /// Drop every cached value. Claims are untouched.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let count = inner.entries.len();
        inner.entries.clear();
        inner.access_order.clear();
        tracing::info!(cleared = count, "Cleared preview cache");
    }

    /// Number of cached values.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether no values are cached.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    fn get(&self, key: &K) -> Option<V> {
        if !self.config.enabled {
            return None;
        }
        let ttl = self.config.ttl();
        let mut inner = self.inner.lock();
        let expired = inner.entries.get(key)?.is_expired(ttl);
        if expired {
            tracing::debug!(key = ?key, "Preview entry expired, removing");
            inner.remove(key);
            return None;
        }
        inner.touch(key);
        inner.entries.get(key).map(|entry| entry.value.clone())
    }

    fn insert(&self, key: &K, value: V) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }
        let mut inner = self.inner.lock();
        if inner.entries.len() >= self.config.max_size && !inner.entries.contains_key(key) {
            inner.evict_lru();
        }
        inner.touch(key);
        inner.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
        tracing::debug!(key = ?key, cache_size = inner.entries.len(), "Inserted preview entry");
    }

    fn evict(&self, key: &K) -> bool {
        self.inner.lock().remove(key)
    }

    fn release(&self, key: &K) {
        let mut inner = self.inner.lock();
        let had_value = inner.remove(key);
        inner.claims.remove(key);
        tracing::debug!(key = ?key, had_value, "Released preview cache slot");
    }
}

/// Exclusive handle on one cache key.
///
/// Only the holder can read, write or evict the key. Releasing the slot,
/// explicitly or by dropping it, removes the value and frees the key.
pub struct CacheSlot<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    key: K,
    cache: PreviewCache<K, V>,
    released: bool,
}

impl<K, V> CacheSlot<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// The key this slot owns.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Cached value, if present and not expired.
    pub fn get(&self) -> Option<V> {
        self.cache.get(&self.key)
    }

    /// Store a value for this key, evicting the least recently used entry if full.
    pub fn insert(&self, value: V) {
        self.cache.insert(&self.key, value);
    }

    /// Remove the cached value but keep ownership of the key.
    pub fn evict(&self) -> bool {
        self.cache.evict(&self.key)
    }

    /// Remove the value and give up ownership of the key.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.cache.release(&self.key);
        }
    }
}

impl<K, V> Drop for CacheSlot<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl<K, V> Debug for CacheSlot<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSlot")
            .field("key", &self.key)
            .field("released", &self.released)
            .finish()
    }
}
