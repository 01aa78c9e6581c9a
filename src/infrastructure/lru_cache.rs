use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Default number of distinct keys kept before the least recently used is evicted.
pub const DEFAULT_CAPACITY: usize = 128;

struct Slot<V> {
    cell: Arc<OnceCell<V>>,
    last_used: u64,
}

struct LruState<K, V> {
    slots: HashMap<K, Slot<V>>,
    clock: u64,
}

impl<K: Eq + Hash + Clone, V> LruState<K, V> {
    fn touch(&mut self, key: K) -> Arc<OnceCell<V>> {
        self.clock += 1;
        let now = self.clock;
        let slot = self.slots.entry(key).or_insert_with(|| Slot {
            cell: Arc::new(OnceCell::new()),
            last_used: now,
        });
        slot.last_used = now;
        Arc::clone(&slot.cell)
    }

    fn evict_over(&mut self, capacity: usize) {
        while self.slots.len() > capacity {
            let Some(oldest) = self
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            self.slots.remove(&oldest);
        }
    }
}

/// A bounded, thread-safe memo table with least-recently-used eviction.
///
/// Each key owns a [`OnceCell`], so concurrent callers asking for the same
/// key await a single computation while other keys proceed independently.
/// The bookkeeping lock is never held across a computation.
pub struct LruCache<K, V> {
    state: Mutex<LruState<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty cache holding at most `capacity` keys (minimum one).
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(LruState {
                slots: HashMap::new(),
                clock: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached value for `key`, running `compute` on a miss.
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let cell = {
            let mut state = self.state.lock().await;
            let cell = state.touch(key);
            state.evict_over(self.capacity);
            cell
        };

        cell.get_or_init(compute).await.clone()
    }

    /// Cached value for `key` if one has been computed. Counts as a use.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().await;
        state.clock += 1;
        let now = state.clock;
        let slot = state.slots.get_mut(key)?;
        slot.last_used = now;
        slot.cell.get().cloned()
    }

    pub async fn contains(&self, key: &K) -> bool {
        let state = self.state.lock().await;
        state
            .slots
            .get(key)
            .is_some_and(|slot| slot.cell.initialized())
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.slots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_get_or_compute_memoizes() {
        let cache: LruCache<&str, u32> = LruCache::new(4);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_compute("a", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    7
                })
                .await;
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_evicts_least_recently_used() {
        let cache: LruCache<u32, u32> = LruCache::new(2);

        cache.get_or_compute(1, || async { 10 }).await;
        cache.get_or_compute(2, || async { 20 }).await;
        // Touch 1 so 2 becomes the oldest
        assert_eq!(cache.get(&1).await, Some(10));
        cache.get_or_compute(3, || async { 30 }).await;

        assert!(cache.contains(&1).await);
        assert!(!cache.contains(&2).await);
        assert!(cache.contains(&3).await);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_evicted_key_is_recomputed() {
        let cache: LruCache<u32, u32> = LruCache::new(1);
        let calls = AtomicUsize::new(0);

        let compute = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            1
        };
        cache.get_or_compute(1, compute).await;
        cache.get_or_compute(2, || async { 2 }).await;
        cache.get_or_compute(1, compute).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_capacity_holds_one_entry() {
        let cache: LruCache<u32, u32> = LruCache::new(0);
        assert_eq!(cache.capacity(), 1);

        cache.get_or_compute(1, || async { 1 }).await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_same_key_computes_once() {
        let cache: Arc<LruCache<&'static str, u32>> = Arc::new(LruCache::new(8));
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_compute("route", || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                            42
                        })
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_on_missing_key() {
        let cache: LruCache<u32, u32> = LruCache::default();
        assert_eq!(cache.get(&9).await, None);
        assert!(cache.is_empty().await);
    }
}
