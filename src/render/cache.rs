//! In-memory render cache keyed by render configuration and region.
//!
//! Each key owns a slot with its own lock, so two requests for the same key
//! never render concurrently: the second waits and then reuses the first
//! result. Requests for different keys only share the short-lived index lock.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::settings::RenderConfig;
use crate::world::RegionPos;

/// Default maximum number of cached tiles
pub const DEFAULT_CACHE_SIZE: usize = 256;

/// Cache key: the full render configuration plus the region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub config: RenderConfig,
    pub pos: RegionPos,
}

impl TileKey {
    pub fn new(config: RenderConfig, pos: RegionPos) -> Self {
        Self { config, pos }
    }
}

/// Cache statistics for monitoring
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
    /// Number of tiles currently held or being rendered
    pub tiles: usize,
}

impl CacheStats {
    /// Hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Hits: {} | Misses: {} | Rate: {:.1}% | Tiles: {} | Evicted: {}",
            self.hits,
            self.misses,
            self.hit_rate() * 100.0,
            self.tiles,
            self.evictions
        )
    }
}

type Slot<T> = Arc<Mutex<Option<Arc<T>>>>;

struct CacheIndex<T> {
    slots: HashMap<TileKey, Slot<T>>,
    /// LRU order (most recent at back)
    lru_order: VecDeque<TileKey>,
    stats: CacheStats,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// LRU cache of rendered tiles.
pub struct RenderCache<T> {
    index: Mutex<CacheIndex<T>>,
    max_tiles: usize,
}

impl<T> RenderCache<T> {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_CACHE_SIZE)
    }

    pub fn with_size(max_tiles: usize) -> Self {
        Self {
            index: Mutex::new(CacheIndex {
                slots: HashMap::with_capacity(max_tiles),
                lru_order: VecDeque::with_capacity(max_tiles),
                stats: CacheStats::default(),
            }),
            max_tiles: max_tiles.max(1),
        }
    }

    /// Find or create the slot for `key` and mark it most recently used.
    ///
    /// Only idle slots are evicted. A slot still held by a render or a waiter
    /// stays in the index, so the cache may run over `max_tiles` until those
    /// requests finish.
    fn slot(&self, key: &TileKey) -> Slot<T> {
        let mut guard = lock(&self.index);
        let index = &mut *guard;
        index.lru_order.retain(|k| k != key);

        if let Some(slot) = index.slots.get(key) {
            let slot = Arc::clone(slot);
            index.lru_order.push_back(key.clone());
            return slot;
        }

        while index.slots.len() >= self.max_tiles {
            let idle = index
                .lru_order
                .iter()
                .position(|k| index.slots.get(k).map_or(true, |slot| Arc::strong_count(slot) == 1));
            let Some(old_key) = idle.and_then(|i| index.lru_order.remove(i)) else {
                break;
            };
            if index.slots.remove(&old_key).is_some() {
                index.stats.evictions += 1;
                log::debug!("Evicted tile {:?} ({:016x})", old_key.pos, old_key.config.fingerprint());
            }
        }

        let slot: Slot<T> = Arc::new(Mutex::new(None));
        index.slots.insert(key.clone(), Arc::clone(&slot));
        index.lru_order.push_back(key.clone());
        slot
    }

    /// Drop an empty slot after a failed render, unless another request is
    /// already waiting on it.
    fn discard_failed(&self, key: &TileKey, slot: &Slot<T>) {
        let mut index = lock(&self.index);
        let ours = index
            .slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(slot) == 2);
        if ours {
            index.slots.remove(key);
            index.lru_order.retain(|k| k != key);
        }
    }

    /// Cached tile for `key`, without rendering.
    pub fn get(&self, key: &TileKey) -> Option<Arc<T>> {
        let slot = lock(&self.index).slots.get(key).cloned()?;
        let tile = lock(&slot).clone();
        tile
    }

    /// Cached tile for `key`, rendering it with `render` on a miss.
    ///
    /// A failed render is not cached; the next request tries again.
    pub fn get_or_render<E, F>(&self, key: TileKey, render: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let slot = self.slot(&key);
        let mut guard = lock(&slot);

        if let Some(tile) = guard.as_ref() {
            lock(&self.index).stats.hits += 1;
            return Ok(Arc::clone(tile));
        }

        lock(&self.index).stats.misses += 1;
        match render() {
            Ok(tile) => {
                let tile = Arc::new(tile);
                *guard = Some(Arc::clone(&tile));
                Ok(tile)
            }
            Err(e) => {
                self.discard_failed(&key, &slot);
                Err(e)
            }
        }
    }

    /// Drop every tile rendered with `config`.
    pub fn invalidate_config(&self, config: &RenderConfig) -> usize {
        let mut index = lock(&self.index);
        let before = index.slots.len();
        index.slots.retain(|key, _| &key.config != config);
        index.lru_order.retain(|key| &key.config != config);
        before - index.slots.len()
    }

    pub fn clear(&self) {
        let mut index = lock(&self.index);
        index.slots.clear();
        index.lru_order.clear();
    }

    pub fn len(&self) -> usize {
        lock(&self.index).slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let index = lock(&self.index);
        CacheStats {
            tiles: index.slots.len(),
            ..index.stats
        }
    }
}

impl<T> Default for RenderCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
