//! Resolution caching.
//!
//! One cache per value kind, each keyed by [`CacheKey`] (consumer package,
//! theme package, resource name):
//!
//! | Kind              | Bound                | Caches absence |
//! |-------------------|----------------------|----------------|
//! | drawable          | LRU, `cache_capacity`| no             |
//! | color             | LRU, `cache_capacity`| no             |
//! | color state list  | LRU, `cache_capacity`| no             |
//! | typeface          | unbounded            | yes            |
//!
//! Drawables are cached as shared immutable templates; every hit hands out a
//! fresh [`Drawable`] with its own state.
//!
//! A `ThemeCache` may be shared between several engines, which is why the
//! consumer is part of every key.
//!
//! Every (consumer, theme) partition carries a generation that
//! [`ThemeCache::invalidate`] bumps. Resolution captures it before asking a
//! store and stores the result with the `put_*_if` methods, which drop the
//! write when the partition was invalidated in the meantime.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use horizon_theme_core::logging::targets;
use lru::LruCache;
use parking_lot::Mutex;

use crate::config::ThemeConfig;
use crate::resource::{Color, ColorStateList, Drawable, DrawableTemplate, Typeface};

/// Composite cache key.
///
/// Displays as `<consumer>_<theme>_<name>`. Partition matching compares the
/// consumer and theme fields, so theme ids that prefix each other never
/// collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    consumer: String,
    theme: String,
    name: String,
}

impl CacheKey {
    /// Create a key.
    pub fn new(consumer: impl Into<String>, theme: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            consumer: consumer.into(),
            theme: theme.into(),
            name: name.into(),
        }
    }

    /// Consuming package.
    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    /// Theme package.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Resource name (or font slot).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this key belongs to the (consumer, theme) partition.
    pub fn in_partition(&self, consumer: &str, theme: &str) -> bool {
        self.consumer == consumer && self.theme == theme
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.consumer, self.theme, self.name)
    }
}

/// Invalidation count of one (consumer, theme) partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Cache kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Typeface,
    Drawable,
    Color,
    ColorStateList,
}

/// Counters for one kind cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindStats {
    /// Entries currently cached.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that fell through to the stores.
    pub misses: u64,
}

impl KindStats {
    /// Hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Snapshot of all kind caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub typefaces: KindStats,
    pub drawables: KindStats,
    pub colors: KindStats,
    pub color_state_lists: KindStats,
}

impl CacheStats {
    /// Stats for one kind.
    pub fn kind(&self, kind: CacheKind) -> KindStats {
        match kind {
            CacheKind::Typeface => self.typefaces,
            CacheKind::Drawable => self.drawables,
            CacheKind::Color => self.colors,
            CacheKind::ColorStateList => self.color_state_lists,
        }
    }

    /// Total cached entries across kinds.
    pub fn total_entries(&self) -> usize {
        self.typefaces.entries
            + self.drawables.entries
            + self.colors.entries
            + self.color_state_lists.entries
    }
}

enum Storage<V> {
    Bounded(LruCache<CacheKey, V>),
    Unbounded(HashMap<CacheKey, V>),
}

/// A single kind cache with hit/miss accounting.
struct KindCache<V> {
    storage: Storage<V>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> KindCache<V> {
    fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            storage: Storage::Bounded(LruCache::new(capacity)),
            hits: 0,
            misses: 0,
        }
    }

    fn unbounded() -> Self {
        Self {
            storage: Storage::Unbounded(HashMap::new()),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up and mark as recently used.
    fn get(&mut self, key: &CacheKey) -> Option<V> {
        let found = match &mut self.storage {
            Storage::Bounded(lru) => lru.get(key).cloned(),
            Storage::Unbounded(map) => map.get(key).cloned(),
        };
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    fn put(&mut self, key: CacheKey, value: V) {
        match &mut self.storage {
            Storage::Bounded(lru) => {
                let replacing = lru.contains(&key);
                if let Some((evicted, _)) = lru.push(key, value)
                    && !replacing
                {
                    tracing::trace!(target: targets::CACHE, key = %evicted, "evicted");
                }
            }
            Storage::Unbounded(map) => {
                map.insert(key, value);
            }
        }
    }

    fn contains(&self, key: &CacheKey) -> bool {
        match &self.storage {
            Storage::Bounded(lru) => lru.contains(key),
            Storage::Unbounded(map) => map.contains_key(key),
        }
    }

    /// Scan every key and drop those in the partition.
    fn remove_partition(&mut self, consumer: &str, theme: &str) -> usize {
        match &mut self.storage {
            Storage::Bounded(lru) => {
                let doomed: Vec<CacheKey> = lru
                    .iter()
                    .map(|(key, _)| key)
                    .filter(|key| key.in_partition(consumer, theme))
                    .cloned()
                    .collect();
                for key in &doomed {
                    lru.pop(key);
                }
                doomed.len()
            }
            Storage::Unbounded(map) => {
                let before = map.len();
                map.retain(|key, _| !key.in_partition(consumer, theme));
                before - map.len()
            }
        }
    }

    fn len(&self) -> usize {
        match &self.storage {
            Storage::Bounded(lru) => lru.len(),
            Storage::Unbounded(map) => map.len(),
        }
    }

    fn clear(&mut self) {
        match &mut self.storage {
            Storage::Bounded(lru) => lru.clear(),
            Storage::Unbounded(map) => map.clear(),
        }
    }

    fn stats(&self) -> KindStats {
        KindStats {
            entries: self.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// The per-kind resolution caches.
///
/// Each kind is guarded by its own mutex; no lock is held across calls into
/// a resource store.
pub struct ThemeCache {
    typefaces: Mutex<KindCache<Option<Typeface>>>,
    drawables: Mutex<KindCache<Arc<DrawableTemplate>>>,
    colors: Mutex<KindCache<Color>>,
    color_state_lists: Mutex<KindCache<ColorStateList>>,
    generations: Mutex<HashMap<(String, String), Generation>>,
}

impl ThemeCache {
    /// Create caches bounded to `capacity` entries per bounded kind.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            typefaces: Mutex::new(KindCache::unbounded()),
            drawables: Mutex::new(KindCache::bounded(capacity)),
            colors: Mutex::new(KindCache::bounded(capacity)),
            color_state_lists: Mutex::new(KindCache::bounded(capacity)),
            generations: Mutex::new(HashMap::new()),
        }
    }

    /// Create caches sized from a configuration.
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self::new(config.cache_capacity)
    }

    /// Current generation of the (consumer, theme) partition.
    pub fn generation(&self, consumer: &str, theme: &str) -> Generation {
        self.generations
            .lock()
            .get(&(consumer.to_string(), theme.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Insert while holding the kind lock, unless the key's partition moved
    /// past `generation`.
    fn put_if<V: Clone>(
        &self,
        cache: &Mutex<KindCache<V>>,
        generation: Generation,
        key: CacheKey,
        value: V,
    ) -> bool {
        let mut cache = cache.lock();
        if self.generation(key.consumer(), key.theme()) != generation {
            tracing::debug!(target: targets::CACHE, %key, "partition invalidated during lookup, result not cached");
            return false;
        }
        cache.put(key, value);
        true
    }

    /// A fresh drawable instance built from the cached template.
    pub fn drawable(&self, key: &CacheKey) -> Option<Drawable> {
        self.drawables.lock().get(key).map(Drawable::new)
    }

    /// Cache a drawable template.
    pub fn put_drawable(&self, key: CacheKey, template: Arc<DrawableTemplate>) {
        self.drawables.lock().put(key, template);
    }

    /// Cache a drawable template resolved at `generation`.
    ///
    /// Returns `false` (and caches nothing) when the partition has been
    /// invalidated since.
    pub fn put_drawable_if(&self, generation: Generation, key: CacheKey, template: Arc<DrawableTemplate>) -> bool {
        self.put_if(&self.drawables, generation, key, template)
    }

    /// A cached color.
    pub fn color(&self, key: &CacheKey) -> Option<Color> {
        self.colors.lock().get(key)
    }

    /// Cache a color.
    pub fn put_color(&self, key: CacheKey, color: Color) {
        self.colors.lock().put(key, color);
    }

    /// Cache a color resolved at `generation`.
    pub fn put_color_if(&self, generation: Generation, key: CacheKey, color: Color) -> bool {
        self.put_if(&self.colors, generation, key, color)
    }

    /// A cached color state list.
    pub fn color_state_list(&self, key: &CacheKey) -> Option<ColorStateList> {
        self.color_state_lists.lock().get(key)
    }

    /// Cache a color state list.
    pub fn put_color_state_list(&self, key: CacheKey, list: ColorStateList) {
        self.color_state_lists.lock().put(key, list);
    }

    /// Cache a color state list resolved at `generation`.
    pub fn put_color_state_list_if(&self, generation: Generation, key: CacheKey, list: ColorStateList) -> bool {
        self.put_if(&self.color_state_lists, generation, key, list)
    }

    /// A cached typeface lookup.
    ///
    /// `None` means "never looked up"; `Some(None)` means the font is known
    /// to be missing.
    pub fn typeface(&self, key: &CacheKey) -> Option<Option<Typeface>> {
        self.typefaces.lock().get(key)
    }

    /// Cache a typeface lookup result, including absence.
    pub fn put_typeface(&self, key: CacheKey, typeface: Option<Typeface>) {
        self.typefaces.lock().put(key, typeface);
    }

    /// Cache a typeface lookup result obtained at `generation`.
    pub fn put_typeface_if(&self, generation: Generation, key: CacheKey, typeface: Option<Typeface>) -> bool {
        self.put_if(&self.typefaces, generation, key, typeface)
    }

    /// Whether any kind holds an entry for `key`.
    pub fn contains(&self, kind: CacheKind, key: &CacheKey) -> bool {
        match kind {
            CacheKind::Typeface => self.typefaces.lock().contains(key),
            CacheKind::Drawable => self.drawables.lock().contains(key),
            CacheKind::Color => self.colors.lock().contains(key),
            CacheKind::ColorStateList => self.color_state_lists.lock().contains(key),
        }
    }

    /// Drop every entry of the (consumer, theme) partition across all kinds.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&self, consumer: &str, theme: &str) -> usize {
        // Bump before removing so a racing put either lands first and is
        // removed, or sees the new generation.
        self.generations
            .lock()
            .entry((consumer.to_string(), theme.to_string()))
            .or_default()
            .0 += 1;
        let removed = self.typefaces.lock().remove_partition(consumer, theme)
            + self.drawables.lock().remove_partition(consumer, theme)
            + self.colors.lock().remove_partition(consumer, theme)
            + self.color_state_lists.lock().remove_partition(consumer, theme);
        tracing::debug!(target: targets::CACHE, consumer, theme, removed, "cache cleared for package");
        removed
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.typefaces.lock().clear();
        self.drawables.lock().clear();
        self.colors.lock().clear();
        self.color_state_lists.lock().clear();
    }

    /// Snapshot counters for every kind.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            typefaces: self.typefaces.lock().stats(),
            drawables: self.drawables.lock().stats(),
            colors: self.colors.lock().stats(),
            color_state_lists: self.color_state_lists.lock().stats(),
        }
    }
}

impl Default for ThemeCache {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl fmt::Debug for ThemeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeCache").field("stats", &self.stats()).finish()
    }
}
