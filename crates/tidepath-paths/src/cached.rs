//! Memoizing wrapper for any pathfinder.

use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use log::{debug, trace};
use tidepath_core::{Point, Range};

use crate::cache::PathCache;
use crate::config::PathConfig;
use crate::path::{CellSet, Path, PathOutcome};
use crate::traits::{GridPathfinder, Pathfinder};

/// Counters describing how a [`Cached`] pathfinder has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Route queries answered from the cache.
    pub hits: u64,
    /// Route queries passed to the wrapped pathfinder.
    pub misses: u64,
    /// Reachability sets computed by the wrapped pathfinder.
    pub reachability_computations: u64,
    /// Stored (start, end) entries.
    pub routes: usize,
    /// Distinct reachability sets held.
    pub interned_sets: usize,
}

type Memo<K> = DashMap<K, Arc<OnceLock<CellSet>>>;

/// Wraps a pathfinder with a [`PathCache`].
///
/// A query whose outcome is known (found or impossible) never reaches the
/// wrapped pathfinder. Otherwise the wrapped answer is stored, with all of
/// its suffixes, and returned.
///
/// When the wrapped pathfinder knows the grid, the two reachability queries
/// are memoized too. Each key is computed at most once even under
/// contention, and equal results share one allocation.
pub struct Cached<P> {
    inner: P,
    paths: PathCache,
    water_cells: Memo<Point>,
    water_neighbours: Memo<(Point, i32)>,
    interned: DashMap<CellSet, ()>,
    hits: AtomicU64,
    misses: AtomicU64,
    reach_computations: AtomicU64,
}

impl<P: Pathfinder> Cached<P> {
    pub fn new(inner: P) -> Self {
        Self::with_config(inner, &PathConfig::default())
    }

    pub fn with_config(inner: P, config: &PathConfig) -> Self {
        Self {
            inner,
            paths: PathCache::new(config.reverse_reuse),
            water_cells: DashMap::new(),
            water_neighbours: DashMap::new(),
            interned: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            reach_computations: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// The route store.
    pub fn paths(&self) -> &PathCache {
        &self.paths
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reachability_computations: self.reach_computations.load(Ordering::Relaxed),
            routes: self.paths.len(),
            interned_sets: self.interned.len(),
        }
    }

    /// The shared instance equal to `cells`.
    fn intern(&self, cells: CellSet) -> CellSet {
        self.interned.entry(cells).or_insert(()).key().clone()
    }

    /// Look `key` up in `memo`, running `compute` once if it is missing.
    ///
    /// The per-key cell is created under the map's lock but filled outside
    /// it, so a long computation only blocks callers asking for the same
    /// key. If `compute` panics the cell stays empty and the next caller
    /// retries.
    fn memoize<K: Eq + Hash>(
        &self,
        memo: &Memo<K>,
        key: K,
        compute: impl FnOnce() -> CellSet,
    ) -> CellSet {
        let cell = Arc::clone(&memo.entry(key).or_default());
        cell.get_or_init(|| {
            self.reach_computations.fetch_add(1, Ordering::Relaxed);
            self.intern(compute())
        })
        .clone()
    }
}

impl<P: Pathfinder> Pathfinder for Cached<P> {
    fn path(&self, start: Point, end: Point) -> Option<Path> {
        match self.paths.get(start, end) {
            PathOutcome::Found(path) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!("cached route {start} -> {end}");
                Some(path)
            }
            PathOutcome::Impossible => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!("cached impossibility {start} -> {end}");
                None
            }
            PathOutcome::Unknown => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                match self.inner.path(start, end) {
                    Some(path) => Some(self.paths.put_path(path)),
                    None => {
                        self.paths.put(start, end, PathOutcome::Impossible);
                        None
                    }
                }
            }
        }
    }
}

impl<P: GridPathfinder> GridPathfinder for Cached<P> {
    fn range(&self) -> Range {
        self.inner.range()
    }

    fn is_water(&self, p: Point) -> bool {
        self.inner.is_water(p)
    }

    fn is_navigable(&self, p: Point) -> bool {
        self.inner.is_navigable(p)
    }

    fn accessible_water_cells(&self, start: Point) -> CellSet {
        self.memoize(&self.water_cells, start, || {
            debug!("computing water reachable from {start}");
            self.inner.accessible_water_cells(start)
        })
    }

    fn accessible_water_neighbours(&self, start: Point, radius: i32) -> CellSet {
        let radius = radius.max(0);
        self.memoize(&self.water_neighbours, (start, radius), || {
            debug!("computing water reachable from {start} within {radius}");
            self.inner.accessible_water_neighbours(start, radius)
        })
    }
}
