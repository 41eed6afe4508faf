//! Three-state memo of (start, end) queries.

use dashmap::DashMap;
use log::{trace, warn};
use tidepath_core::Point;

use crate::path::{Path, PathOutcome};

/// What the cache stores. `Unknown` is the absence of an entry and has no
/// representation here.
#[derive(Debug, Clone)]
enum Entry {
    Found(Path),
    Impossible,
}

impl From<Entry> for PathOutcome {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Found(p) => PathOutcome::Found(p),
            Entry::Impossible => PathOutcome::Impossible,
        }
    }
}

/// Concurrent store of path outcomes keyed by `(start, end)`.
///
/// Storing a path also stores every suffix of it: the tail of a route is a
/// route between its own endpoints. When reverse reuse is on, a miss on
/// `(a, b)` is answered by reversing a stored `(b, a)` path. Impossibility
/// is never inferred from the reverse direction.
///
/// Entries are never replaced. When two writers race on the same key, the
/// first stored outcome wins and both observe it.
///
/// The cache assumes static terrain and has no invalidation.
#[derive(Debug)]
pub struct PathCache {
    entries: DashMap<(Point, Point), Entry>,
    reverse_reuse: bool,
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PathCache {
    /// An empty cache. `reverse_reuse` should only be on for grids where
    /// travel is symmetric.
    pub fn new(reverse_reuse: bool) -> Self {
        Self {
            entries: DashMap::new(),
            reverse_reuse,
        }
    }

    pub fn reverse_reuse(&self) -> bool {
        self.reverse_reuse
    }

    /// What is known about the route from `start` to `end`.
    pub fn get(&self, start: Point, end: Point) -> PathOutcome {
        if let Some(entry) = self.entries.get(&(start, end)) {
            return entry.value().clone().into();
        }
        if !self.reverse_reuse {
            return PathOutcome::Unknown;
        }

        let reverse = match self.entries.get(&(end, start)).as_deref() {
            Some(Entry::Found(p)) => Some(p.reversed()),
            _ => None,
        };
        match reverse {
            Some(path) => {
                trace!("route {start} -> {end} derived from its reverse");
                self.insert(start, end, Entry::Found(path)).into()
            }
            None => PathOutcome::Unknown,
        }
    }

    /// Record an outcome for `(start, end)`. Recording `Unknown` does
    /// nothing. Returns what the cache holds afterwards.
    ///
    /// # Panics
    ///
    /// If a found path does not run from `start` to `end`.
    pub fn put(&self, start: Point, end: Point, outcome: PathOutcome) -> PathOutcome {
        let entry = match outcome {
            PathOutcome::Found(path) => {
                assert!(
                    path.start() == start && path.end() == end,
                    "path {path} does not run from {start} to {end}"
                );
                Entry::Found(path)
            }
            PathOutcome::Impossible => Entry::Impossible,
            PathOutcome::Unknown => return self.get(start, end),
        };
        self.insert(start, end, entry).into()
    }

    /// Record a found path and each of its suffixes. Returns the path the
    /// cache holds for the full route.
    pub fn put_path(&self, path: Path) -> Path {
        let key = (path.start(), path.end());
        for tail in path.suffixes().skip(1) {
            self.insert(tail.start(), tail.end(), Entry::Found(tail));
        }
        match self.insert(key.0, key.1, Entry::Found(path.clone())) {
            Entry::Found(stored) => stored,
            Entry::Impossible => {
                warn!("route {path} contradicts a stored impossibility");
                path
            }
        }
    }

    /// Number of stored (start, end) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&self, start: Point, end: Point, entry: Entry) -> Entry {
        self.entries
            .entry((start, end))
            .or_insert(entry)
            .value()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(v: &[(i32, i32)]) -> Path {
        Path::new(v.iter().map(|&p| Point::from(p)).collect())
    }

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn empty_cache_knows_nothing() {
        let cache = PathCache::default();
        assert_eq!(cache.get(p(0, 0), p(1, 1)), PathOutcome::Unknown);
        assert!(cache.is_empty());
    }

    #[test]
    fn impossibility_is_remembered() {
        let cache = PathCache::default();
        cache.put(p(0, 0), p(3, 3), PathOutcome::Impossible);
        assert_eq!(cache.get(p(0, 0), p(3, 3)), PathOutcome::Impossible);
        // Not inferred for the other direction.
        assert_eq!(cache.get(p(3, 3), p(0, 0)), PathOutcome::Unknown);
    }

    #[test]
    fn unknown_is_not_stored() {
        let cache = PathCache::default();
        let stored = cache.put(p(0, 0), p(1, 0), PathOutcome::Unknown);
        assert_eq!(stored, PathOutcome::Unknown);
        assert!(cache.is_empty());
    }

    #[test]
    fn suffixes_are_stored() {
        let cache = PathCache::default();
        let route = path(&[(0, 0), (1, 0), (2, 1), (3, 2)]);
        cache.put_path(route.clone());
        assert_eq!(cache.len(), 4);

        assert_eq!(cache.get(p(0, 0), p(3, 2)), PathOutcome::Found(route.clone()));
        let tail = cache.get(p(1, 0), p(3, 2));
        assert_eq!(tail, PathOutcome::Found(path(&[(1, 0), (2, 1), (3, 2)])));
        assert!(tail.path().unwrap().shares_storage(&route));
        let here = cache.get(p(3, 2), p(3, 2));
        assert_eq!(here, PathOutcome::Found(Path::single(p(3, 2))));
        // Prefixes are not routes to the stored end.
        assert_eq!(cache.get(p(0, 0), p(2, 1)), PathOutcome::Unknown);
    }

    #[test]
    fn reverse_is_derived_and_stored() {
        let cache = PathCache::default();
        let route = path(&[(0, 0), (1, 1), (2, 1)]);
        cache.put_path(route.clone());
        let before = cache.len();

        assert_eq!(cache.get(p(2, 1), p(0, 0)), PathOutcome::Found(route.reversed()));
        assert_eq!(cache.len(), before + 1);
        // Reverse of a stored suffix works too.
        let back = cache.get(p(2, 1), p(1, 1));
        assert_eq!(back, PathOutcome::Found(path(&[(2, 1), (1, 1)])));
    }

    #[test]
    fn reverse_reuse_can_be_disabled() {
        let cache = PathCache::new(false);
        cache.put_path(path(&[(0, 0), (1, 0)]));
        assert_eq!(cache.get(p(1, 0), p(0, 0)), PathOutcome::Unknown);
    }

    #[test]
    fn first_writer_wins() {
        let cache = PathCache::default();
        let a = path(&[(0, 0), (1, 0), (2, 0)]);
        let b = path(&[(0, 0), (1, 1), (2, 0)]);
        let first = cache.put(p(0, 0), p(2, 0), PathOutcome::Found(a.clone()));
        assert_eq!(first, PathOutcome::Found(a.clone()));
        let second = cache.put(p(0, 0), p(2, 0), PathOutcome::Found(b.clone()));
        assert_eq!(second, PathOutcome::Found(a.clone()));
        assert_eq!(cache.put_path(b), a);
    }

    #[test]
    #[should_panic(expected = "does not run from")]
    fn mismatched_endpoints_panic() {
        let cache = PathCache::default();
        cache.put(p(0, 0), p(5, 5), PathOutcome::Found(path(&[(0, 0), (1, 0)])));
    }

    #[test]
    fn concurrent_writers_converge() {
        let cache = PathCache::default();
        let routes: Vec<Path> = (0..8)
            .map(|i| path(&[(0, 0), (1, i % 3 - 1), (2, 0)]))
            .collect();
        let stored: Vec<Path> = std::thread::scope(|s| {
            let handles: Vec<_> = routes
                .iter()
                .map(|r| s.spawn(|| cache.put_path(r.clone())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(stored.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.get(p(0, 0), p(2, 0)).path(), Some(&stored[0]));
    }
}
