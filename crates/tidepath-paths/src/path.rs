//! Route values returned by pathfinders.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use tidepath_core::{Point, SeaGrid};

/// An immutable, non-empty sequence of cells from a start to an end.
///
/// Cloning is cheap and clones may be shared across threads. Suffixes share
/// storage with the path they were cut from. Derefs to `[Point]`.
#[derive(Clone)]
pub struct Path {
    cells: Arc<[Point]>,
    offset: usize,
}

impl Path {
    /// Build a path from its cells, start first.
    ///
    /// # Panics
    ///
    /// If `cells` is empty.
    pub fn new(cells: Vec<Point>) -> Self {
        assert!(!cells.is_empty(), "a path has at least one cell");
        Self {
            cells: cells.into(),
            offset: 0,
        }
    }

    /// The one-cell path from `p` to itself.
    pub fn single(p: Point) -> Self {
        Self::new(vec![p])
    }

    /// The cells of the path, start first.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells[self.offset..]
    }

    /// First cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.cells[self.offset]
    }

    /// Last cell.
    #[inline]
    pub fn end(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves, one less than the number of cells.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells().len() - 1
    }

    /// The tail of the path starting at its `i`-th cell, or `None` if `i` is
    /// past the end. Shares storage with `self`.
    pub fn suffix(&self, i: usize) -> Option<Path> {
        (i < self.cells().len()).then(|| Path {
            cells: Arc::clone(&self.cells),
            offset: self.offset + i,
        })
    }

    /// Every suffix, longest (the path itself) first.
    pub fn suffixes(&self) -> impl Iterator<Item = Path> + '_ {
        (0..self.cells().len()).filter_map(|i| self.suffix(i))
    }

    /// The same cells walked from end to start.
    pub fn reversed(&self) -> Path {
        Path::new(self.cells().iter().rev().copied().collect())
    }

    /// Total travel distance along the path as measured by `grid`.
    pub fn cost(&self, grid: &impl SeaGrid) -> f64 {
        self.cells()
            .windows(2)
            .map(|w| grid.distance(w[0], w[1]))
            .sum()
    }

    /// Whether both paths are views of the same allocation.
    pub fn shares_storage(&self, other: &Path) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

impl Deref for Path {
    type Target = [Point];

    #[inline]
    fn deref(&self) -> &[Point] {
        self.cells()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.cells() == other.cells()
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells().hash(state);
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.cells()).finish()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.cells().iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.cells().to_vec()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<Point>::deserialize(deserializer)?;
        if cells.is_empty() {
            return Err(serde::de::Error::invalid_length(0, &"at least one cell"));
        }
        Ok(Path::new(cells))
    }
}

/// What is known about a (start, end) query.
///
/// `Impossible` is knowledge: no route exists and no search is needed.
/// `Unknown` means nobody has asked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Found(Path),
    Impossible,
    Unknown,
}

impl PathOutcome {
    /// Whether the outcome settles the query.
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, PathOutcome::Unknown)
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathOutcome::Found(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Option<Path>> for PathOutcome {
    /// A pathfinder's answer: `Some` is `Found`, `None` is `Impossible`.
    fn from(found: Option<Path>) -> Self {
        match found {
            Some(p) => PathOutcome::Found(p),
            None => PathOutcome::Impossible,
        }
    }
}

/// An immutable, sorted set of cells.
///
/// Equal sets compare and hash alike regardless of allocation, which is what
/// lets caches intern them.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct CellSet(Arc<[Point]>);

impl CellSet {
    /// Whether `p` is in the set.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.0.binary_search(&p).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    /// Whether both sets are the same allocation.
    pub fn ptr_eq(&self, other: &CellSet) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<Point> for CellSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut cells: Vec<Point> = iter.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        CellSet(cells.into())
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}
