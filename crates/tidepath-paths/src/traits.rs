use std::sync::Arc;

use tidepath_core::{Point, Range};

use crate::path::{CellSet, Path};

/// Answers "can an agent travel from `start` to `end`, and through which
/// cells?".
pub trait Pathfinder: Send + Sync {
    /// A route from `start` to `end`, both included, or `None` if the
    /// pathfinder certifies there is none. A cell routes to itself in one
    /// cell.
    ///
    /// # Panics
    ///
    /// Implementations panic when an endpoint lies outside the grid.
    fn path(&self, start: Point, end: Point) -> Option<Path>;
}

/// A pathfinder that also owns grid knowledge.
///
/// The bulk queries have default implementations that test every candidate
/// water cell with [`path`](Pathfinder::path); implementors with a cheaper
/// reachability test override them.
pub trait GridPathfinder: Pathfinder {
    /// The grid extent.
    fn range(&self) -> Range;

    fn is_water(&self, p: Point) -> bool;

    /// Water or port.
    fn is_navigable(&self, p: Point) -> bool;

    /// Every water cell reachable from `start`.
    fn accessible_water_cells(&self, start: Point) -> CellSet {
        self.range()
            .iter()
            .filter(|&p| self.is_water(p) && self.path(start, p).is_some())
            .collect()
    }

    /// The water cells within Chebyshev distance `radius` of `start`
    /// (`start` included) that are reachable from `start`.
    fn accessible_water_neighbours(&self, start: Point, radius: i32) -> CellSet {
        self.range()
            .around(start, radius)
            .iter()
            .filter(|&p| self.is_water(p) && self.path(start, p).is_some())
            .collect()
    }
}

#[track_caller]
pub(crate) fn assert_in_range(range: Range, p: Point) {
    assert!(range.contains(p), "cell {p} is outside the grid {range}");
}

// ---------------------------------------------------------------------------
// Forwarding impls
// ---------------------------------------------------------------------------

impl<P: Pathfinder + ?Sized> Pathfinder for Arc<P> {
    fn path(&self, start: Point, end: Point) -> Option<Path> {
        (**self).path(start, end)
    }
}

impl<P: Pathfinder + ?Sized> Pathfinder for Box<P> {
    fn path(&self, start: Point, end: Point) -> Option<Path> {
        (**self).path(start, end)
    }
}

impl<P: GridPathfinder + ?Sized> GridPathfinder for Arc<P> {
    fn range(&self) -> Range {
        (**self).range()
    }
    fn is_water(&self, p: Point) -> bool {
        (**self).is_water(p)
    }
    fn is_navigable(&self, p: Point) -> bool {
        (**self).is_navigable(p)
    }
    fn accessible_water_cells(&self, start: Point) -> CellSet {
        (**self).accessible_water_cells(start)
    }
    fn accessible_water_neighbours(&self, start: Point, radius: i32) -> CellSet {
        (**self).accessible_water_neighbours(start, radius)
    }
}

impl<P: GridPathfinder + ?Sized> GridPathfinder for Box<P> {
    fn range(&self) -> Range {
        (**self).range()
    }
    fn is_water(&self, p: Point) -> bool {
        (**self).is_water(p)
    }
    fn is_navigable(&self, p: Point) -> bool {
        (**self).is_navigable(p)
    }
    fn accessible_water_cells(&self, start: Point) -> CellSet {
        (**self).accessible_water_cells(start)
    }
    fn accessible_water_neighbours(&self, start: Point, radius: i32) -> CellSet {
        (**self).accessible_water_neighbours(start, radius)
    }
}
