use log::debug;
use tidepath_core::{Point, Range};

use crate::path::{CellSet, Path};
use crate::traits::{GridPathfinder, Pathfinder};

/// Tries a cheap heuristic first and defers to an authoritative pathfinder
/// only when the heuristic finds nothing.
///
/// Grid queries go straight to the canonical side.
#[derive(Debug, Clone)]
pub struct Fallback<H, C> {
    heuristic: H,
    canonical: C,
}

impl<H: Pathfinder, C: Pathfinder> Fallback<H, C> {
    pub fn new(heuristic: H, canonical: C) -> Self {
        Self {
            heuristic,
            canonical,
        }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    pub fn canonical(&self) -> &C {
        &self.canonical
    }
}

impl<H: Pathfinder, C: Pathfinder> Pathfinder for Fallback<H, C> {
    fn path(&self, start: Point, end: Point) -> Option<Path> {
        self.heuristic.path(start, end).or_else(|| {
            debug!("no straight route from {start} to {end}, searching");
            self.canonical.path(start, end)
        })
    }
}

impl<H: Pathfinder, C: GridPathfinder> GridPathfinder for Fallback<H, C> {
    fn range(&self) -> Range {
        self.canonical.range()
    }

    fn is_water(&self, p: Point) -> bool {
        self.canonical.is_water(p)
    }

    fn is_navigable(&self, p: Point) -> bool {
        self.canonical.is_navigable(p)
    }

    fn accessible_water_cells(&self, start: Point) -> CellSet {
        self.canonical.accessible_water_cells(start)
    }

    fn accessible_water_neighbours(&self, start: Point, radius: i32) -> CellSet {
        self.canonical.accessible_water_neighbours(start, radius)
    }
}
