//! The grid service consumed by every pathfinder.

use std::sync::Arc;

use crate::neighbors::{Neighborhood, Neighbors};
use crate::{Point, Range};

/// Terrain, port and distance queries over a static grid.
///
/// Implementors answer for cells inside [`range`](Self::range); cells
/// outside it must report neither water nor a port. Terrain must not change
/// while pathfinders built on the grid are alive: their caches are never
/// invalidated.
pub trait SeaGrid: Send + Sync {
    /// The grid extent.
    fn range(&self) -> Range;

    /// Whether `p` is water.
    fn is_water(&self, p: Point) -> bool;

    /// Whether at least one port sits on `p`.
    fn has_port(&self, p: Point) -> bool;

    /// Travel distance between two cells. Must be symmetric; routes are
    /// shortest when it also satisfies the triangle inequality.
    fn distance(&self, a: Point, b: Point) -> f64;

    /// Which cells count as adjacent.
    fn neighborhood(&self) -> Neighborhood;

    /// Water or port. Ports are traversable even when built on land.
    #[inline]
    fn is_navigable(&self, p: Point) -> bool {
        self.is_water(p) || self.has_port(p)
    }

    /// Append the in-range neighbours of `p` to `buf`, navigable or not.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let rng = self.range();
        let mut nb = Neighbors::new();
        buf.extend_from_slice(nb.of(self.neighborhood(), p, |q| rng.contains(q)));
    }
}

impl<G: SeaGrid + ?Sized> SeaGrid for Arc<G> {
    fn range(&self) -> Range {
        (**self).range()
    }
    fn is_water(&self, p: Point) -> bool {
        (**self).is_water(p)
    }
    fn has_port(&self, p: Point) -> bool {
        (**self).has_port(p)
    }
    fn distance(&self, a: Point, b: Point) -> f64 {
        (**self).distance(a, b)
    }
    fn neighborhood(&self) -> Neighborhood {
        (**self).neighborhood()
    }
    fn is_navigable(&self, p: Point) -> bool {
        (**self).is_navigable(p)
    }
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        (**self).neighbors(p, buf)
    }
}

impl<G: SeaGrid + ?Sized> SeaGrid for &G {
    fn range(&self) -> Range {
        (**self).range()
    }
    fn is_water(&self, p: Point) -> bool {
        (**self).is_water(p)
    }
    fn has_port(&self, p: Point) -> bool {
        (**self).has_port(p)
    }
    fn distance(&self, a: Point, b: Point) -> f64 {
        (**self).distance(a, b)
    }
    fn neighborhood(&self) -> Neighborhood {
        (**self).neighborhood()
    }
    fn is_navigable(&self, p: Point) -> bool {
        (**self).is_navigable(p)
    }
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        (**self).neighbors(p, buf)
    }
}
