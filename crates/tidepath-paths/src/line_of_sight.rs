//! Straight-line pathfinding.

use log::trace;
use tidepath_core::{Neighborhood, Point, SeaGrid, bresenham, diagonal_first};

use crate::path::Path;
use crate::traits::{Pathfinder, assert_in_range};

/// How [`LineOfSight`] draws its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rasterizer {
    /// Bresenham's line.
    #[default]
    Bresenham,
    /// Diagonal moves until aligned with the target, then straight.
    DiagonalFirst,
}

/// Cheap, incomplete pathfinder: accepts the rasterized straight line
/// between the endpoints if every cell on it is navigable.
///
/// A `Some` answer is always a valid route. A `None` answer only means the
/// straight line is blocked; a detour may exist.
#[derive(Debug, Clone)]
pub struct LineOfSight<G> {
    grid: G,
    rasterizer: Rasterizer,
}

impl<G: SeaGrid> LineOfSight<G> {
    pub fn new(grid: G) -> Self {
        Self::with_rasterizer(grid, Rasterizer::default())
    }

    pub fn with_rasterizer(grid: G, rasterizer: Rasterizer) -> Self {
        Self { grid, rasterizer }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn rasterizer(&self) -> Rasterizer {
        self.rasterizer
    }

    /// Collect `cells`, giving up at the first one that is not navigable.
    fn walk(&self, cells: impl Iterator<Item = Point>) -> Option<Path> {
        let mut route = Vec::new();
        for p in cells {
            if !self.grid.is_navigable(p) {
                trace!("line of sight blocked at {p}");
                return None;
            }
            route.push(p);
        }
        Some(Path::new(route))
    }
}

impl<G: SeaGrid> Pathfinder for LineOfSight<G> {
    fn path(&self, start: Point, end: Point) -> Option<Path> {
        let range = self.grid.range();
        assert_in_range(range, start);
        assert_in_range(range, end);

        if !self.grid.is_navigable(start) || !self.grid.is_navigable(end) {
            return None;
        }

        let line = match self.rasterizer {
            Rasterizer::Bresenham => bresenham(start, end),
            Rasterizer::DiagonalFirst => diagonal_first(start, end),
        };
        match self.grid.neighborhood() {
            Neighborhood::Moore => self.walk(line),
            Neighborhood::VonNeumann => self.walk(line.four_connected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tidepath_core::{MapConfig, Range, WaterMap};

    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| Point::from(p)).collect()
    }

    fn open_sea(w: i32, h: i32) -> WaterMap {
        let mut map = WaterMap::new(Range::sized(w, h), MapConfig::default());
        map.fill_water();
        map
    }

    #[test]
    fn path_to_itself_is_one_cell() {
        let los = LineOfSight::new(open_sea(4, 4));
        let p = Point::new(2, 2);
        assert_eq!(los.path(p, p), Some(Path::single(p)));
    }

    #[test]
    fn horizontal_vertical_and_diagonal() {
        let los = LineOfSight::new(open_sea(4, 4));
        let h = los.path(Point::new(0, 2), Point::new(2, 2)).unwrap();
        assert_eq!(h.cells(), pts(&[(0, 2), (1, 2), (2, 2)]));
        let v = los.path(Point::new(2, 0), Point::new(2, 2)).unwrap();
        assert_eq!(v.cells(), pts(&[(2, 0), (2, 1), (2, 2)]));
        let d = los.path(Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(d.cells(), pts(&[(0, 0), (1, 1), (2, 2)]));
    }

    #[test]
    fn diagonal_first_rasterizer() {
        let los = LineOfSight::with_rasterizer(open_sea(4, 4), Rasterizer::DiagonalFirst);
        let p = los.path(Point::new(0, 0), Point::new(2, 3)).unwrap();
        assert_eq!(p.cells(), pts(&[(0, 0), (1, 1), (2, 2), (2, 3)]));
    }

    #[test]
    fn blocked_line_is_impossible() {
        let map: WaterMap = "
            ~~~~
            ~#~~
            ~~~~
            ~~~~"
            .parse()
            .unwrap();
        let los = LineOfSight::new(map);
        assert_eq!(los.path(Point::new(0, 0), Point::new(3, 3)), None);
        // A line that avoids the rock is fine.
        assert!(los.path(Point::new(0, 0), Point::new(3, 0)).is_some());
    }

    #[test]
    fn land_endpoints_are_impossible() {
        let map: WaterMap = "~#\n~~".parse().unwrap();
        let los = LineOfSight::new(map);
        assert_eq!(los.path(Point::new(0, 0), Point::new(1, 0)), None);
        assert_eq!(los.path(Point::new(1, 0), Point::new(0, 0)), None);
    }

    #[test]
    fn ports_on_land_are_crossable() {
        let map: WaterMap = "~P~".parse().unwrap();
        let los = LineOfSight::new(map);
        let p = los.path(Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn von_neumann_lines_are_four_connected() {
        let map = WaterMap::parse(
            "~~~\n~~~\n~~~",
            MapConfig {
                neighborhood: Neighborhood::VonNeumann,
                ..MapConfig::default()
            },
        )
        .unwrap();
        let los = LineOfSight::new(map);
        let p = los.path(Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(p.cells(), pts(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]));
    }

    /// Grid that counts terrain lookups.
    struct Probe {
        map: WaterMap,
        lookups: AtomicUsize,
    }

    impl SeaGrid for Probe {
        fn range(&self) -> Range {
            self.map.range()
        }
        fn is_water(&self, p: Point) -> bool {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            self.map.is_water(p)
        }
        fn has_port(&self, p: Point) -> bool {
            self.map.has_port(p)
        }
        fn distance(&self, a: Point, b: Point) -> f64 {
            self.map.distance(a, b)
        }
        fn neighborhood(&self) -> Neighborhood {
            self.map.neighborhood()
        }
    }

    #[test]
    fn stops_at_first_blocked_cell() {
        let map: WaterMap = "~#~~~~~~~~".parse().unwrap();
        let probe = Probe {
            map,
            lookups: AtomicUsize::new(0),
        };
        let los = LineOfSight::new(&probe);
        assert_eq!(los.path(Point::new(0, 0), Point::new(9, 0)), None);
        // Two endpoint checks, then (0, 0) and (1, 0) along the line.
        assert_eq!(probe.lookups.load(Ordering::Relaxed), 4);
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn out_of_range_endpoint_panics() {
        let los = LineOfSight::new(open_sea(2, 2));
        los.path(Point::new(0, 0), Point::new(5, 5));
    }
}
