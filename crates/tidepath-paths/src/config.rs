use tidepath_core::SeaGrid;

use crate::astar::AstarPathfinder;
use crate::cached::Cached;
use crate::fallback::Fallback;
use crate::line_of_sight::{LineOfSight, Rasterizer};

/// Settings for the standard pathfinder stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Line drawn by the straight-line pathfinder.
    pub rasterizer: Rasterizer,
    /// Answer `(b, a)` from a cached `(a, b)` route. Only valid when travel
    /// on the grid is symmetric, which holds for every [`SeaGrid`] whose
    /// navigability is per cell and whose distance is a metric.
    pub reverse_reuse: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            rasterizer: Rasterizer::Bresenham,
            reverse_reuse: true,
        }
    }
}

/// Straight line first, A* when the line is blocked, everything cached.
pub type StandardPathfinder<G> = Cached<Fallback<LineOfSight<G>, AstarPathfinder<G>>>;

/// Assemble the [`StandardPathfinder`] over `grid`.
///
/// `grid` is cloned into both layers, so pass a cheap handle such as an
/// `Arc` or a reference.
pub fn standard<G: SeaGrid + Clone>(grid: G, config: &PathConfig) -> StandardPathfinder<G> {
    let heuristic = LineOfSight::with_rasterizer(grid.clone(), config.rasterizer);
    let canonical = AstarPathfinder::new(grid);
    Cached::with_config(Fallback::new(heuristic, canonical), config)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tidepath_core::{Point, WaterMap};

    use super::*;
    use crate::traits::{GridPathfinder, Pathfinder};

    const ROCK: &str = "
        ~~~~
        ~#~~
        ~~~~
        ~~~~";

    #[test]
    fn standard_stack_routes_around_land() {
        let map: Arc<WaterMap> = Arc::new(ROCK.parse().unwrap());
        let finder = standard(Arc::clone(&map), &PathConfig::default());
        let path = finder.path(Point::new(0, 0), Point::new(3, 3)).unwrap();
        assert!(!path.contains(&Point::new(1, 1)));
        assert_eq!(finder.stats().misses, 1);

        let reach = finder.accessible_water_cells(Point::new(0, 0));
        assert!(reach.contains(Point::new(3, 3)));
        assert!(!reach.contains(Point::new(1, 1)));
        assert_eq!(reach.len(), 15);
    }

    #[test]
    fn config_reaches_every_layer() {
        let map: WaterMap = ROCK.parse().unwrap();
        let config = PathConfig {
            rasterizer: Rasterizer::DiagonalFirst,
            reverse_reuse: false,
        };
        let finder = standard(&map, &config);
        assert_eq!(finder.inner().heuristic().rasterizer(), Rasterizer::DiagonalFirst);
        assert!(!finder.paths().reverse_reuse());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_round_trip() {
        let config = PathConfig {
            rasterizer: Rasterizer::DiagonalFirst,
            reverse_reuse: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"rasterizer":"diagonal_first","reverse_reuse":false}"#);
        let back: PathConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let defaults: PathConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, PathConfig::default());
    }
}
