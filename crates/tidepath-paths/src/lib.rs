//! Pathfinding and path caching over sea grids.
//!
//! Pathfinders are small types implementing [`Pathfinder`], composed at
//! construction time:
//!
//! - [`LineOfSight`]: rasterized straight line, cheap but incomplete
//! - [`AstarPathfinder`]: A* over a [`WaterGraph`], authoritative
//! - [`Fallback`]: a heuristic first, the canonical pathfinder if it fails
//! - [`Cached`]: memoizes routes (with sub-route and reverse reuse) and the
//!   bulk reachability queries of a [`GridPathfinder`]
//!
//! [`standard`] assembles the usual stack:
//!
//! ```
//! use std::sync::Arc;
//! use tidepath_core::{Point, WaterMap};
//! use tidepath_paths::{GridPathfinder, PathConfig, Pathfinder, standard};
//!
//! let map: WaterMap = "~~~~\n~#~~\n~~~~\n~~~~".parse().unwrap();
//! let finder = standard(Arc::new(map), &PathConfig::default());
//!
//! let route = finder.path(Point::new(0, 0), Point::new(3, 3)).unwrap();
//! assert!(!route.contains(&Point::new(1, 1)));
//! assert!(finder.accessible_water_cells(Point::new(0, 0)).contains(Point::new(3, 3)));
//! ```
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pathfinder`] | routes between two cells |
//! | [`GridPathfinder`] : [`Pathfinder`] | terrain and reachability queries |

mod astar;
mod cache;
mod cached;
mod config;
mod fallback;
mod graph;
mod line_of_sight;
mod path;
mod traits;

pub use astar::AstarPathfinder;
pub use cache::PathCache;
pub use cached::{CacheStats, Cached};
pub use config::{PathConfig, StandardPathfinder, standard};
pub use fallback::Fallback;
pub use graph::{Connection, WaterGraph};
pub use line_of_sight::{LineOfSight, Rasterizer};
pub use path::{CellSet, Path, PathOutcome};
pub use traits::{GridPathfinder, Pathfinder};
