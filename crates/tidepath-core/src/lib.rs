//! **tidepath-core**: grid geometry and sea-grid services.
//!
//! This crate provides the value types shared by the *tidepath* pathfinders:
//! cells and extents, distance metrics, neighbourhoods, line rasterization,
//! and the [`SeaGrid`] service trait with a dense reference implementation,
//! [`WaterMap`].

pub mod distance;
pub mod error;
pub mod geom;
pub mod line;
pub mod map;
pub mod neighbors;
pub mod sea;

pub use distance::{Metric, chebyshev, euclidean, manhattan};
pub use error::GridError;
pub use geom::{Point, Range, RangeIter};
pub use line::{FourConnected, Line, bresenham, diagonal_first};
pub use map::{MapConfig, Terrain, WaterMap};
pub use neighbors::{Neighborhood, Neighbors};
pub use sea::SeaGrid;
