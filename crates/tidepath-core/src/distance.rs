//! Distance metrics between cells.

use crate::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Euclidean (L2) distance between two points, in cells.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

/// How a grid measures travel between two cells.
///
/// `cell_size` scales a one-cell step into map units (kilometres, say).
/// The planar variants are metrics, so the same measure can serve as both
/// edge cost and search estimate. `Equirectangular` is symmetric and close
/// to a metric over the extent of a regional map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Metric {
    Euclidean { cell_size: f64 },
    Chebyshev { cell_size: f64 },
    Manhattan { cell_size: f64 },
    /// Kilometres on a longitude/latitude raster. Cell `(0, 0)` has its
    /// north-west corner at (`west`, `north`) in degrees, each cell spans
    /// `cell_degrees` on both axes, and `y` grows southward.
    Equirectangular {
        west: f64,
        north: f64,
        cell_degrees: f64,
    },
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Euclidean { cell_size: 1.0 }
    }
}

impl Metric {
    /// Distance from `a` to `b` in map units.
    #[inline]
    pub fn between(self, a: Point, b: Point) -> f64 {
        match self {
            Metric::Euclidean { cell_size } => euclidean(a, b) * cell_size,
            Metric::Chebyshev { cell_size } => f64::from(chebyshev(a, b)) * cell_size,
            Metric::Manhattan { cell_size } => f64::from(manhattan(a, b)) * cell_size,
            Metric::Equirectangular {
                west,
                north,
                cell_degrees,
            } => {
                let (lon_a, lat_a) = lon_lat(a, west, north, cell_degrees);
                let (lon_b, lat_b) = lon_lat(b, west, north, cell_degrees);
                let mean_lat = ((lat_a + lat_b) / 2.0).to_radians();
                let x = (lon_b - lon_a).to_radians() * mean_lat.cos();
                let y = (lat_b - lat_a).to_radians();
                x.hypot(y) * EARTH_RADIUS_KM
            }
        }
    }
}

/// Longitude and latitude of the centre of cell `p`, in degrees.
#[inline]
fn lon_lat(p: Point, west: f64, north: f64, cell_degrees: f64) -> (f64, f64) {
    let lon = west + (f64::from(p.x) + 0.5) * cell_degrees;
    let lat = north - (f64::from(p.y) + 0.5) * cell_degrees;
    (lon, lat)
}
