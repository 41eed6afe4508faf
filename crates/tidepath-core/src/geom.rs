//! Grid geometry: [`Point`] cells and [`Range`] extents.

use std::fmt;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A grid cell. X grows east, Y grows south.
///
/// Points order row-major (by `y`, then `x`), which is also the order in
/// which [`Range::iter`] visits them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four cardinal neighbours (north, east, south, west).
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            self.shift(0, -1),
            self.shift(1, 0),
            self.shift(0, 1),
            self.shift(-1, 0),
        ]
    }

    /// All eight neighbours, clockwise from north.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        [
            self.shift(0, -1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
            self.shift(0, 1),
            self.shift(-1, 1),
            self.shift(-1, 0),
            self.shift(-1, -1),
        ]
    }

    /// Whether `other` is one king move away (or the same cell).
    #[inline]
    pub fn touches(self, other: Point) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max) of cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// A `width × height` range anchored at the origin.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Intersection of two ranges. Disjoint ranges give the zero range.
    #[inline]
    pub fn intersect(self, other: Range) -> Self {
        let r = Self {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// The square of side `2 * radius + 1` centred on `center`, clipped to
    /// this range. This is the Moore neighbourhood of `center`, origin
    /// included.
    #[inline]
    pub fn around(self, center: Point, radius: i32) -> Self {
        // Anything wider than the range clips to the whole range.
        let r = radius.clamp(0, self.width().max(self.height()).max(0));
        self.intersect(Range::new(
            center.x.saturating_sub(r),
            center.y.saturating_sub(r),
            center.x.saturating_add(r).saturating_add(1),
            center.y.saturating_add(r).saturating_add(1),
        ))
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.y >= self.range.max.y || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.x - self.cur.x) as usize;
        let remaining_rows = (self.range.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_ordering_is_row_major() {
        let mut pts = vec![Point::new(2, 0), Point::new(0, 1), Point::new(1, 0)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(1, 0), Point::new(2, 0), Point::new(0, 1)]);
    }

    #[test]
    fn touches_king_moves() {
        let p = Point::new(3, 3);
        for n in p.neighbors_8() {
            assert!(p.touches(n));
        }
        assert!(p.touches(p));
        assert!(!p.touches(Point::new(5, 3)));
    }

    #[test]
    fn fishing_grounds_extent() {
        let grounds = Range::new(10, 4, 14, 7);
        assert_eq!(grounds.width(), 4);
        assert_eq!(grounds.height(), 3);
        assert_eq!(grounds.len(), 12);
        assert!(grounds.contains(Point::new(13, 6)));
        assert!(!grounds.contains(Point::new(14, 6)));
        assert!(!grounds.contains(Point::new(10, 7)));
        // Corners given in either order describe the same rectangle.
        assert_eq!(Range::new(14, 7, 10, 4), grounds);
    }

    #[test]
    fn iteration_is_row_major_and_exact() {
        let cells: Vec<Point> = Range::new(1, 1, 3, 3).iter().collect();
        assert_eq!(
            cells,
            vec![Point::new(1, 1), Point::new(2, 1), Point::new(1, 2), Point::new(2, 2)]
        );
        let mut it = Range::sized(5, 2).iter();
        it.next();
        assert_eq!(it.len(), 9);
        assert_eq!(Range::sized(0, 3).iter().count(), 0);
    }

    #[test]
    fn around_clips_to_range() {
        let r = Range::sized(4, 4);
        assert_eq!(r.around(Point::new(0, 0), 1), Range::new(0, 0, 2, 2));
        assert_eq!(r.around(Point::new(2, 2), 1), Range::new(1, 1, 4, 4));
        assert_eq!(r.around(Point::new(1, 1), 0).len(), 1);
        assert_eq!(r.around(Point::new(1, 1), 10), r);
        assert_eq!(r.around(Point::new(1, 1), i32::MAX), r);
        assert_eq!(r.around(Point::new(3, 0), i32::MAX - 1), r);

        let far = Range::new(i32::MAX - 4, i32::MIN, i32::MAX, i32::MIN + 4);
        let corner = Point::new(i32::MAX - 1, i32::MIN);
        assert_eq!(
            far.around(corner, 2),
            Range::new(i32::MAX - 3, i32::MIN, i32::MAX, i32::MIN + 3)
        );
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let harbour = Range::sized(2, 2);
        assert!(harbour.intersect(Range::new(4, 0, 6, 2)).is_empty());
        assert_eq!(harbour.intersect(Range::new(1, 1, 6, 6)), Range::new(1, 1, 2, 2));
    }
}
