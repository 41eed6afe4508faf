use crate::Point;

/// Which cells count as adjacent on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Neighborhood {
    /// Eight neighbours: cardinal and diagonal.
    #[default]
    Moore,
    /// Four cardinal neighbours.
    VonNeumann,
}

impl Neighborhood {
    /// Whether `a` and `b` are distinct adjacent cells under this neighbourhood.
    #[inline]
    pub fn adjacent(self, a: Point, b: Point) -> bool {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        match self {
            Neighborhood::Moore => dx.max(dy) == 1,
            Neighborhood::VonNeumann => dx + dy == 1,
        }
    }
}

/// Reusable neighbour buffer.
///
/// Enumerates the cardinal (4-way) or all (8-way) neighbours of a point,
/// filtered by a predicate, without allocating after warm-up.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// 4-directional neighbours of `p` for which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf.extend(p.neighbors_4().into_iter().filter(|&n| keep(n)));
        &self.buf
    }

    /// 8-directional neighbours of `p` for which `keep` returns `true`.
    pub fn all(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        self.buf.extend(p.neighbors_8().into_iter().filter(|&n| keep(n)));
        &self.buf
    }

    /// Neighbours of `p` under `kind`, filtered by `keep`.
    pub fn of(
        &mut self,
        kind: Neighborhood,
        p: Point,
        keep: impl Fn(Point) -> bool,
    ) -> &[Point] {
        match kind {
            Neighborhood::Moore => self.all(p, keep),
            Neighborhood::VonNeumann => self.cardinal(p, keep),
        }
    }
}
