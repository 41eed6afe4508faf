//! The sea grid seen as an indexed, weighted graph.
//!
//! Nodes are dense indices `(x - min.x) + (y - min.y) * width`, so searches
//! work over plain arrays. Outgoing edges are computed the first time a cell
//! is expanded and kept for the lifetime of the graph.

use std::sync::OnceLock;

use tidepath_core::{Point, Range, SeaGrid};

/// A directed edge between two navigable neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: Point,
    pub to: Point,
    /// Grid distance from `from` to `to`.
    pub cost: f64,
}

/// Indexed view of a [`SeaGrid`] with memoized connections.
pub struct WaterGraph<G> {
    grid: G,
    range: Range,
    width: usize,
    connections: Box<[OnceLock<Box<[Connection]>>]>,
}

impl<G: SeaGrid> WaterGraph<G> {
    pub fn new(grid: G) -> Self {
        let range = grid.range();
        let connections = (0..range.len()).map(|_| OnceLock::new()).collect();
        Self {
            width: range.width().max(0) as usize,
            range,
            grid,
            connections,
        }
    }

    #[inline]
    pub fn grid(&self) -> &G {
        &self.grid
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of nodes, navigable or not.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.connections.len()
    }

    /// Node index of `p`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        let x = (p.x - self.range.min.x) as usize;
        let y = (p.y - self.range.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Cell of node `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.range.min.x;
        let y = (idx / self.width) as i32 + self.range.min.y;
        Point::new(x, y)
    }

    /// Outgoing edges of `p`: one per navigable neighbour, none if `p`
    /// itself is not navigable or lies outside the grid.
    pub fn connections(&self, p: Point) -> &[Connection] {
        match self.index(p) {
            Some(idx) => self.connections_at(idx),
            None => &[],
        }
    }

    /// Outgoing edges of node `idx`.
    pub(crate) fn connections_at(&self, idx: usize) -> &[Connection] {
        self.connections[idx].get_or_init(|| self.compute_connections(self.point(idx)))
    }

    /// Whether the edges of `p` have been computed yet.
    pub fn is_expanded(&self, p: Point) -> bool {
        self.index(p)
            .is_some_and(|idx| self.connections[idx].get().is_some())
    }

    fn compute_connections(&self, from: Point) -> Box<[Connection]> {
        if !self.grid.is_navigable(from) {
            return Box::default();
        }
        let mut buf = Vec::with_capacity(8);
        self.grid.neighbors(from, &mut buf);
        buf.into_iter()
            .filter(|&to| self.grid.is_navigable(to))
            .map(|to| Connection {
                from,
                to,
                cost: self.grid.distance(from, to),
            })
            .collect()
    }
}
