//! Integer line rasterization.
//!
//! Lines are lazy iterators so a caller validating cells one by one can stop
//! at the first bad cell without generating the rest.

use crate::Point;

#[derive(Debug, Clone, Copy)]
enum Stepper {
    Bresenham { dx: i32, dy: i32, sx: i32, sy: i32, err: i32 },
    DiagonalFirst,
}

/// Cells of a rasterized segment, `from` and `to` included.
///
/// Consecutive cells are 8-connected. Use [`Line::four_connected`] on grids
/// that only allow cardinal moves.
#[derive(Debug, Clone)]
pub struct Line {
    cur: Point,
    end: Point,
    stepper: Stepper,
    done: bool,
}

/// Bresenham's line from `from` to `to`.
pub fn bresenham(from: Point, to: Point) -> Line {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    Line {
        cur: from,
        end: to,
        stepper: Stepper::Bresenham {
            dx,
            dy,
            sx: if from.x < to.x { 1 } else { -1 },
            sy: if from.y < to.y { 1 } else { -1 },
            err: dx - dy,
        },
        done: false,
    }
}

/// A line that moves diagonally until it shares a row or column with `to`,
/// then straight.
pub fn diagonal_first(from: Point, to: Point) -> Line {
    Line {
        cur: from,
        end: to,
        stepper: Stepper::DiagonalFirst,
        done: false,
    }
}

impl Line {
    /// Split every diagonal step into a horizontal then a vertical one.
    pub fn four_connected(self) -> FourConnected<Self> {
        FourConnected::new(self)
    }

    fn advance(&mut self) {
        match &mut self.stepper {
            Stepper::Bresenham {
                dx,
                dy,
                sx,
                sy,
                err,
            } => {
                let e2 = 2 * *err;
                if e2 > -*dy {
                    *err -= *dy;
                    self.cur.x += *sx;
                }
                if e2 < *dx {
                    *err += *dx;
                    self.cur.y += *sy;
                }
            }
            Stepper::DiagonalFirst => {
                let sx = (self.end.x - self.cur.x).signum();
                let sy = (self.end.y - self.cur.y).signum();
                self.cur = self.cur.shift(sx, sy);
            }
        }
    }
}

impl Iterator for Line {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let p = self.cur;
        if p == self.end {
            self.done = true;
        } else {
            self.advance();
        }
        Some(p)
    }
}

/// Adapter turning an 8-connected cell sequence into a 4-connected one.
///
/// Each diagonal step `a -> b` becomes `a -> (b.x, a.y) -> b`.
#[derive(Debug, Clone)]
pub struct FourConnected<I> {
    inner: I,
    prev: Option<Point>,
    pending: Option<Point>,
}

impl<I: Iterator<Item = Point>> FourConnected<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            prev: None,
            pending: None,
        }
    }
}

impl<I: Iterator<Item = Point>> Iterator for FourConnected<I> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let next = match self.pending.take() {
            Some(p) => p,
            None => {
                let n = self.inner.next()?;
                match self.prev {
                    Some(prev) if prev.x != n.x && prev.y != n.y => {
                        let elbow = Point::new(n.x, prev.y);
                        self.pending = Some(n);
                        self.prev = Some(elbow);
                        return Some(elbow);
                    }
                    _ => n,
                }
            }
        };
        self.prev = Some(next);
        Some(next)
    }
}
