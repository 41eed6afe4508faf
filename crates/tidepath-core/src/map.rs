//! A dense in-memory [`SeaGrid`].
//!
//! [`WaterMap`] stores one terrain flag and one port flag per cell. Maps can
//! be built cell by cell or parsed from ASCII art:
//!
//! | glyph | cell |
//! |---|---|
//! | `~` or `.` | water |
//! | `#` | land |
//! | `P` | land with a port |
//! | `p` | water with a port |

use std::fmt;
use std::str::FromStr;

use crate::distance::Metric;
use crate::error::GridError;
use crate::neighbors::Neighborhood;
use crate::sea::SeaGrid;
use crate::{Point, Range};

/// Terrain class of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Land,
    Water,
}

/// Adjacency and distance settings of a [`WaterMap`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub neighborhood: Neighborhood,
    pub metric: Metric,
}

/// Static terrain over a rectangular range.
#[derive(Debug, Clone)]
pub struct WaterMap {
    range: Range,
    config: MapConfig,
    water: Vec<bool>,
    ports: Vec<bool>,
}

impl WaterMap {
    /// An all-land map over `range`.
    pub fn new(range: Range, config: MapConfig) -> Self {
        let len = range.len();
        Self {
            range,
            config,
            water: vec![false; len],
            ports: vec![false; len],
        }
    }

    /// Parse an ASCII map. Surrounding whitespace is ignored, rows must all
    /// have the same width, and the top-left glyph is cell (0, 0).
    pub fn parse(text: &str, config: MapConfig) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .trim()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let width = first.chars().count();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        let mut map = Self::new(Range::sized(width as i32, rows.len() as i32), config);
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let (water, port) = match ch {
                    '~' | '.' => (true, false),
                    '#' => (false, false),
                    'P' => (false, true),
                    'p' => (true, true),
                    _ => return Err(GridError::UnknownGlyph { ch, pos }),
                };
                let i = map.index(pos)?;
                map.water[i] = water;
                map.ports[i] = port;
            }
        }
        Ok(map)
    }

    /// The adjacency and distance settings.
    pub fn config(&self) -> MapConfig {
        self.config
    }

    /// Terrain of `p`.
    pub fn terrain(&self, p: Point) -> Result<Terrain, GridError> {
        let i = self.index(p)?;
        Ok(if self.water[i] {
            Terrain::Water
        } else {
            Terrain::Land
        })
    }

    /// Set the terrain of `p`.
    pub fn set_terrain(&mut self, p: Point, terrain: Terrain) -> Result<(), GridError> {
        let i = self.index(p)?;
        self.water[i] = terrain == Terrain::Water;
        Ok(())
    }

    /// Add or remove the port on `p`.
    pub fn set_port(&mut self, p: Point, port: bool) -> Result<(), GridError> {
        let i = self.index(p)?;
        self.ports[i] = port;
        Ok(())
    }

    /// Turn every cell to water.
    pub fn fill_water(&mut self) {
        self.water.fill(true);
    }

    /// Number of water cells.
    pub fn water_count(&self) -> usize {
        self.water.iter().filter(|&&w| w).count()
    }

    fn index(&self, p: Point) -> Result<usize, GridError> {
        if !self.range.contains(p) {
            return Err(GridError::OutOfBounds {
                pos: p,
                range: self.range,
            });
        }
        let x = (p.x - self.range.min.x) as usize;
        let y = (p.y - self.range.min.y) as usize;
        Ok(y * self.range.width() as usize + x)
    }
}

impl SeaGrid for WaterMap {
    #[inline]
    fn range(&self) -> Range {
        self.range
    }

    #[inline]
    fn is_water(&self, p: Point) -> bool {
        self.index(p).is_ok_and(|i| self.water[i])
    }

    #[inline]
    fn has_port(&self, p: Point) -> bool {
        self.index(p).is_ok_and(|i| self.ports[i])
    }

    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        self.config.metric.between(a, b)
    }

    #[inline]
    fn neighborhood(&self) -> Neighborhood {
        self.config.neighborhood
    }
}

impl FromStr for WaterMap {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, MapConfig::default())
    }
}

impl fmt::Display for WaterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in self.range.min.y..self.range.max.y {
            for x in self.range.min.x..self.range.max.x {
                let p = Point::new(x, y);
                let ch = match (self.is_water(p), self.has_port(p)) {
                    (true, false) => '~',
                    (false, false) => '#',
                    (false, true) => 'P',
                    (true, true) => 'p',
                };
                write!(f, "{ch}")?;
            }
            if y + 1 < self.range.max.y {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
