//! Optimal pathfinding with A*.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use log::debug;
use parking_lot::Mutex;
use tidepath_core::{Point, Range, SeaGrid};

use crate::graph::WaterGraph;
use crate::path::{CellSet, Path};
use crate::traits::{GridPathfinder, Pathfinder, assert_in_range};

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Search arena
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: f64,
    parent: usize,
    generation: u32,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Frontier entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest `f` first and, among equal `f`, the smallest node index.
#[derive(Clone, Copy)]
struct NodeRef {
    idx: usize,
    f: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

/// Per-node search state reused across queries. Bumping `generation`
/// invalidates every node at once.
struct Scratch {
    nodes: Vec<Node>,
    generation: u32,
    open: BinaryHeap<NodeRef>,
}

impl Scratch {
    fn new(len: usize) -> Self {
        Self {
            nodes: vec![Node::default(); len],
            generation: 0,
            open: BinaryHeap::new(),
        }
    }

    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale nodes from generation 0 would look current.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.open.clear();
        self.generation
    }
}

// ---------------------------------------------------------------------------
// AstarPathfinder
// ---------------------------------------------------------------------------

/// Authoritative pathfinder: A* over a [`WaterGraph`], estimating remaining
/// cost with the grid's own distance.
///
/// Always finds a route when one exists, and its routes are shortest under
/// the grid metric. Equal-cost frontier nodes are expanded lowest index
/// first, so results are reproducible.
pub struct AstarPathfinder<G> {
    graph: WaterGraph<G>,
    scratch: Mutex<Scratch>,
}

impl<G: SeaGrid> AstarPathfinder<G> {
    pub fn new(grid: G) -> Self {
        let graph = WaterGraph::new(grid);
        let scratch = Mutex::new(Scratch::new(graph.node_count()));
        Self { graph, scratch }
    }

    #[inline]
    pub fn graph(&self) -> &WaterGraph<G> {
        &self.graph
    }

    #[inline]
    pub fn grid(&self) -> &G {
        self.graph.grid()
    }

    /// Run A* between two navigable, distinct nodes.
    fn search(&self, start_idx: usize, goal_idx: usize) -> Option<Path> {
        let goal = self.graph.point(goal_idx);
        let grid = self.graph.grid();

        let mut scratch = self.scratch.lock();
        let cur_gen = scratch.next_generation();
        let Scratch { nodes, open, .. } = &mut *scratch;

        nodes[start_idx] = Node {
            g: 0.0,
            parent: NO_PARENT,
            generation: cur_gen,
            closed: false,
        };
        open.push(NodeRef {
            idx: start_idx,
            f: grid.distance(self.graph.point(start_idx), goal),
        });

        let mut expanded = 0usize;
        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip entries superseded by a cheaper push.
            if nodes[ci].closed {
                continue;
            }
            if ci == goal_idx {
                break 'search true;
            }

            nodes[ci].closed = true;
            expanded += 1;
            let current_g = nodes[ci].g;

            for c in self.graph.connections_at(ci) {
                let Some(ni) = self.graph.index(c.to) else {
                    continue;
                };
                let tentative_g = current_g + c.cost;

                let n = &mut nodes[ni];
                if n.generation == cur_gen && (n.closed || tentative_g >= n.g) {
                    continue;
                }
                *n = Node {
                    g: tentative_g,
                    parent: ci,
                    generation: cur_gen,
                    closed: false,
                };
                open.push(NodeRef {
                    idx: ni,
                    f: tentative_g + grid.distance(c.to, goal),
                });
            }
        };

        if !found {
            debug!(
                "no route from {} to {} ({expanded} nodes expanded)",
                self.graph.point(start_idx),
                goal
            );
            return None;
        }

        let mut route = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            route.push(self.graph.point(ci));
            ci = nodes[ci].parent;
        }
        route.reverse();
        Some(Path::new(route))
    }

    /// Water cells of `area` reachable from `start` through navigable cells.
    ///
    /// Routes may leave `area`, so the flood covers the whole component, but
    /// it stops once every water cell of `area` has been reached.
    fn reachable_water_in(&self, start: Point, area: Range) -> CellSet {
        assert_in_range(self.graph.range(), start);
        let grid = self.grid();
        let Some(si) = self.graph.index(start) else {
            return CellSet::default();
        };
        if !grid.is_navigable(start) {
            return CellSet::default();
        }

        let mut wanted = area.iter().filter(|&p| grid.is_water(p)).count();
        if wanted == 0 {
            return CellSet::default();
        }
        let mut found = Vec::new();
        let mut seen = vec![false; self.graph.node_count()];
        let mut queue = VecDeque::from([si]);
        seen[si] = true;
        while let Some(ci) = queue.pop_front() {
            let p = self.graph.point(ci);
            if area.contains(p) && grid.is_water(p) {
                found.push(p);
                wanted -= 1;
                if wanted == 0 {
                    break;
                }
            }
            for c in self.graph.connections_at(ci) {
                if let Some(ni) = self.graph.index(c.to) {
                    if !seen[ni] {
                        seen[ni] = true;
                        queue.push_back(ni);
                    }
                }
            }
        }

        let cells: CellSet = found.into_iter().collect();
        debug!("{} water cells reachable from {start} in {area}", cells.len());
        cells
    }
}

impl<G: SeaGrid> Pathfinder for AstarPathfinder<G> {
    fn path(&self, start: Point, end: Point) -> Option<Path> {
        let range = self.graph.range();
        assert_in_range(range, start);
        assert_in_range(range, end);

        let grid = self.graph.grid();
        if !grid.is_navigable(start) || !grid.is_navigable(end) {
            return None;
        }
        if start == end {
            return Some(Path::single(start));
        }

        let start_idx = self.graph.index(start)?;
        let goal_idx = self.graph.index(end)?;
        self.search(start_idx, goal_idx)
    }
}

impl<G: SeaGrid> GridPathfinder for AstarPathfinder<G> {
    fn range(&self) -> Range {
        self.graph.range()
    }

    fn is_water(&self, p: Point) -> bool {
        self.grid().is_water(p)
    }

    fn is_navigable(&self, p: Point) -> bool {
        self.grid().is_navigable(p)
    }

    fn accessible_water_cells(&self, start: Point) -> CellSet {
        self.reachable_water_in(start, self.graph.range())
    }

    fn accessible_water_neighbours(&self, start: Point, radius: i32) -> CellSet {
        self.reachable_water_in(start, self.graph.range().around(start, radius))
    }
}
