use itertools::iproduct;
use rayon::prelude::*;

use crate::coverage::VisibilitySnapshot;
use crate::terrain::Terrain;

/// The nine moves a ground agent can make between consecutive ticks:
/// staying put, or stepping to one of the eight neighbours.
pub const MOVE_OFFSETS: [(i64, i64); 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub type NodeId = usize;

/// A directed, weighted edge into the next time slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// Time-expanded movement graph over `(tick, x, y)` triples.
///
/// Node identity is the bijection `id = tick*W*H + y*W + x`, which doubles
/// as the arena index: every id below `node_count()` is a node, isolated or
/// not, and only the outgoing adjacency is stored. Edges always lead from
/// slice `t` into slice `t + 1`, so the graph is a DAG by construction.
#[derive(Debug, Clone)]
pub struct TimeExpandedGraph {
    width: usize,
    height: usize,
    slices: usize,
    adjacency: Vec<Vec<Edge>>,
}

impl TimeExpandedGraph {
    /// Builds the graph from one coverage snapshot per tick.
    ///
    /// For every cell unobserved at tick `t`, each of the nine in-bounds
    /// moves landing on a cell unobserved at `t + 1` becomes a unit-weight
    /// edge. Observed cells originate nothing: an agent caught in the open
    /// has no safe move. Edge blocks of different slices are independent,
    /// so they are built in parallel and assembled in id order.
    pub fn build(terrain: &Terrain, snapshots: &[VisibilitySnapshot]) -> Self {
        let width = terrain.width();
        let height = terrain.height();
        let slices = snapshots.len();
        let per_slice = width * height;

        let blocks: Vec<Vec<Vec<Edge>>> = (0..slices.saturating_sub(1))
            .into_par_iter()
            .map(|slice| slice_edges(width, height, slice, &snapshots[slice], &snapshots[slice + 1]))
            .collect();

        let mut adjacency: Vec<Vec<Edge>> = Vec::with_capacity(per_slice * slices);
        for block in blocks {
            adjacency.extend(block);
        }
        // the last slice has no outgoing edges but its nodes still exist
        adjacency.resize_with(per_slice * slices, Vec::new);

        Self {
            width,
            height,
            slices,
            adjacency,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of time slices (ticks) the graph spans.
    pub fn slices(&self) -> usize {
        self.slices
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// `id = slice*W*H + y*W + x`.
    pub fn node_id(&self, slice: usize, x: usize, y: usize) -> NodeId {
        debug_assert!(x < self.width && y < self.height && slice < self.slices);
        slice * self.width * self.height + y * self.width + x
    }

    /// Inverse of [`TimeExpandedGraph::node_id`]; exact for every valid id.
    pub fn node_coords(&self, id: NodeId) -> (usize, usize, usize) {
        let per_slice = self.width * self.height;
        let slice = id / per_slice;
        let local = id - slice * per_slice;
        let y = local / self.width;
        let x = local - y * self.width;
        (slice, x, y)
    }

    pub fn edges_from(&self, id: NodeId) -> &[Edge] {
        &self.adjacency[id]
    }
}

/// Outgoing edge lists for every node of one slice, in id order.
fn slice_edges(
    width: usize,
    height: usize,
    slice: usize,
    current: &VisibilitySnapshot,
    next: &VisibilitySnapshot,
) -> Vec<Vec<Edge>> {
    let per_slice = width * height;
    iproduct!(0..height, 0..width)
        .map(|(y, x)| {
            if current.is_visible(x, y) {
                return Vec::new();
            }
            let mut edges = Vec::new();
            for (dx, dy) in MOVE_OFFSETS {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                if !next.is_visible(nx as usize, ny as usize) {
                    edges.push(Edge {
                        target: (slice + 1) * per_slice + ny as usize * width + nx as usize,
                        weight: 1.0,
                    });
                }
            }
            edges
        })
        .collect()
}
