use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{Cell, Point2};
use crate::graph::{NodeId, TimeExpandedGraph};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route endpoint {cell:?} is outside the terrain")]
    OutOfBounds { cell: Cell },
}

/// A safe traversal request between two continuous points; endpoints are
/// resolved to grid cells by floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: Point2,
    pub end: Point2,
}

/// Outcome of a safe-route query: the cell occupied at each tick, starting
/// at the requested start cell, plus the summed edge cost. An unreachable
/// destination is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub cells: Vec<Cell>,
    pub cost: f64,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            cells: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Plans the safe route for `request` against a finished graph.
///
/// Runs a single-source shortest-path search from the start cell at tick 0,
/// then scans the time slices in order and keeps the first one where the end
/// cell is reachable. This deliberately minimizes arrival time, not total
/// cost across the whole horizon: a cheaper path arriving later is never
/// preferred.
pub fn plan_route(graph: &TimeExpandedGraph, request: &RouteRequest) -> Result<Route, RouteError> {
    let start = resolve_cell(graph, request.start)?;
    let end = resolve_cell(graph, request.end)?;

    let source = graph.node_id(0, start.x as usize, start.y as usize);
    let paths = dijkstra(graph, source);

    for slice in 0..graph.slices() {
        let target = graph.node_id(slice, end.x as usize, end.y as usize);
        if paths.dist[target].is_finite() {
            return Ok(Route {
                cells: walk_back(graph, &paths, source, target),
                cost: paths.dist[target],
            });
        }
    }

    Ok(Route::unreachable())
}

fn resolve_cell(graph: &TimeExpandedGraph, point: Point2) -> Result<Cell, RouteError> {
    let cell = point.floor_cell();
    if cell.x < 0
        || cell.y < 0
        || cell.x as usize >= graph.width()
        || cell.y as usize >= graph.height()
    {
        return Err(RouteError::OutOfBounds { cell });
    }
    Ok(cell)
}

struct ShortestPaths {
    dist: Vec<f64>,
    prev: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap; node id breaks cost ties so the search
        // order is deterministic.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Dijkstra over the full graph. Weights are all 1.0 today, which makes
/// this equivalent to breadth-first order, but the search stays weighted so
/// non-uniform move costs keep working.
fn dijkstra(graph: &TimeExpandedGraph, source: NodeId) -> ShortestPaths {
    let mut dist = vec![f64::INFINITY; graph.node_count()];
    let mut prev = vec![NodeId::MAX; graph.node_count()];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(QueueEntry {
        cost: 0.0,
        node: source,
    });

    while let Some(QueueEntry { cost, node }) = heap.pop() {
        if cost > dist[node] {
            continue; // stale entry
        }
        for edge in graph.edges_from(node) {
            let next_cost = cost + edge.weight;
            if next_cost < dist[edge.target] {
                dist[edge.target] = next_cost;
                prev[edge.target] = node;
                heap.push(QueueEntry {
                    cost: next_cost,
                    node: edge.target,
                });
            }
        }
    }

    ShortestPaths { dist, prev }
}

fn walk_back(
    graph: &TimeExpandedGraph,
    paths: &ShortestPaths,
    source: NodeId,
    target: NodeId,
) -> Vec<Cell> {
    let mut ids = vec![target];
    let mut node = target;
    while node != source {
        node = paths.prev[node];
        ids.push(node);
    }
    ids.reverse();
    ids.into_iter()
        .map(|id| {
            let (_, x, y) = graph.node_coords(id);
            Cell::new(x as i64, y as i64)
        })
        .collect()
}
