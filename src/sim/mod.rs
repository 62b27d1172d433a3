use std::sync::Arc;

use crate::cache::RouteCache;
use crate::coverage::{self, CoverageError, VisibilitySnapshot};
use crate::drone::{Drone, DRONE_HEIGHT, DRONE_SPEED};
use crate::graph::TimeExpandedGraph;
use crate::route::{self, Route, RouteError, RouteRequest};
use crate::terrain::Terrain;

/// Tunable knobs for one simulation run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationParams {
    /// Drone travel speed in cells per tick.
    pub drone_speed: f64,
    /// Observer eye height above the terrain directly underneath.
    pub drone_height: f64,
    /// Defensive cap on the number of evaluated time slices.
    pub max_ticks: Option<usize>,
    /// Capacity of the per-run route cache.
    pub route_cache_size: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            drone_speed: DRONE_SPEED,
            drone_height: DRONE_HEIGHT,
            max_ticks: None,
            route_cache_size: 64,
        }
    }
}

/// A fully computed surveillance run: the terrain, the drone schedule, one
/// coverage raster per tick and the time-expanded movement graph derived
/// from them. Everything is immutable once built; route queries share it
/// freely.
pub struct Simulation {
    terrain: Terrain,
    drones: Vec<Drone>,
    snapshots: Vec<VisibilitySnapshot>,
    graph: TimeExpandedGraph,
    params: SimulationParams,
    routes: RouteCache,
}

impl Simulation {
    /// Runs the temporal discretizer, the snapshot builder and the graph
    /// builder once. Fails on an empty drone set; everything else about the
    /// run is a pure function of the inputs.
    pub fn new(
        terrain: Terrain,
        drones: Vec<Drone>,
        params: SimulationParams,
    ) -> Result<Self, CoverageError> {
        let snapshots =
            coverage::compute_snapshots(&terrain, &drones, params.drone_height, params.max_ticks)?;
        let graph = TimeExpandedGraph::build(&terrain, &snapshots);
        Ok(Self {
            routes: RouteCache::new(params.route_cache_size),
            terrain,
            drones,
            snapshots,
            graph,
            params,
        })
    }

    /// Answers a route request against the finished graph, through the
    /// route cache. Repeated requests for the same endpoint cells share one
    /// computed route.
    pub fn plan_route(&self, request: &RouteRequest) -> Result<Arc<Route>, RouteError> {
        let key = (request.start.floor_cell(), request.end.floor_cell());
        if let Some(route) = self.routes.get(&key) {
            return Ok(route);
        }
        let route = Arc::new(route::plan_route(&self.graph, request)?);
        self.routes.insert(key, route.clone());
        Ok(route)
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn snapshots(&self) -> &[VisibilitySnapshot] {
        &self.snapshots
    }

    pub fn graph(&self) -> &TimeExpandedGraph {
        &self.graph
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }
}
