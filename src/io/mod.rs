use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::drone::Drone;
use crate::geo::Point2;
use crate::route::{Route, RouteRequest};
use crate::sim::Simulation;
use crate::terrain::Terrain;

/// On-disk heightmap document: `{"heights": [[...], ...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HeightmapFile {
    pub heights: Vec<Vec<f64>>,
}

pub fn read_terrain_json(reader: impl Read) -> Result<Terrain> {
    let doc: HeightmapFile = serde_json::from_reader(reader)?;
    Ok(Terrain::new(doc.heights)?)
}

/// Headerless CSV grid, one terrain row per record.
pub fn read_terrain_csv(reader: impl Read) -> Result<Terrain> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .context("non-numeric elevation sample")?;
        rows.push(row);
    }
    Ok(Terrain::new(rows)?)
}

/// Loads a heightmap, dispatching on the file extension (`.csv`, otherwise
/// JSON).
pub fn load_terrain(path: &Path) -> Result<Terrain> {
    let file = File::open(path).with_context(|| format!("failed to open heightmap {path:?}"))?;
    let reader = BufReader::new(file);
    let terrain = match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => read_terrain_csv(reader),
        _ => read_terrain_json(reader),
    };
    terrain.with_context(|| format!("failed to load heightmap {path:?}"))
}

/// One drone flight in a scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneSpec {
    pub origin: Point2,
    pub destination: Point2,
    pub start_time: f64,
}

impl DroneSpec {
    pub fn into_drone(self, speed: f64) -> Drone {
        Drone::new(self.origin, self.destination, self.start_time, speed)
    }
}

/// Scenario wiring: the drone schedule plus the route requests to answer.
#[derive(Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub drones: Vec<DroneSpec>,
    pub routes: Vec<RouteRequest>,
}

pub fn read_scenario(reader: impl Read) -> Result<Scenario> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let file = File::open(path).with_context(|| format!("failed to open scenario {path:?}"))?;
    read_scenario(BufReader::new(file))
        .with_context(|| format!("failed to parse scenario {path:?}"))
}

/// One answered route request. The path is the occupied `[x, y]` cell per
/// tick; an unreachable request keeps an empty path and a null cost.
#[derive(Debug, Serialize)]
pub struct RouteRecord {
    pub request: RouteRequest,
    pub path: Vec<[i64; 2]>,
    pub cost: f64,
    pub reachable: bool,
}

/// Everything needed to inspect or reproduce a run: the configuration that
/// produced the graph and every answered route.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub terrain_width: usize,
    pub terrain_height: usize,
    pub heights: Vec<Vec<f64>>,
    pub ticks: usize,
    pub drones: Vec<Drone>,
    pub routes: Vec<RouteRecord>,
}

impl RunReport {
    pub fn new(sim: &Simulation, results: &[(RouteRequest, Arc<Route>)]) -> Self {
        Self {
            terrain_width: sim.terrain().width(),
            terrain_height: sim.terrain().height(),
            heights: sim.terrain().rows(),
            ticks: sim.snapshots().len(),
            drones: sim.drones().to_vec(),
            routes: results
                .iter()
                .map(|(request, route)| RouteRecord {
                    request: *request,
                    path: route.cells.iter().map(|cell| [cell.x, cell.y]).collect(),
                    cost: route.cost,
                    reachable: route.is_reachable(),
                })
                .collect(),
        }
    }
}

pub fn save_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create report {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("failed to write report {path:?}"))
}
