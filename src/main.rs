use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use drone_coverage::io::{self, RunReport};
use drone_coverage::sim::{Simulation, SimulationParams};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: drone_coverage <terrain.{{json,csv}}> <scenario.json> [report.json]");
    }
    let report_path = Path::new(args.get(2).map(String::as_str).unwrap_or("results/report.json"));

    let terrain = io::load_terrain(Path::new(&args[0]))?;
    let scenario = io::load_scenario(Path::new(&args[1]))?;
    println!(
        "Terrain {}x{}, {} drones, {} route requests",
        terrain.width(),
        terrain.height(),
        scenario.drones.len(),
        scenario.routes.len()
    );

    let params = SimulationParams::default();
    let drones = scenario
        .drones
        .iter()
        .cloned()
        .map(|spec| spec.into_drone(params.drone_speed))
        .collect();
    let sim = Simulation::new(terrain, drones, params)?;
    println!(
        "Computed {} coverage slices; graph has {} nodes, {} edges",
        sim.snapshots().len(),
        sim.graph().node_count(),
        sim.graph().edge_count()
    );

    let mut results = Vec::new();
    for request in &scenario.routes {
        let route = sim.plan_route(request)?;
        if route.is_reachable() {
            println!(
                "Route ({:.1}, {:.1}) -> ({:.1}, {:.1}): {} cells, cost {}",
                request.start.x,
                request.start.y,
                request.end.x,
                request.end.y,
                route.cells.len(),
                route.cost
            );
        } else {
            println!(
                "Route ({:.1}, {:.1}) -> ({:.1}, {:.1}): unreachable within {} ticks",
                request.start.x,
                request.start.y,
                request.end.x,
                request.end.y,
                sim.snapshots().len()
            );
        }
        results.push((*request, route));
    }

    if let Some(dir) = report_path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create report directory {dir:?}"))?;
        }
    }
    io::save_report(report_path, &RunReport::new(&sim, &results))?;
    println!("Report written to {}", report_path.display());

    Ok(())
}
