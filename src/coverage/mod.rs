use itertools::iproduct;
use rayon::prelude::*;
use thiserror::Error;

use crate::drone::Drone;
use crate::geo::Cell;
use crate::physics::los::cast_sight_line;
use crate::terrain::Terrain;

#[derive(Debug, Error)]
pub enum CoverageError {
    /// The observation window is undefined without at least one drone.
    #[error("cannot discretize time for an empty drone set")]
    NoDrones,
}

/// Boolean coverage raster over the full terrain for one discrete tick.
/// Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySnapshot {
    width: usize,
    height: usize,
    cells: Vec<bool>, // row-major
}

impl VisibilitySnapshot {
    fn all_hidden(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    #[inline]
    pub fn is_visible(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    #[inline]
    fn mark(&mut self, cell: Cell) {
        self.cells[cell.y as usize * self.width + cell.x as usize] = true;
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|v| **v).count()
    }
}

/// Observation window `(min start, max end)` across the whole drone set.
pub fn time_window(drones: &[Drone]) -> Result<(f64, f64), CoverageError> {
    let mut iter = drones.iter();
    let first = iter.next().ok_or(CoverageError::NoDrones)?;
    let mut min_start = first.start_time;
    let mut max_end = first.end_time;
    for drone in iter {
        min_start = min_start.min(drone.start_time);
        max_end = max_end.max(drone.end_time);
    }
    Ok((min_start, max_end))
}

/// Computes the coverage raster for a single tick.
///
/// Sight lines are cast only towards cells not yet marked, but every cell on
/// a clear line is marked along the way regardless of which target triggered
/// the cast. Marking is a monotonic OR, so the skip cannot change the final
/// raster.
pub fn compute_snapshot(
    terrain: &Terrain,
    drones: &[Drone],
    tick: f64,
    eye_height: f64,
) -> VisibilitySnapshot {
    let mut snapshot = VisibilitySnapshot::all_hidden(terrain.width(), terrain.height());

    for (x, y) in iproduct!(0..terrain.width(), 0..terrain.height()) {
        if snapshot.is_visible(x, y) {
            continue;
        }
        let target = Cell::new(x as i64, y as i64);
        for drone in drones {
            if !drone.exists_at(tick) {
                continue;
            }
            let eye = drone.position_at(tick);
            if let Some(line) = cast_sight_line(terrain, eye, target, eye_height) {
                for cell in line {
                    snapshot.mark(cell);
                }
            }
        }
    }

    snapshot
}

/// One snapshot per tick, from 0 through `floor(max end time)` inclusive.
///
/// Ticks before the first drone launches still produce a raster (all
/// hidden, fully safe). `max_ticks` defensively caps the number of
/// evaluated slices for large horizons. Slices only depend on their own
/// tick, so they are computed in parallel.
pub fn compute_snapshots(
    terrain: &Terrain,
    drones: &[Drone],
    eye_height: f64,
    max_ticks: Option<usize>,
) -> Result<Vec<VisibilitySnapshot>, CoverageError> {
    let (min_start, max_end) = time_window(drones)?;
    debug_assert!(min_start <= max_end);

    let mut last_tick = max_end.floor() as usize;
    if let Some(cap) = max_ticks {
        last_tick = last_tick.min(cap.saturating_sub(1));
    }

    Ok((0..=last_tick)
        .into_par_iter()
        .map(|tick| compute_snapshot(terrain, drones, tick as f64, eye_height))
        .collect())
}
