use crate::geo::{Cell, Point2};
use crate::physics::raster::raster_line;
use crate::terrain::Terrain;

/// Casts a sight line from a continuous eye position to a target cell.
///
/// The segment is rasterized and every cell on it is tested against the
/// straight sightline interpolated between the observer eye (terrain height
/// under the eye plus `eye_height`) and the target's ground height, weighted
/// by the distance ratio `d(cell, target) / d(target, eye)`. Terrain
/// strictly above the sightline blocks.
///
/// The first obstruction ends the cast and the whole line reports blocked
/// (`None`); cells beyond the blocker are left unresolved rather than tested
/// individually. A clear line returns every rasterized cell, so one cast can
/// resolve many cells at once.
///
/// Precondition: the whole segment lies inside the terrain rectangle.
pub fn cast_sight_line(
    terrain: &Terrain,
    eye: Point2,
    target: Cell,
    eye_height: f64,
) -> Option<Vec<Cell>> {
    let target_pt = target.as_point();
    let eye_level = terrain.height_under(eye) + eye_height;
    let target_ground = terrain.height_at(target.x as usize, target.y as usize);

    let cells = raster_line(eye, target_pt);

    let span = target_pt.distance_to(eye);
    if span == 0.0 {
        return Some(cells);
    }

    for &cell in &cells {
        let ratio = cell.as_point().distance_to(target_pt) / span;
        let sightline = (eye_level - target_ground) * ratio + target_ground;
        if terrain.height_at(cell.x as usize, cell.y as usize) > sightline {
            return None;
        }
    }

    Some(cells)
}
