use crate::geo::{Cell, Point2};

/// Rasterizes the segment `p -> q` into an ordered sequence of grid cells.
///
/// Error-accumulator line stepping along the dominant axis, starting at
/// `floor(p)` and ending at `floor(q)`; a degenerate segment yields a single
/// cell. When the accumulated error lands exactly on the threshold after a
/// minor-axis step, both staircase cells around the diagonal jump are
/// emitted: a sight line tested cell-by-cell must not skip the two cells
/// actually adjacent to the true line.
pub fn raster_line(p: Point2, q: Point2) -> Vec<Cell> {
    let start = p.floor_cell();
    let end = q.floor_cell();

    let mut dx = end.x - start.x;
    let mut dy = end.y - start.y;
    let xstep = if dx < 0 {
        dx = -dx;
        -1
    } else {
        1
    };
    let ystep = if dy < 0 {
        dy = -dy;
        -1
    } else {
        1
    };
    let ddx = 2 * dx;
    let ddy = 2 * dy;

    let mut cells = Vec::with_capacity((dx + dy + 1) as usize);
    cells.push(start);

    let mut x = start.x;
    let mut y = start.y;

    if ddx >= ddy {
        let mut error = dx;
        let mut errorprev = error;
        for _ in 0..dx {
            x += xstep;
            error += ddy;
            if error > ddx {
                y += ystep;
                error -= ddx;
                if error + errorprev < ddx {
                    cells.push(Cell::new(x, y - ystep));
                } else if error + errorprev > ddx {
                    cells.push(Cell::new(x - xstep, y));
                } else {
                    // exact tie: emit the full staircase
                    cells.push(Cell::new(x, y - ystep));
                    cells.push(Cell::new(x - xstep, y));
                }
            }
            cells.push(Cell::new(x, y));
            errorprev = error;
        }
    } else {
        let mut error = dy;
        let mut errorprev = error;
        for _ in 0..dy {
            y += ystep;
            error += ddx;
            if error > ddy {
                x += xstep;
                error -= ddy;
                if error + errorprev < ddy {
                    cells.push(Cell::new(x - xstep, y));
                } else if error + errorprev > ddy {
                    cells.push(Cell::new(x, y - ystep));
                } else {
                    cells.push(Cell::new(x - xstep, y));
                    cells.push(Cell::new(x, y - ystep));
                }
            }
            cells.push(Cell::new(x, y));
            errorprev = error;
        }
    }

    cells
}
