use serde::{Deserialize, Serialize};

/// A continuous position on the terrain plane, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The grid cell containing this point.
    pub fn floor_cell(&self) -> Cell {
        Cell::new(self.x.floor() as i64, self.y.floor() as i64)
    }
}

/// An integer grid cell. Signed so rasterized lines can be expressed before
/// any bounds check is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The continuous point the rasterizer maps this cell to.
    pub fn as_point(&self) -> Point2 {
        Point2::new(self.x as f64, self.y as f64)
    }
}
