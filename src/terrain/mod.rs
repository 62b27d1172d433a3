use thiserror::Error;

use crate::geo::{Cell, Point2};

/// Ground resolution of one grid cell, in meters.
pub const CELL_SIZE_METERS: f64 = 50.0;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("height grid is empty")]
    Empty,
    #[error("height grid is ragged: row {row} has {len} samples, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Immutable heightfield: a rectangular grid of elevation samples addressed
/// by integer cell, `(0, 0)` in the top-left corner.
#[derive(Debug, Clone)]
pub struct Terrain {
    width: usize,
    height: usize,
    heights: Vec<f64>, // row-major
}

impl Terrain {
    /// Builds a terrain from elevation rows. Rejects empty and ragged input;
    /// width and height are derived from the data.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, TerrainError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(TerrainError::Empty);
        }
        let width = rows[0].len();
        let mut heights = Vec::with_capacity(rows.len() * width);
        for (row, samples) in rows.iter().enumerate() {
            if samples.len() != width {
                return Err(TerrainError::Ragged {
                    row,
                    len: samples.len(),
                    expected: width,
                });
            }
            heights.extend_from_slice(samples);
        }
        Ok(Self {
            width,
            height: rows.len(),
            heights,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Elevation at a cell known to be in bounds. Panics otherwise.
    #[inline(always)]
    pub fn height_at(&self, x: usize, y: usize) -> f64 {
        self.heights[y * self.width + x]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    pub fn get(&self, cell: Cell) -> Option<f64> {
        self.contains(cell)
            .then(|| self.height_at(cell.x as usize, cell.y as usize))
    }

    /// Elevation of the cell under a continuous point.
    pub fn height_under(&self, p: Point2) -> f64 {
        let cell = p.floor_cell();
        self.height_at(cell.x as usize, cell.y as usize)
    }

    /// The elevation grid as rows, the shape it was ingested in.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.heights.chunks(self.width).map(<[f64]>::to_vec).collect()
    }
}
