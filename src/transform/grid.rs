//! Grid alignment.

use crate::error::{Error, Result};
use crate::units;
use serde::{Deserialize, Serialize};

/// Snaps geometry down to multiples of a fixed cell.
///
/// Snapping floors: `floor(value / cell) * cell`, so values never move
/// toward the next grid line and re-snapping is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnap {
    /// Cell size in EMU.
    cell: i64,
}

impl GridSnap {
    /// Default grid cell: 0.1 inch.
    pub const DEFAULT_CELL: i64 = units::EMU_PER_INCH / 10;

    /// Create a grid with the given cell size in EMU.
    pub fn new(cell: i64) -> Result<Self> {
        if cell > 0 {
            Ok(Self { cell })
        } else {
            Err(Error::InvalidGrid(cell))
        }
    }

    /// Create a grid with the cell size given in inches.
    pub fn from_inches(inches: f64) -> Result<Self> {
        Self::new(units::emu_from_inches(inches))
    }

    /// Cell size in EMU.
    pub fn cell(&self) -> i64 {
        self.cell
    }

    /// Snap a value down to the grid.
    pub fn snap(&self, value: i64) -> i64 {
        value.div_euclid(self.cell) * self.cell
    }
}

impl Default for GridSnap {
    fn default() -> Self {
        Self {
            cell: Self::DEFAULT_CELL,
        }
    }
}
