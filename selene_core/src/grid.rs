// selene_core/src/grid.rs

use crate::error::{HmmError, Result};
use crate::types::{Location, Symbol};

// --- Grid Trait ---
// The contract for anything that can describe the world the agent moves in.
// The maze file reader in the sim crate produces one, as do the test fixtures.
pub trait Grid {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Total number of cells, walkable or not.
    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// `true` if `(x, y)` lies on the grid and is not blocked.
    fn is_walkable(&self, x: usize, y: usize) -> bool;

    /// The label a perfect sensor would report at `(x, y)`.
    /// Returns `None` for blocked or out-of-bounds cells.
    fn label_at(&self, x: usize, y: usize) -> Option<Symbol>;
}

/// A dense, in-memory grid. Cells are stored row-major with `y = 0` first;
/// `None` marks a blocked cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<Symbol>>,
}

impl LabeledGrid {
    /// Creates a grid from row-major cells (`index = y * width + x`).
    pub fn new(width: usize, height: usize, cells: Vec<Option<Symbol>>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(HmmError::config(format!(
                "grid of {}x{} needs {} cells, got {}",
                width,
                height,
                width * height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid from rows listed bottom-up (`rows[0]` is `y = 0`).
    pub fn from_rows(rows: Vec<Vec<Option<Symbol>>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            return Err(HmmError::config(format!(
                "row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// A grid with every cell walkable.
    pub fn open(width: usize, height: usize, labels: Vec<Symbol>) -> Result<Self> {
        Self::new(width, height, labels.into_iter().map(Some).collect())
    }

    fn cell(&self, location: Location) -> Option<Symbol> {
        if location.x >= self.width || location.y >= self.height {
            return None;
        }
        self.cells[location.y * self.width + location.x]
    }
}

impl Grid for LabeledGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_walkable(&self, x: usize, y: usize) -> bool {
        self.cell(Location::new(x, y)).is_some()
    }

    fn label_at(&self, x: usize, y: usize) -> Option<Symbol> {
        self.cell(Location::new(x, y))
    }
}
