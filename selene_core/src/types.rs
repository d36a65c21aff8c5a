// selene_core/src/types.rs

use serde::{Deserialize, Serialize};

// --- Core Type Aliases ---
/// Index of one walkable cell in the enumerated state space `0..N`.
pub type State = usize;
/// Index of one observable label in the sensor alphabet `0..K`.
pub type Symbol = usize;

// --- Core Identifier ---
/// A cell coordinate on the grid. `y = 0` is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`, or `None` if that would leave
    /// the `width x height` bounds.
    pub fn offset(self, direction: Direction, width: usize, height: usize) -> Option<Location> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Location { x, y })
    }
}

/// The four axis-aligned moves an agent may attempt at every time step.
/// Each one is attempted with equal probability, whether or not it is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// Number of attempted moves per step; every attempt has probability `1 / COUNT`.
    pub const COUNT: usize = 4;

    /// `(dx, dy)` of the move. North is `+y`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, 1),
            Direction::West => (-1, 0),
            Direction::South => (0, -1),
        }
    }

    /// Position of this direction inside `Direction::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}
