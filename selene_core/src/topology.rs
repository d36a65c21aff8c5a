// selene_core/src/topology.rs

use crate::error::{HmmError, Result};
use crate::grid::Grid;
use crate::types::{Direction, Location, State};

/// The enumerated state space of a grid plus its movement graph.
///
/// Walkable cells become states `0..N` in row-major order of
/// `y * width + x`, starting from the bottom row. The mapping is fixed at
/// construction. For every state we keep where each of the four attempted
/// moves lands, with `None` for a wall or the grid edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    width: usize,
    height: usize,
    /// `locations[state]` is the cell that state stands for.
    locations: Vec<Location>,
    /// Row-major lookup `y * width + x -> state` (`None` for blocked cells).
    states: Vec<Option<State>>,
    /// `moves[state][direction.index()]`.
    moves: Vec<[Option<State>; Direction::COUNT]>,
}

impl Topology {
    /// Enumerates the walkable cells of `grid` and resolves their neighbors.
    ///
    /// Fails with `HmmError::Configuration` if the grid has no walkable cell.
    pub fn from_grid(grid: &dyn Grid) -> Result<Self> {
        let (width, height) = (grid.width(), grid.height());

        let mut locations = Vec::new();
        let mut states = vec![None; width * height];
        for y in 0..height {
            for x in 0..width {
                if grid.is_walkable(x, y) {
                    states[y * width + x] = Some(locations.len());
                    locations.push(Location::new(x, y));
                }
            }
        }

        if locations.is_empty() {
            return Err(HmmError::config(format!(
                "grid of {}x{} has no walkable cells",
                width, height
            )));
        }

        let moves = locations
            .iter()
            .map(|&loc| {
                Direction::ALL.map(|dir| {
                    loc.offset(dir, width, height)
                        .and_then(|next| states[next.y * width + next.x])
                })
            })
            .collect();

        Ok(Self {
            width,
            height,
            locations,
            states,
            moves,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `N`, the number of walkable cells.
    pub fn num_states(&self) -> usize {
        self.locations.len()
    }

    /// The cell a state stands for.
    ///
    /// # Panics
    /// Panics if `state >= num_states()`.
    pub fn location_of(&self, state: State) -> Location {
        self.locations[state]
    }

    /// The state of the walkable cell at `(x, y)`, if there is one.
    pub fn state_at(&self, x: usize, y: usize) -> Option<State> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.states[y * self.width + x]
    }

    /// Where an attempted move in `direction` from `state` lands, or `None`
    /// if it bumps into a wall or the edge.
    pub fn neighbor(&self, state: State, direction: Direction) -> Option<State> {
        self.moves[state][direction.index()]
    }

    /// All states reachable from `state` in one legal move.
    pub fn neighbors(&self, state: State) -> impl Iterator<Item = State> + '_ {
        self.moves[state].iter().flatten().copied()
    }

    /// Applies an attempted move. An illegal move leaves the agent in place.
    /// The transition model and the scenario generator both rely on this rule.
    pub fn step(&self, state: State, direction: Direction) -> State {
        self.neighbor(state, direction).unwrap_or(state)
    }

    /// How many of the four attempted moves from `state` are illegal.
    pub fn blocked_moves(&self, state: State) -> usize {
        self.moves[state].iter().filter(|m| m.is_none()).count()
    }
}
