// selene_sim/src/simulation/maze.rs

//! Reads maze text files into a `LabeledGrid`.
//!
//! One line per row, all of equal width. The last line is `y = 0`, so the
//! file reads like a map with north at the top. The wall character marks a
//! blocked cell; every other character must be one of the alphabet's labels.

use selene_core::grid::LabeledGrid;
use selene_core::types::Symbol;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::simulation::config::MazeConfig;
use crate::simulation::error::SimError;

/// The sensor's labels, in symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    labels: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from a string of distinct characters, none of them `wall`.
    pub fn new(labels: &str, wall: char) -> Result<Self, SimError> {
        let labels: Vec<char> = labels.chars().collect();
        if labels.len() < 2 {
            return Err(SimError::InvalidScenario(format!(
                "alphabet {:?} needs at least two labels",
                labels.iter().collect::<String>()
            )));
        }
        for (i, c) in labels.iter().enumerate() {
            if *c == wall {
                return Err(SimError::InvalidScenario(format!(
                    "alphabet label {:?} is also the wall character",
                    c
                )));
            }
            if labels[..i].contains(c) {
                return Err(SimError::InvalidScenario(format!(
                    "alphabet label {:?} appears twice",
                    c
                )));
            }
        }
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn symbol_of(&self, label: char) -> Option<Symbol> {
        self.labels.iter().position(|&c| c == label)
    }

    /// The character for `symbol`, or `'?'` if it is outside the alphabet.
    pub fn label_of(&self, symbol: Symbol) -> char {
        self.labels.get(symbol).copied().unwrap_or('?')
    }
}

/// A maze file format: its alphabet and wall character.
#[derive(Debug, Clone)]
pub struct MazeReader {
    pub alphabet: Alphabet,
    pub wall: char,
}

impl MazeReader {
    pub fn new(alphabet: Alphabet, wall: char) -> Self {
        Self { alphabet, wall }
    }

    pub fn from_config(config: &MazeConfig) -> Result<Self, SimError> {
        Ok(Self::new(Alphabet::new(&config.alphabet, config.wall)?, config.wall))
    }

    pub fn read_file(&self, path: &Path) -> Result<LabeledGrid, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&text)
    }

    pub fn parse(&self, text: &str) -> Result<LabeledGrid, SimError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(SimError::Maze {
                line: 1,
                message: "maze is empty".to_string(),
            });
        }

        let width = lines[0].chars().count();
        let mut rows = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let line_no = i + 1;
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, c)| self.cell(c, line_no, col + 1))
                .collect::<Result<Vec<_>, _>>()?;
            if cells.len() != width {
                return Err(SimError::Maze {
                    line: line_no,
                    message: format!("expected {} cells, found {}", width, cells.len()),
                });
            }
            rows.push(cells);
        }

        // The first line of the file is the top row.
        rows.reverse();
        let grid = LabeledGrid::from_rows(rows)?;
        debug!("Parsed maze of {}x{}", width, lines.len());
        Ok(grid)
    }

    fn cell(&self, c: char, line: usize, column: usize) -> Result<Option<Symbol>, SimError> {
        if c == self.wall {
            return Ok(None);
        }
        self.alphabet
            .symbol_of(c)
            .map(Some)
            .ok_or_else(|| SimError::Maze {
                line,
                message: format!("column {}: {:?} is neither a wall nor a label", column, c),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selene_core::grid::Grid;

    fn reader() -> MazeReader {
        MazeReader::new(Alphabet::new("rgby", 'X').unwrap(), 'X')
    }

    #[test]
    fn last_line_is_the_bottom_row() {
        let grid = reader().parse("rgX\nybr\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        // Bottom row: y b r
        assert_eq!(grid.label_at(0, 0), Some(3));
        assert_eq!(grid.label_at(1, 0), Some(2));
        // Top row: r g X
        assert_eq!(grid.label_at(0, 1), Some(0));
        assert!(!grid.is_walkable(2, 1));
    }

    #[test]
    fn windows_line_endings_and_trailing_blank_lines_are_fine() {
        let grid = reader().parse("rg\r\nby\r\n\r\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.label_at(1, 1), Some(1));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = reader().parse("rgb\nry\n").unwrap_err();
        assert!(matches!(err, SimError::Maze { line: 2, .. }));
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let err = reader().parse("rg\nbq\n").unwrap_err();
        assert!(matches!(err, SimError::Maze { line: 2, .. }));
    }

    #[test]
    fn empty_maze_is_rejected() {
        assert!(matches!(reader().parse("\n\n"), Err(SimError::Maze { .. })));
    }

    #[test]
    fn alphabet_validation() {
        assert!(Alphabet::new("r", 'X').is_err());
        assert!(Alphabet::new("rgr", 'X').is_err());
        assert!(Alphabet::new("rgX", 'X').is_err());
        let alphabet = Alphabet::new("rgby", 'X').unwrap();
        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.symbol_of('b'), Some(2));
        assert_eq!(alphabet.label_of(3), 'y');
        assert_eq!(alphabet.label_of(9), '?');
    }

    #[test]
    fn bundled_mazes_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/mazes");
        for name in ["2x2_open.maz", "4x4_wall.maz", "5x5_rooms.maz"] {
            let grid = reader().read_file(&dir.join(name)).unwrap();
            assert!(grid.cell_count() > 0, "{}", name);
        }
    }
}
