//! Board cells, directions and sides

use serde::{Deserialize, Serialize};

/// Index of a cell in the flattened, row-major board sequence
pub type CellId = usize;

/// Glyph printed for an empty cell
pub const EMPTY_GLYPH: char = '.';

// ============================================================================
// SIDE
// ============================================================================

/// One of the two players
///
/// North starts in the top triangle and travels south; South starts in the
/// bottom triangle and travels north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    North = 0,
    South = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::North, Side::South];

    pub fn opponent(self) -> Self {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display glyph
    pub fn glyph(self) -> char {
        match self {
            Side::North => 'X',
            Side::South => 'O',
        }
    }
}

// ============================================================================
// DIRECTION
// ============================================================================

/// Neighbour direction labels
///
/// Index order is also the enumeration order used by move generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    L = 0,
    R = 1,
    UL = 2,
    UR = 3,
    DL = 4,
    DR = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::L,
        Direction::R,
        Direction::UL,
        Direction::UR,
        Direction::DL,
        Direction::DR,
    ];

    /// Direction pointing back along the same line
    pub fn opposite(self) -> Self {
        match self {
            Direction::L => Direction::R,
            Direction::R => Direction::L,
            Direction::UL => Direction::DR,
            Direction::DR => Direction::UL,
            Direction::UR => Direction::DL,
            Direction::DL => Direction::UR,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// CELL
// ============================================================================

/// A node of the board graph
#[derive(Clone, Debug, Default)]
pub struct Cell {
    pub(crate) occupant: Option<Side>,
    pub(crate) neighbours: [Option<CellId>; 6],
    /// Indexed by `[scheme][side]`
    pub(crate) potentials: [[i32; 2]; 2],
}

impl Cell {
    pub fn occupant(&self) -> Option<Side> {
        self.occupant
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn neighbour(&self, direction: Direction) -> Option<CellId> {
        self.neighbours[direction.index()]
    }

    /// Present neighbours in direction order
    pub fn neighbours(&self) -> impl Iterator<Item = (Direction, CellId)> + '_ {
        Direction::ALL
            .iter()
            .filter_map(move |&d| self.neighbours[d.index()].map(|n| (d, n)))
    }

    pub fn degree(&self) -> usize {
        self.neighbours.iter().filter(|n| n.is_some()).count()
    }

    pub fn glyph(&self) -> char {
        self.occupant.map_or(EMPTY_GLYPH, Side::glyph)
    }
}
