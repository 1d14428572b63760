//! Star board: row layout, adjacency graph and occupancy
//!
//! The board is a hexagram of 121 cells in 17 rows. The graph is built once
//! by [`Board::new`] and only occupancy changes afterwards.

use std::ops::Range;

use crate::cell::{Cell, CellId, Direction, Side};
use crate::potential::{self, EvalScheme};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Cells per row, top to bottom
pub const ROW_LENGTHS: [usize; 17] = [1, 2, 3, 4, 13, 12, 11, 10, 9, 10, 11, 12, 13, 4, 3, 2, 1];

pub const NUM_ROWS: usize = ROW_LENGTHS.len();
pub const NUM_CELLS: usize = 121;

/// Pieces per side, also the size of each triangle
pub const PIECES_PER_SIDE: usize = 10;

/// Rows linked to the (one cell longer) row below: k -> k (DL), k + 1 (DR)
const WIDENING_DOWN_ROWS: [usize; 7] = [0, 1, 2, 8, 9, 10, 11];

/// Rows linked to the (one cell longer) row above: k -> k (UL), k + 1 (UR)
const WIDENING_UP_ROWS: [usize; 7] = [5, 6, 7, 8, 14, 15, 16];

/// Triangle rows that meet a 13-cell hexagon row
const UPPER_SEAM_ROW: usize = 3;
const LOWER_SEAM_ROW: usize = 13;

/// Hexagon-row index of the first cell under/over a seam triangle row
const SEAM_OFFSET: usize = 4;

const MIN_DEGREE: usize = 2;
const MAX_DEGREE: usize = 6;

// ============================================================================
// ERRORS
// ============================================================================

/// Construction and placement errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell {cell} already has a neighbour in direction {direction:?}")]
    DuplicateLink { cell: CellId, direction: Direction },

    #[error("cell {0} links to itself")]
    SelfLink(CellId),

    #[error("cell {cell} has {degree} neighbours, expected 2 to 6")]
    BadDegree { cell: CellId, degree: usize },

    #[error("link {from} -> {to} ({direction:?}) is not reciprocated")]
    Asymmetric { from: CellId, to: CellId, direction: Direction },

    #[error("{directed} directed links for {edges} edges")]
    LinkCount { directed: usize, edges: usize },

    #[error("cell {cell} has no path to goal apex {apex}")]
    Unreachable { cell: CellId, apex: CellId },

    #[error("{side:?} has {count} pieces, expected 10")]
    PieceCount { side: Side, count: usize },

    #[error("cell {0} is not on the board")]
    OutOfRange(CellId),

    #[error("cell {0} is occupied twice")]
    DoubleOccupancy(CellId),
}

// ============================================================================
// BOARD
// ============================================================================

/// The game board
///
/// Search mutates a board in place with [`Board::move_piece`] and restores it
/// with the inverse call. That protocol is not reentrant: one board, one
/// in-flight mutation sequence. Clone the board to search it concurrently.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>,
    rows: Vec<Range<CellId>>,
    row_of: Vec<usize>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Board with both sides in their home triangles
    pub fn new() -> Result<Self, BoardError> {
        let north: Vec<CellId> = Self::home_range(Side::North).collect();
        let south: Vec<CellId> = Self::home_range(Side::South).collect();
        Self::with_placement(&north, &south)
    }

    /// Board with the given ten cells per side occupied
    pub fn with_placement(north: &[CellId], south: &[CellId]) -> Result<Self, BoardError> {
        let mut board = Self::build_graph()?;

        for (side, cells) in [(Side::North, north), (Side::South, south)] {
            if cells.len() != PIECES_PER_SIDE {
                return Err(BoardError::PieceCount { side, count: cells.len() });
            }
            for &id in cells {
                if id >= NUM_CELLS {
                    return Err(BoardError::OutOfRange(id));
                }
                if board.cells[id].occupant.is_some() {
                    return Err(BoardError::DoubleOccupancy(id));
                }
                board.cells[id].occupant = Some(side);
            }
        }

        Ok(board)
    }

    /// Empty board with validated links and potentials
    fn build_graph() -> Result<Self, BoardError> {
        let mut rows = Vec::with_capacity(NUM_ROWS);
        let mut row_of = Vec::with_capacity(NUM_CELLS);
        let mut start = 0;
        for (row, &len) in ROW_LENGTHS.iter().enumerate() {
            rows.push(start..start + len);
            row_of.extend(std::iter::repeat(row).take(len));
            start += len;
        }

        let mut board = Self {
            cells: vec![Cell::default(); start],
            rows,
            row_of,
        };

        let edges = board.link_all()?;
        board.validate(edges)?;

        for scheme in EvalScheme::ALL {
            for side in Side::BOTH {
                let values = potential::compute(&board, side, scheme)?;
                for (cell, value) in board.cells.iter_mut().zip(values) {
                    cell.potentials[scheme.index()][side.index()] = value;
                }
            }
        }

        Ok(board)
    }

    // ========================================================================
    // GRAPH CONSTRUCTION
    // ========================================================================

    /// Link all neighbours, returning the number of undirected edges
    fn link_all(&mut self) -> Result<usize, BoardError> {
        let mut edges = 0;

        // Within each row
        for row in 0..NUM_ROWS {
            for col in 0..ROW_LENGTHS[row] - 1 {
                self.link(self.at(row, col), Direction::R, self.at(row, col + 1))?;
                edges += 1;
            }
        }

        // Row below is one longer
        for row in WIDENING_DOWN_ROWS {
            for col in 0..ROW_LENGTHS[row] {
                let cell = self.at(row, col);
                self.link(cell, Direction::DL, self.at(row + 1, col))?;
                self.link(cell, Direction::DR, self.at(row + 1, col + 1))?;
                edges += 2;
            }
        }

        // Row above is one longer
        for row in WIDENING_UP_ROWS {
            for col in 0..ROW_LENGTHS[row] {
                let cell = self.at(row, col);
                self.link(cell, Direction::UL, self.at(row - 1, col))?;
                self.link(cell, Direction::UR, self.at(row - 1, col + 1))?;
                edges += 2;
            }
        }

        // Triangle tips meeting the hexagon
        for col in 0..ROW_LENGTHS[UPPER_SEAM_ROW] {
            let cell = self.at(UPPER_SEAM_ROW, col);
            self.link(cell, Direction::DL, self.at(UPPER_SEAM_ROW + 1, col + SEAM_OFFSET))?;
            self.link(cell, Direction::DR, self.at(UPPER_SEAM_ROW + 1, col + SEAM_OFFSET + 1))?;
            edges += 2;
        }
        for col in 0..ROW_LENGTHS[LOWER_SEAM_ROW] {
            let cell = self.at(LOWER_SEAM_ROW, col);
            self.link(cell, Direction::UL, self.at(LOWER_SEAM_ROW - 1, col + SEAM_OFFSET))?;
            self.link(cell, Direction::UR, self.at(LOWER_SEAM_ROW - 1, col + SEAM_OFFSET + 1))?;
            edges += 2;
        }

        Ok(edges)
    }

    /// Add `from -> to` in `direction` and the reverse link in one step
    fn link(&mut self, from: CellId, direction: Direction, to: CellId) -> Result<(), BoardError> {
        if from == to {
            return Err(BoardError::SelfLink(from));
        }
        for (cell, dir, other) in [(from, direction, to), (to, direction.opposite(), from)] {
            let slot = &mut self.cells[cell].neighbours[dir.index()];
            if slot.is_some() {
                return Err(BoardError::DuplicateLink { cell, direction: dir });
            }
            *slot = Some(other);
        }
        Ok(())
    }

    fn validate(&self, edges: usize) -> Result<(), BoardError> {
        let mut directed = 0;

        for (id, cell) in self.cells.iter().enumerate() {
            let degree = cell.degree();
            if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
                return Err(BoardError::BadDegree { cell: id, degree });
            }
            directed += degree;

            for (direction, other) in cell.neighbours() {
                if other == id {
                    return Err(BoardError::SelfLink(id));
                }
                if self.cells[other].neighbour(direction.opposite()) != Some(id) {
                    return Err(BoardError::Asymmetric { from: id, to: other, direction });
                }
            }
        }

        if directed != 2 * edges {
            return Err(BoardError::LinkCount { directed, edges });
        }

        Ok(())
    }

    fn at(&self, row: usize, col: usize) -> CellId {
        self.rows[row].start + col
    }

    // ========================================================================
    // LAYOUT
    // ========================================================================

    /// Home triangle cells of a side (the opponent's goal)
    fn home_range(side: Side) -> Range<CellId> {
        match side {
            Side::North => 0..PIECES_PER_SIDE,
            Side::South => NUM_CELLS - PIECES_PER_SIDE..NUM_CELLS,
        }
    }

    /// Cells `side` starts in
    pub fn home(&self, side: Side) -> Range<CellId> {
        Self::home_range(side)
    }

    /// Cells `side` must fill to win
    pub fn goal(&self, side: Side) -> Range<CellId> {
        Self::home_range(side.opponent())
    }

    pub fn in_goal(&self, side: Side, cell: CellId) -> bool {
        self.goal(side).contains(&cell)
    }

    /// Tip of the goal triangle, farthest from the side's home
    pub fn goal_apex(&self, side: Side) -> CellId {
        match side {
            Side::North => NUM_CELLS - 1,
            Side::South => 0,
        }
    }

    /// Cell ranges of each row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = Range<CellId>> + '_ {
        self.rows.iter().cloned()
    }

    pub fn row(&self, row: usize) -> Range<CellId> {
        self.rows[row].clone()
    }

    pub fn row_of(&self, cell: CellId) -> usize {
        self.row_of[cell]
    }

    pub fn column_of(&self, cell: CellId) -> usize {
        cell - self.rows[self.row_of[cell]].start
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // ========================================================================
    // CELL QUERIES
    // ========================================================================

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id]
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.cells.iter().enumerate()
    }

    pub fn occupant(&self, id: CellId) -> Option<Side> {
        self.cells[id].occupant
    }

    pub fn is_vacant(&self, id: CellId) -> bool {
        self.cells[id].is_empty()
    }

    pub fn neighbour(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.cells[id].neighbour(direction)
    }

    pub fn potential(&self, id: CellId, side: Side, scheme: EvalScheme) -> i32 {
        self.cells[id].potentials[scheme.index()][side.index()]
    }

    /// Cells holding a piece of `side`, in board order
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = CellId> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.occupant == Some(side))
            .map(|(id, _)| id)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupant.is_some()).count()
    }

    // ========================================================================
    // GAME STATE
    // ========================================================================

    /// All ten pieces of `side` sit in its goal triangle
    pub fn has_won(&self, side: Side) -> bool {
        self.goal(side).all(|id| self.cells[id].occupant == Some(side))
    }

    pub fn winner(&self) -> Option<Side> {
        Side::BOTH.into_iter().find(|&side| self.has_won(side))
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Move the piece on `from` to `to`
    ///
    /// Fails without touching the board when `to` is occupied or `from` is
    /// empty. `move_piece(to, from)` undoes a successful call.
    pub fn move_piece(&mut self, from: CellId, to: CellId) -> bool {
        if from == to || self.cells[to].occupant.is_some() {
            return false;
        }
        match self.cells[from].occupant.take() {
            Some(side) => {
                self.cells[to].occupant = Some(side);
                true
            }
            None => false,
        }
    }
}
