//! Move generation: steps and jump chains
//!
//! A piece either steps to an empty neighbour or jumps over an occupied
//! neighbour into the empty cell beyond, in the same direction. Jumps chain
//! from the landing cell. The moving piece counts as lifted off its origin
//! while a chain is explored, so it can neither jump over nor land on it.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cell::{CellId, Direction, Side};
use crate::filter::MoveFilter;

/// A move of one piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: CellId,
    pub to: CellId,
}

impl Move {
    pub const fn new(from: CellId, to: CellId) -> Self {
        Self { from, to }
    }

    pub fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

// ============================================================================
// DESTINATIONS
// ============================================================================

/// Legal destinations of one piece
///
/// Finite and single-use; enumerate again to start over.
#[derive(Debug)]
pub struct Destinations {
    inner: std::vec::IntoIter<CellId>,
}

impl Iterator for Destinations {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Destinations {}

/// Search state of one enumeration
struct Walk<'a> {
    board: &'a Board,
    origin: CellId,
    jumped_from: FxHashSet<CellId>,
    found: FxHashSet<CellId>,
    out: Vec<CellId>,
}

impl Walk<'_> {
    fn is_free(&self, cell: CellId) -> bool {
        cell == self.origin || self.board.is_vacant(cell)
    }

    fn emit(&mut self, cell: CellId) {
        if cell != self.origin && self.found.insert(cell) {
            self.out.push(cell);
        }
    }

    /// Depth-first over steps (first hop only) and jump chains
    fn explore(&mut self, cell: CellId, only_jumps: bool) {
        if !self.jumped_from.insert(cell) {
            return;
        }

        for direction in Direction::ALL {
            let Some(over) = self.board.neighbour(cell, direction) else {
                continue;
            };

            if self.is_free(over) {
                if !only_jumps {
                    self.emit(over);
                }
                continue;
            }

            let Some(landing) = self.board.neighbour(over, direction) else {
                continue;
            };
            if landing == self.origin || !self.board.is_vacant(landing) {
                continue;
            }

            self.emit(landing);
            self.explore(landing, true);
        }
    }
}

/// Every cell the piece on `origin` can reach this turn
///
/// # Panics
///
/// If `origin` is empty. Only ask about cells holding a piece.
pub fn destinations(board: &Board, origin: CellId) -> Destinations {
    let side = board
        .occupant(origin)
        .unwrap_or_else(|| panic!("no piece on cell {} to generate moves for", origin));

    let mut walk = Walk {
        board,
        origin,
        jumped_from: FxHashSet::default(),
        found: FxHashSet::default(),
        out: Vec::new(),
    };
    walk.explore(origin, false);

    let mut out = walk.out;

    // A piece that has arrived may only shuffle inside the goal triangle
    if board.in_goal(side, origin) {
        out.retain(|&cell| board.in_goal(side, cell));
    }

    Destinations { inner: out.into_iter() }
}

/// Destinations that also pass `filter`, when one is given
pub fn filtered_destinations(
    board: &Board,
    origin: CellId,
    filter: Option<&dyn MoveFilter>,
) -> Vec<CellId> {
    match filter {
        Some(filter) => destinations(board, origin)
            .filter(|&to| filter.allows(board, origin, to))
            .collect(),
        None => destinations(board, origin).collect(),
    }
}

/// Pieces of `side` with at least one legal destination, in board order
pub fn movable_pieces(board: &Board, side: Side) -> Vec<CellId> {
    board
        .pieces(side)
        .filter(|&cell| destinations(board, cell).next().is_some())
        .collect()
}

/// All moves of `side` passing `filter`, grouped by origin in board order
pub fn legal_moves(board: &Board, side: Side, filter: Option<&dyn MoveFilter>) -> Vec<Move> {
    board
        .pieces(side)
        .flat_map(|from| {
            filtered_destinations(board, from, filter)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

pub fn is_legal(board: &Board, side: Side, mv: Move) -> bool {
    board.occupant(mv.from) == Some(side) && destinations(board, mv.from).any(|to| to == mv.to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::NoRetreat;

    fn sorted(d: impl Iterator<Item = CellId>) -> Vec<CellId> {
        let mut v: Vec<_> = d.collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_corner_piece_only_steps() {
        let board = Board::new().unwrap();
        // Row 3 corner: two empty cells below, nothing to jump
        assert_eq!(sorted(destinations(&board, 6)), vec![14, 15]);
        assert_eq!(sorted(destinations(&board, 9)), vec![17, 18]);
    }

    #[test]
    fn test_buried_piece_is_stuck() {
        let board = Board::new().unwrap();
        assert_eq!(destinations(&board, 0).count(), 0);
        assert_eq!(destinations(&board, 1).count(), 0);
    }

    #[test]
    fn test_opening_jumps() {
        let board = Board::new().unwrap();
        // Row 2 corner jumps the row 3 pieces below it
        assert_eq!(sorted(destinations(&board, 3)), vec![14, 16]);
    }

    #[test]
    fn test_jump_chain() {
        // North piece at 60 (row 8 centre) with stepping stones below
        let north = [60, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        let south = [70, 92, 111, 112, 113, 114, 115, 116, 117, 118];
        let board = Board::with_placement(&north, &south).unwrap();

        let dests: Vec<_> = destinations(&board, 60).collect();
        // 60 -DR-> 70 is occupied, landing 81 is empty
        assert_eq!(board.neighbour(60, Direction::DR), Some(70));
        assert_eq!(board.neighbour(70, Direction::DR), Some(81));
        assert!(dests.contains(&81));
        // From 81, 92 is occupied and 104 beyond it is empty
        assert_eq!(board.neighbour(81, Direction::DL), Some(92));
        assert_eq!(board.neighbour(92, Direction::DL), Some(104));
        assert!(dests.contains(&104));
        // Chained landing is not a step target of the origin
        assert!(board.cell(60).neighbours().all(|(_, n)| n != 104));
    }

    #[test]
    fn test_no_duplicates_and_deterministic() {
        let mut board = Board::new().unwrap();
        for (from, to) in [(6, 14), (7, 16), (9, 20), (3, 6)] {
            assert!(board.move_piece(from, to));
        }
        for (cell, _) in board.cells() {
            if board.is_vacant(cell) {
                continue;
            }
            let first: Vec<_> = destinations(&board, cell).collect();
            let second: Vec<_> = destinations(&board, cell).collect();
            assert_eq!(first, second);
            let unique: FxHashSet<_> = first.iter().copied().collect();
            assert_eq!(unique.len(), first.len());
            for to in first {
                assert!(board.is_vacant(to));
                assert_ne!(to, cell);
            }
        }
    }

    #[test]
    fn test_origin_never_jumped_over() {
        // South pieces around a lone North piece; the North piece's own
        // cell must not serve as a stepping stone for its chain.
        let north = [60, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        let south = [61, 111, 112, 113, 114, 115, 116, 117, 118, 119];
        let board = Board::with_placement(&north, &south).unwrap();
        // Jump R over 61 lands on 62; from 62 the only occupied neighbour
        // in line back toward 60 is 61, whose far side is the origin.
        let dests: Vec<_> = destinations(&board, 60).collect();
        assert!(dests.contains(&62));
        assert!(!dests.contains(&60));
    }

    #[test]
    fn test_goal_exit_restriction() {
        // North piece 111 already home, 102 directly above is empty
        let north = [111, 112, 0, 1, 2, 3, 4, 5, 6, 7];
        let south = [113, 114, 115, 116, 117, 118, 119, 120, 8, 9];
        let board = Board::with_placement(&north, &south).unwrap();
        let dests: Vec<_> = destinations(&board, 111).collect();
        assert!(dests.iter().all(|&c| board.in_goal(Side::North, c)));
        assert!(!dests.contains(&102));
        // Piece outside the goal is unrestricted
        assert!(destinations(&board, 7).any(|c| !board.in_goal(Side::North, c)));
    }

    #[test]
    fn test_movable_pieces_and_legal_moves() {
        let board = Board::new().unwrap();
        let movable = movable_pieces(&board, Side::North);
        assert_eq!(movable, vec![3, 4, 5, 6, 7, 8, 9]);

        let moves = legal_moves(&board, Side::North, None);
        assert!(moves.iter().all(|m| is_legal(&board, Side::North, *m)));
        assert!(moves.contains(&Move::new(6, 14)));

        let filtered = legal_moves(&board, Side::North, Some(&NoRetreat));
        assert!(filtered.len() <= moves.len());
        assert!(!is_legal(&board, Side::South, Move::new(6, 14)));
    }

    #[test]
    #[should_panic(expected = "no piece on cell")]
    fn test_empty_origin_panics() {
        let board = Board::new().unwrap();
        let _ = destinations(&board, 60);
    }
}
