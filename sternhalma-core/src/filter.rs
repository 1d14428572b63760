//! Move filters: optional predicates that prune destinations before search

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cell::CellId;
use crate::potential::EvalScheme;

/// Predicate over a candidate move
///
/// Called with the board as it stands before the move, so the mover is
/// `board.occupant(origin)`.
pub trait MoveFilter: Send + Sync {
    fn allows(&self, board: &Board, origin: CellId, destination: CellId) -> bool;
}

impl<F> MoveFilter for F
where
    F: Fn(&Board, CellId, CellId) -> bool + Send + Sync,
{
    fn allows(&self, board: &Board, origin: CellId, destination: CellId) -> bool {
        self(board, origin, destination)
    }
}

/// Keeps every move
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl MoveFilter for AcceptAll {
    fn allows(&self, _: &Board, _: CellId, _: CellId) -> bool {
        true
    }
}

/// Drops moves that lose distance potential for the mover
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRetreat;

impl MoveFilter for NoRetreat {
    fn allows(&self, board: &Board, origin: CellId, destination: CellId) -> bool {
        match board.occupant(origin) {
            Some(side) => {
                let scheme = EvalScheme::Distance;
                board.potential(destination, side, scheme) >= board.potential(origin, side, scheme)
            }
            None => false,
        }
    }
}

/// Serializable filter selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    AcceptAll,
    NoRetreat,
}

impl FilterKind {
    /// `None` when the filter keeps everything
    pub fn build(self) -> Option<Arc<dyn MoveFilter>> {
        match self {
            FilterKind::AcceptAll => None,
            FilterKind::NoRetreat => Some(Arc::new(NoRetreat)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_retreat() {
        let mut board = Board::new().unwrap();
        assert!(board.move_piece(6, 14));
        // Forward from the top triangle into the hexagon
        assert!(NoRetreat.allows(&board, 7, 15));
        // Back up into the home triangle
        assert!(!NoRetreat.allows(&board, 14, 6));
        // Empty origin
        assert!(!NoRetreat.allows(&board, 60, 61));
    }

    #[test]
    fn test_closure_filter() {
        let board = Board::new().unwrap();
        let only_row_four = |b: &Board, _: CellId, to: CellId| b.row_of(to) == 4;
        assert!(only_row_four.allows(&board, 6, 14));
        assert!(!only_row_four.allows(&board, 6, 0));
        assert!(AcceptAll.allows(&board, 6, 0));
    }

    #[test]
    fn test_filter_kind_build() {
        assert!(FilterKind::AcceptAll.build().is_none());
        assert!(FilterKind::NoRetreat.build().is_some());
        let json = serde_json::to_string(&FilterKind::NoRetreat).unwrap();
        assert_eq!(json, "\"no_retreat\"");
    }
}
