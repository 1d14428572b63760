//! Position evaluation

use crate::board::Board;
use crate::cell::Side;
use crate::potential::EvalScheme;

/// Search scores
pub type Score = i32;

/// Win value (effectively infinite)
pub const WIN_VALUE: Score = 1_000_000;

/// Sentinel bound above any reachable score
pub const INFINITY: Score = 1_000_000_000;

/// Evaluate from `perspective`'s point of view (higher is better for it)
pub fn evaluate(board: &Board, perspective: Side, scheme: EvalScheme) -> Score {
    if board.has_won(perspective) {
        return WIN_VALUE;
    }
    if board.has_won(perspective.opponent()) {
        return -WIN_VALUE;
    }

    material(board, perspective, scheme) - material(board, perspective.opponent(), scheme)
}

/// Evaluate with depth bonus for preferring faster wins and slower losses
pub fn evaluate_with_depth(board: &Board, perspective: Side, scheme: EvalScheme, depth: u32) -> Score {
    let base = evaluate(board, perspective, scheme);
    let bonus = depth as Score;
    if base >= WIN_VALUE {
        base + bonus
    } else if base <= -WIN_VALUE {
        base - bonus
    } else {
        base
    }
}

/// Sum of the potentials under a side's pieces
fn material(board: &Board, side: Side, scheme: EvalScheme) -> Score {
    board.pieces(side).map(|cell| board.potential(cell, side, scheme)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellId;

    #[test]
    fn test_evaluate_symmetric() {
        let board = Board::new().unwrap();
        for scheme in EvalScheme::ALL {
            assert_eq!(evaluate(&board, Side::North, scheme), 0);
            assert_eq!(evaluate(&board, Side::South, scheme), 0);
        }
    }

    #[test]
    fn test_evaluate_is_antisymmetric() {
        let mut board = Board::new().unwrap();
        assert!(board.move_piece(6, 14));
        for scheme in EvalScheme::ALL {
            let north = evaluate(&board, Side::North, scheme);
            assert!(north > 0, "{:?}: advancing should help North", scheme);
            assert_eq!(north, -evaluate(&board, Side::South, scheme));
        }
    }

    #[test]
    fn test_win_and_loss_values() {
        let north: Vec<CellId> = (111..121).collect();
        let south: Vec<CellId> = (56..66).collect();
        let board = Board::with_placement(&north, &south).unwrap();
        let s = EvalScheme::Distance;
        assert_eq!(evaluate(&board, Side::North, s), WIN_VALUE);
        assert_eq!(evaluate(&board, Side::South, s), -WIN_VALUE);
        assert_eq!(evaluate_with_depth(&board, Side::North, s, 3), WIN_VALUE + 3);
        assert_eq!(evaluate_with_depth(&board, Side::South, s, 3), -WIN_VALUE - 3);
    }

    #[test]
    fn test_depth_bonus_ignores_open_positions() {
        let board = Board::new().unwrap();
        assert_eq!(evaluate_with_depth(&board, Side::North, EvalScheme::Distance, 5), 0);
    }
}
