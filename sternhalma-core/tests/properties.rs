//! Property tests over random play
//!
//! Positions come from seeded random games so every run sees the same boards.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

use sternhalma_core::movegen::{destinations, legal_moves, movable_pieces};
use sternhalma_core::search::minimax;
use sternhalma_core::{
    best_move, Board, CellId, Direction, EvalScheme, NoRetreat, SearchParams, Side, NUM_CELLS, PIECES_PER_SIDE,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Board after `plies` random legal moves, North first
fn random_position(seed: u64, plies: usize) -> (Board, Side) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Board::new().unwrap();
    let mut side = Side::North;

    for _ in 0..plies {
        if board.is_terminal() {
            break;
        }
        let moves = legal_moves(&board, side, None);
        let Some(&mv) = moves.choose(&mut rng) else { break };
        assert!(board.move_piece(mv.from, mv.to));
        side = side.opponent();
    }

    (board, side)
}

fn occupancy(board: &Board) -> Vec<Option<Side>> {
    board.cells().map(|(_, cell)| cell.occupant()).collect()
}

// ============================================================================
// BOARD
// ============================================================================

#[test]
fn test_links_are_mutual() {
    let board = Board::new().unwrap();
    for (id, cell) in board.cells() {
        for (direction, other) in cell.neighbours() {
            assert_ne!(id, other);
            assert_eq!(board.neighbour(other, direction.opposite()), Some(id));
        }
    }
}

#[test]
fn test_every_cell_reachable() {
    let board = Board::new().unwrap();
    let mut seen = FxHashSet::default();
    let mut stack = vec![0];
    while let Some(id) = stack.pop() {
        if seen.insert(id) {
            stack.extend(Direction::ALL.iter().filter_map(|&d| board.neighbour(id, d)));
        }
    }
    assert_eq!(seen.len(), NUM_CELLS);
}

#[test]
fn test_occupancy_conserved_over_random_games() {
    for seed in 0..8 {
        let (board, _) = random_position(seed, 120);
        for side in Side::BOTH {
            assert_eq!(board.pieces(side).count(), PIECES_PER_SIDE, "seed {}", seed);
        }
        assert_eq!(board.occupied_count(), 2 * PIECES_PER_SIDE);
    }
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

#[test]
fn test_destinations_are_sound() {
    for seed in 0..6 {
        let (board, _) = random_position(seed, 40);
        for side in Side::BOTH {
            for origin in board.pieces(side) {
                let targets: Vec<CellId> = destinations(&board, origin).collect();
                let unique: FxHashSet<CellId> = targets.iter().copied().collect();
                assert_eq!(unique.len(), targets.len(), "duplicate destination from {}", origin);

                for &to in &targets {
                    assert_ne!(to, origin);
                    assert!(board.is_vacant(to));
                    if board.in_goal(side, origin) {
                        assert!(board.in_goal(side, to));
                    }
                }

                // Every empty neighbour is a step, unless the piece is locked in its goal
                if !board.in_goal(side, origin) {
                    for d in Direction::ALL {
                        if let Some(next) = board.neighbour(origin, d).filter(|&n| board.is_vacant(n)) {
                            assert!(unique.contains(&next));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_enumeration_is_deterministic() {
    let (board, side) = random_position(11, 30);
    let first = legal_moves(&board, side, None);
    let second = legal_moves(&board.clone(), side, None);
    assert_eq!(first, second);
}

#[test]
fn test_applied_moves_can_be_undone() {
    let (mut board, side) = random_position(5, 25);
    let before = occupancy(&board);
    for mv in legal_moves(&board, side, None) {
        assert!(board.move_piece(mv.from, mv.to));
        assert_eq!(board.occupant(mv.to), Some(side));
        assert!(board.move_piece(mv.to, mv.from));
        assert_eq!(occupancy(&board), before);
    }
}

#[test]
fn test_movable_pieces_have_moves() {
    let (board, side) = random_position(2, 20);
    let movable = movable_pieces(&board, side);
    let from_moves: FxHashSet<CellId> = legal_moves(&board, side, None).iter().map(|m| m.from).collect();
    assert_eq!(movable.iter().copied().collect::<FxHashSet<_>>(), from_moves);
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn test_alpha_beta_agrees_with_minimax_on_random_positions() {
    for seed in 20..26 {
        let (mut board, side) = random_position(seed, 16);
        for depth in 1..=2 {
            for scheme in EvalScheme::ALL {
                let params = SearchParams::new(depth, scheme);
                let pruned = best_move(&mut board, side, &params);
                let full = minimax(&mut board, side, &params);
                assert_eq!(pruned.value, full.value, "seed {} depth {}", seed, depth);
            }
        }
    }
}

#[test]
fn test_alpha_beta_agrees_with_minimax_at_depth_three() {
    let (mut board, side) = random_position(31, 12);
    let params = SearchParams::new(3, EvalScheme::Positional).with_filter(&NoRetreat);
    let pruned = best_move(&mut board, side, &params);
    let full = minimax(&mut board, side, &params);
    assert_eq!(pruned.value, full.value);
}

#[test]
fn test_search_leaves_board_untouched() {
    let (mut board, side) = random_position(9, 18);
    let before = occupancy(&board);
    let result = best_move(&mut board, side, &SearchParams::new(3, EvalScheme::Distance));
    assert_eq!(occupancy(&board), before);
    if let Some(mv) = result.best {
        assert!(sternhalma_core::is_legal(&board, side, mv));
    }
}
