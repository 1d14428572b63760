//! Per-cell potentials used by the evaluator
//!
//! Computed once when the board is built and never touched again. Neither
//! scheme looks at occupancy.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, NUM_ROWS};
use crate::cell::{CellId, Side};

/// Potential of the goal apex under the distance scheme
const APEX_POTENTIAL: i32 = 16;

/// Bonus for cells inside the goal triangle (distance scheme)
const DISTANCE_GOAL_BONUS: i32 = 5;

/// Score per row advanced (positional scheme)
const ROW_WEIGHT: i32 = 10;

/// Bonus for cells inside the goal triangle (positional scheme)
const POSITIONAL_GOAL_BONUS: i32 = 50;

/// Evaluation scheme selecting which potential table is summed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalScheme {
    /// Hop distance to the goal apex
    #[default]
    Distance = 0,
    /// Row progress and centring, no traversal
    Positional = 1,
}

impl EvalScheme {
    pub const ALL: [EvalScheme; 2] = [EvalScheme::Distance, EvalScheme::Positional];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Potentials of every cell for `side` under `scheme`, indexed by cell
///
/// Fails when some cell cannot reach the goal apex.
pub(crate) fn compute(board: &Board, side: Side, scheme: EvalScheme) -> Result<Vec<i32>, BoardError> {
    match scheme {
        EvalScheme::Distance => distance_potentials(board, side),
        EvalScheme::Positional => Ok(positional_potentials(board, side)),
    }
}

/// Breadth-first hop distances from `start` to every cell
pub fn hop_distances(board: &Board, start: CellId) -> Vec<Option<u32>> {
    let mut distances = vec![None; board.len()];
    let mut queue = VecDeque::new();

    distances[start] = Some(0);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        let next = distances[cell].map_or(0, |d| d + 1);
        for (_, neighbour) in board.cell(cell).neighbours() {
            let improves = distances[neighbour].map_or(true, |d| next < d);
            if improves {
                distances[neighbour] = Some(next);
                queue.push_back(neighbour);
            }
        }
    }

    distances
}

fn distance_potentials(board: &Board, side: Side) -> Result<Vec<i32>, BoardError> {
    let apex = board.goal_apex(side);
    hop_distances(board, apex)
        .into_iter()
        .enumerate()
        .map(|(cell, hops)| -> Result<i32, BoardError> {
            let hops = hops.ok_or(BoardError::Unreachable { cell, apex })? as i32;
            let bonus = if board.in_goal(side, cell) { DISTANCE_GOAL_BONUS } else { 0 };
            Ok(APEX_POTENTIAL - hops + bonus)
        })
        .collect()
}

fn positional_potentials(board: &Board, side: Side) -> Vec<i32> {
    (0..board.len())
        .map(|cell| {
            let row = board.row_of(cell);
            let progress = match side {
                Side::North => row,
                Side::South => NUM_ROWS - 1 - row,
            } as i32;
            let bonus = if board.in_goal(side, cell) { POSITIONAL_GOAL_BONUS } else { 0 };
            ROW_WEIGHT * progress - off_centre(board, cell) + bonus
        })
        .collect()
}

/// Cells between `cell` and the middle of its row (both middles count for
/// even rows)
fn off_centre(board: &Board, cell: CellId) -> i32 {
    let len = board.row(board.row_of(cell)).len() as i32;
    let col = board.column_of(cell) as i32;
    (2 * col - (len - 1)).abs() / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::NUM_CELLS;

    #[test]
    fn test_apex_to_apex_distance() {
        let board = Board::new().unwrap();
        let d = hop_distances(&board, 0);
        assert_eq!(d[0], Some(0));
        assert_eq!(d[NUM_CELLS - 1], Some(16));
        assert!(d.iter().all(Option::is_some));
    }

    #[test]
    fn test_hop_distance_is_lipschitz() {
        let board = Board::new().unwrap();
        let d = hop_distances(&board, NUM_CELLS - 1);
        for (id, cell) in board.cells() {
            for (_, n) in cell.neighbours() {
                let (a, b) = (d[id].unwrap() as i64, d[n].unwrap() as i64);
                assert!((a - b).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_distance_potentials() {
        let board = Board::new().unwrap();
        let s = EvalScheme::Distance;
        // Goal apex: full potential plus the triangle bonus
        assert_eq!(board.potential(NUM_CELLS - 1, Side::North, s), 16 + 5);
        assert_eq!(board.potential(0, Side::South, s), 16 + 5);
        // Far apex is sixteen hops away
        assert_eq!(board.potential(0, Side::North, s), 0);
        // Mirror symmetry between the sides
        assert_eq!(
            board.potential(60, Side::North, s),
            board.potential(60, Side::South, s)
        );
    }

    #[test]
    fn test_positional_potentials() {
        let board = Board::new().unwrap();
        let s = EvalScheme::Positional;
        assert_eq!(board.potential(NUM_CELLS - 1, Side::North, s), 160 + 50);
        assert_eq!(board.potential(0, Side::North, s), 0);
        // Row 8 (9 cells): centre beats the edge
        assert_eq!(board.potential(60, Side::North, s), 80);
        assert_eq!(board.potential(56, Side::North, s), 76);
        // Row 3 (4 cells): both middle cells score alike
        assert_eq!(board.potential(7, Side::South, s), board.potential(8, Side::South, s));
        assert_eq!(board.potential(6, Side::South, s), 130 - 1 + 50);
    }

    #[test]
    fn test_potentials_increase_toward_goal() {
        let board = Board::new().unwrap();
        for scheme in EvalScheme::ALL {
            let home = board.potential(7, Side::North, scheme);
            let middle = board.potential(60, Side::North, scheme);
            let goal = board.potential(115, Side::North, scheme);
            assert!(home < middle && middle < goal, "{:?}", scheme);
        }
    }
}
