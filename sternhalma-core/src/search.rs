//! Depth-limited minimax with alpha-beta pruning
//!
//! The search works on one board in place: apply a move, recurse, apply the
//! inverse move. Every public entry point leaves the board as it found it.

use rayon::prelude::*;

use crate::board::Board;
use crate::cell::Side;
use crate::eval::{evaluate, evaluate_with_depth, Score, INFINITY};
use crate::filter::MoveFilter;
use crate::movegen::{filtered_destinations, legal_moves, Move};
use crate::potential::EvalScheme;

// ============================================================================
// TYPES
// ============================================================================

/// Search parameters
#[derive(Clone, Copy)]
pub struct SearchParams<'a> {
    pub depth: u32,
    pub scheme: EvalScheme,
    pub filter: Option<&'a dyn MoveFilter>,
}

impl<'a> SearchParams<'a> {
    pub fn new(depth: u32, scheme: EvalScheme) -> Self {
        Self { depth, scheme, filter: None }
    }

    pub fn with_filter(mut self, filter: &'a dyn MoveFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Outcome of a search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Value from the searching side's point of view
    pub value: Score,
    /// `None` at terminal positions or when the side has no legal move
    pub best: Option<Move>,
    /// Positions visited
    pub nodes: u64,
}

struct Context<'a> {
    perspective: Side,
    scheme: EvalScheme,
    filter: Option<&'a dyn MoveFilter>,
    prune: bool,
    nodes: u64,
}

impl<'a> Context<'a> {
    fn new(perspective: Side, params: &SearchParams<'a>, prune: bool) -> Self {
        Self {
            perspective,
            scheme: params.scheme,
            filter: params.filter,
            prune,
            nodes: 0,
        }
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Best move for `side` by alpha-beta search
pub fn best_move(board: &mut Board, side: Side, params: &SearchParams) -> SearchResult {
    run(board, side, params, true)
}

/// Best move for `side` by plain minimax (no pruning)
///
/// Same value as [`best_move`], visits every node. Used to check the pruned
/// search.
pub fn minimax(board: &mut Board, side: Side, params: &SearchParams) -> SearchResult {
    run(board, side, params, false)
}

/// Alpha-beta search with root moves spread over the rayon pool
///
/// Every root move is searched on its own clone of the board, with a full
/// window. Returns the same value and move as [`best_move`].
pub fn parallel_best_move(board: &Board, side: Side, params: &SearchParams) -> SearchResult {
    if params.depth == 0 || board.is_terminal() {
        return best_move(&mut board.clone(), side, params);
    }

    let moves = legal_moves(board, side, params.filter);
    let scored: Vec<(Move, Score, u64)> = moves
        .par_iter()
        .map(|&mv| {
            let mut child = board.clone();
            let applied = child.move_piece(mv.from, mv.to);
            debug_assert!(applied, "generated move {} -> {} onto an occupied cell", mv.from, mv.to);
            let mut ctx = Context::new(side, params, true);
            let (value, _) = alpha_beta(&mut child, params.depth - 1, false, -INFINITY, INFINITY, &mut ctx);
            (mv, value, ctx.nodes)
        })
        .collect();

    let mut result = SearchResult { value: -INFINITY, best: None, nodes: 1 };
    for (mv, value, nodes) in scored {
        result.nodes += nodes;
        if value > result.value {
            result.value = value;
            result.best = Some(mv);
        }
    }

    tracing::debug!(
        "Parallel search {:?}: depth={} value={} nodes={} moves={}",
        side,
        params.depth,
        result.value,
        result.nodes,
        moves.len()
    );

    result
}

/// Pick a move for `side`, `None` when it has none
pub fn choose_move(
    board: &mut Board,
    side: Side,
    depth: u32,
    scheme: EvalScheme,
    filter: Option<&dyn MoveFilter>,
) -> Option<Move> {
    let params = SearchParams { depth, scheme, filter };
    best_move(board, side, &params).best
}

fn run(board: &mut Board, side: Side, params: &SearchParams, prune: bool) -> SearchResult {
    let mut ctx = Context::new(side, params, prune);
    let (value, best) = alpha_beta(board, params.depth, true, -INFINITY, INFINITY, &mut ctx);

    tracing::debug!(
        "Search {:?}: depth={} prune={} value={} nodes={}",
        side,
        params.depth,
        prune,
        value,
        ctx.nodes
    );

    SearchResult { value, best, nodes: ctx.nodes }
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Value of the position for `ctx.perspective` and the move achieving it
///
/// The maximizing role moves `ctx.perspective`'s pieces, the minimizing role
/// the opponent's. Ties keep the first move seen.
fn alpha_beta(
    board: &mut Board,
    depth: u32,
    maximizing: bool,
    mut alpha: Score,
    mut beta: Score,
    ctx: &mut Context,
) -> (Score, Option<Move>) {
    ctx.nodes += 1;

    // Terminal check with depth bonus
    if board.is_terminal() {
        return (evaluate_with_depth(board, ctx.perspective, ctx.scheme, depth), None);
    }

    if depth == 0 {
        return (evaluate(board, ctx.perspective, ctx.scheme), None);
    }

    let mover = if maximizing { ctx.perspective } else { ctx.perspective.opponent() };
    let mut best_value = if maximizing { -INFINITY } else { INFINITY };
    let mut best_move = None;

    let origins: Vec<_> = board.pieces(mover).collect();

    'origins: for from in origins {
        for to in filtered_destinations(board, from, ctx.filter) {
            let mv = Move::new(from, to);
            let applied = board.move_piece(mv.from, mv.to);
            debug_assert!(applied, "generated move {} -> {} onto an occupied cell", from, to);

            let (value, _) = alpha_beta(board, depth - 1, !maximizing, alpha, beta, ctx);
            let undo = mv.reversed();
            board.move_piece(undo.from, undo.to);

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                beta = beta.min(value);
            }

            if ctx.prune && beta <= alpha {
                break 'origins;
            }
        }
    }

    (best_value, best_move)
}

// ============================================================================
// TESTS
// ============================================================================
