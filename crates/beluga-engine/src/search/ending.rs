//! Exact endgame solver: the same negamax/alpha-beta/pass handling as the
//! main search, but with no transposition table, ProbCut, aspiration window,
//! or internal iterative deepening. Moves are tried in plain square order.
//!
//! Only sound at shallow empty-square counts (the depths the root driver
//! invokes this at, typically `empty <= ~14`), where an exhaustive search
//! is tractable.

use beluga_core::{Board, Color, Square};

use crate::eval::Score;
use crate::search::control::SearchControl;

pub struct EndingContext<'a> {
    pub control: &'a SearchControl,
    pub nodes: u64,
}

fn terminal_score(board: &Board) -> i32 {
    let totals = board.total_score();
    let score = (totals.black as i32 - totals.white as i32) * Score::SCALE;
    if board.side_to_move() == Color::Black { score } else { -score }
}

/// Exact negamax over the remaining tree. The leaf condition is a double
/// pass (the game has ended), which returns the exact disk-difference score.
pub fn search_ending(ctx: &mut EndingContext, board: &Board, alpha: i32, beta: i32, passed: bool) -> i32 {
    ctx.nodes += 1;

    if board.is_end() {
        return terminal_score(board);
    }

    let moves: Vec<Square> = board.generate_moves().into_iter().collect();
    if moves.is_empty() {
        if passed {
            return terminal_score(board);
        }
        let mut next = *board;
        next.pass();
        let score = -search_ending(ctx, &next, -beta, -alpha, true);
        if ctx.control.should_stop() {
            return 0;
        }
        return score;
    }

    let mut alpha = alpha;
    let mut best_score = -(Score::INFINITY.value() as i32);
    for mv in moves {
        let mut child = *board;
        child.do_move(mv);
        let score = -search_ending(ctx, &child, -beta, -alpha, false);
        if ctx.control.should_stop() {
            return 0;
        }
        if score > best_score {
            best_score = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }
    best_score
}
