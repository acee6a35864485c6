//! Negascout (principal variation search) with a transposition table and
//! ProbCut pruning.

use beluga_core::{Board, Color, Square};

use crate::eval::{Evaluator, Score};
use crate::search::control::SearchControl;
use crate::search::pv::Pv;
use crate::search::tt::{Bound, TranspositionTable};

/// Threading state shared across one top-level [`search_node`] call tree.
pub struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub control: &'a SearchControl,
    pub evaluator: &'a Evaluator,
    pub nodes: u64,
}

fn terminal_score(board: &Board) -> i32 {
    let totals = board.total_score();
    let score = (totals.black as i32 - totals.white as i32) * Score::SCALE;
    if board.side_to_move() == Color::Black { score } else { -score }
}

fn leaf_score(evaluator: &Evaluator, board: &Board) -> i32 {
    let eval = evaluator.evaluate(board).value() as i32;
    if board.side_to_move() == Color::White { -eval } else { eval }
}

/// Internal iterative deepening move ordering: probe each candidate (except
/// a pinned TT move) with a shallow search and sort descending by score.
fn order_moves(
    ctx: &mut SearchContext,
    board: &Board,
    moves: &mut [Square],
    depth: i32,
    alpha: i32,
    beta: i32,
    tt_move: Option<Square>,
    ply: u32,
) {
    if moves.len() <= 1 {
        return;
    }
    if depth <= 1 {
        if let Some(tm) = tt_move {
            if let Some(pos) = moves.iter().position(|&m| m == tm) {
                moves.swap(0, pos);
            }
        }
        return;
    }

    let probe_depth = if depth <= 4 {
        1
    } else if depth <= 7 {
        depth - 4
    } else {
        3
    };

    let mut scored: Vec<(Square, i32)> = moves
        .iter()
        .map(|&mv| {
            if Some(mv) == tt_move {
                (mv, Score::INFINITY.value() as i32)
            } else {
                let mut child = *board;
                child.do_move(mv);
                let (score, _) = search_node(ctx, &child, probe_depth, -beta, -alpha, ply + 1, false);
                (mv, -score)
            }
        })
        .collect();
    scored.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    for (slot, (mv, _)) in moves.iter_mut().zip(scored) {
        *slot = mv;
    }
}

/// Negascout search of `board` to `depth` plies within `(alpha, beta)`.
/// `ply` is the distance from the search root; `passed` marks that the
/// immediately preceding call already passed (so a second consecutive pass
/// here is the game ending).
pub fn search_node(
    ctx: &mut SearchContext,
    board: &Board,
    depth: i32,
    alpha: i32,
    beta: i32,
    ply: u32,
    passed: bool,
) -> (i32, Pv) {
    ctx.nodes += 1;

    if board.is_end() {
        return (terminal_score(board), Pv::empty());
    }
    if depth < 1 {
        return (leaf_score(ctx.evaluator, board), Pv::empty());
    }

    let is_pv = beta != alpha + 1;
    let hash = board.hash();
    let tt_hit = ctx.tt.probe(hash);
    let tt_move = tt_hit.and_then(|e| e.best_move);
    if let Some(entry) = tt_hit {
        if let Some(score) = entry.cutoff(depth as u8, alpha, beta, is_pv) {
            return (score, Pv::empty());
        }
    }

    if ply > 0 && depth >= 5 && beta < 40 * Score::SCALE {
        let pc_beta = beta + 10 * Score::SCALE;
        let (pc_score, _) = search_node(ctx, board, depth - 1, pc_beta - 1, pc_beta, ply + 1, false);
        if ctx.control.should_stop() {
            return (0, Pv::empty());
        }
        if pc_score >= pc_beta {
            return (beta, Pv::empty());
        }
    }

    let mut moves: Vec<Square> = board.generate_moves().into_iter().collect();

    if moves.is_empty() {
        if passed {
            return (terminal_score(board), Pv::empty());
        }
        let mut next = *board;
        next.pass();
        let (score, _) = search_node(ctx, &next, depth - 1, -beta, -alpha, ply + 1, true);
        if ctx.control.should_stop() {
            return (0, Pv::empty());
        }
        return (-score, Pv::empty());
    }

    order_moves(ctx, board, &mut moves, depth, alpha, beta, tt_move, ply);
    if ctx.control.should_stop() {
        return (0, Pv::empty());
    }

    let mut best_score = -(Score::INFINITY.value() as i32);
    let mut best_move = None;
    let mut pv = Pv::empty();

    for (i, &mv) in moves.iter().enumerate() {
        let new_alpha = best_score.max(alpha);
        let new_depth = depth - 1;
        let mut child_board = *board;
        child_board.do_move(mv);

        let (score, child_pv) = if i == 0 || beta == new_alpha + 1 {
            let (s, p) = search_node(ctx, &child_board, new_depth, -beta, -new_alpha, ply + 1, false);
            (-s, p)
        } else {
            let (s, p) =
                search_node(ctx, &child_board, new_depth, -(new_alpha + 1), -new_alpha, ply + 1, false);
            if -s >= new_alpha + 1 {
                let (s2, p2) = search_node(ctx, &child_board, new_depth, -beta, -new_alpha, ply + 1, false);
                (-s2, p2)
            } else {
                (-s, p)
            }
        };

        if ctx.control.should_stop() {
            return (0, Pv::empty());
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
            pv.set(mv, &child_pv);
            if best_score >= beta {
                break;
            }
        }
    }

    let bound = if best_score >= beta {
        Bound::Lower
    } else if best_score <= alpha {
        Bound::Upper
    } else {
        Bound::Actual
    };
    ctx.tt.store(hash, depth as u8, best_score, bound, best_move);

    (best_score, pv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::control::SearchControl;
    use crate::search::tt::TranspositionTable;

    #[test]
    fn finds_a_legal_move_at_shallow_depth() {
        let evaluator = Evaluator::zeroed();
        let mut tt = TranspositionTable::new();
        let control = SearchControl::new();
        let mut ctx = SearchContext { tt: &mut tt, control: &control, evaluator: &evaluator, nodes: 0 };

        let board = Board::starting_position();
        let (score, pv) =
            search_node(&mut ctx, &board, 4, -(Score::INFINITY.value() as i32), Score::INFINITY.value() as i32, 0, false);
        assert!(pv.first().is_some());
        // Zeroed evaluator: a 4-ply search of the opening should be a draw (0).
        assert_eq!(score, 0);
    }

    #[test]
    fn stop_flag_unwinds_with_zero() {
        let evaluator = Evaluator::zeroed();
        let mut tt = TranspositionTable::new();
        let control = SearchControl::new();
        control.stop();
        let mut ctx = SearchContext { tt: &mut tt, control: &control, evaluator: &evaluator, nodes: 0 };

        let board = Board::starting_position();
        let (score, _) =
            search_node(&mut ctx, &board, 6, -(Score::INFINITY.value() as i32), Score::INFINITY.value() as i32, 0, false);
        assert_eq!(score, 0);
    }

    /// Plain negamax alpha-beta with square-order move generation: no TT, no
    /// ProbCut, no move reordering. ProbCut only triggers at depth >= 5, so
    /// comparing at depth <= 4 isolates the negascout/TT-ordering machinery
    /// without that heuristic's forward-pruning unsoundness in the way.
    fn naive_alpha_beta(evaluator: &Evaluator, board: &Board, depth: i32, alpha: i32, beta: i32, passed: bool) -> i32 {
        if board.is_end() {
            return terminal_score(board);
        }
        if depth < 1 {
            return leaf_score(evaluator, board);
        }
        let moves: Vec<Square> = board.generate_moves().into_iter().collect();
        if moves.is_empty() {
            if passed {
                return terminal_score(board);
            }
            let mut next = *board;
            next.pass();
            return -naive_alpha_beta(evaluator, &next, depth - 1, -beta, -alpha, true);
        }
        let mut alpha = alpha;
        let mut best = -(Score::INFINITY.value() as i32);
        for mv in moves {
            let mut child = *board;
            child.do_move(mv);
            let score = -naive_alpha_beta(evaluator, &child, depth - 1, -beta, -alpha, false);
            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    fn random_midgame_position(rng: &mut impl rand::Rng, plies: u32) -> Board {
        let mut board = Board::starting_position();
        for _ in 0..plies {
            if board.is_end() {
                break;
            }
            if board.must_pass() {
                board.pass();
                continue;
            }
            let moves: Vec<Square> = board.generate_moves().into_iter().collect();
            let mv = *rand::seq::SliceRandom::choose(moves.as_slice(), rng).unwrap();
            board.do_move(mv);
        }
        board
    }

    // S7
    #[test]
    fn negascout_agrees_with_naive_alpha_beta_at_shallow_depth() {
        use rand::SeedableRng;
        let mut evaluator = Evaluator::zeroed();
        evaluator.params_mut().diag4[5] = Score::new(37);
        evaluator.params_mut().hor2[900] = Score::new(-19);
        evaluator.params_mut().corner3x3[12345] = Score::new(53);

        let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
        for i in 0..100 {
            let board = random_midgame_position(&mut rng, 8 + (i % 5));
            for depth in 1..=4 {
                let mut tt = TranspositionTable::new();
                let control = SearchControl::new();
                let mut ctx = SearchContext { tt: &mut tt, control: &control, evaluator: &evaluator, nodes: 0 };
                let (production_score, _) = search_node(
                    &mut ctx,
                    &board,
                    depth,
                    -(Score::INFINITY.value() as i32),
                    Score::INFINITY.value() as i32,
                    0,
                    false,
                );
                let reference_score = naive_alpha_beta(
                    &evaluator,
                    &board,
                    depth,
                    -(Score::INFINITY.value() as i32),
                    Score::INFINITY.value() as i32,
                    false,
                );
                assert_eq!(production_score, reference_score, "depth {depth} mismatch");
            }
        }
    }
}
