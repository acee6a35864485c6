//! Iterative-deepening negascout search, with a transposition table,
//! ProbCut pruning, aspiration windows, and a separate exact endgame solver.

pub mod control;
pub mod ending;
pub mod handler;
pub mod negascout;
pub mod ordering;
pub mod pv;
pub mod tt;

use beluga_core::{Board, Square};

use crate::eval::{Evaluator, Score};
use control::SearchControl;
use ending::{EndingContext, search_ending};
pub use handler::{SearchEvent, SearchHandler};
use negascout::{SearchContext, search_node};
use ordering::shuffle_root_moves;
pub use pv::Pv;
use tt::{Bound, TranspositionTable};

/// Result of a completed [`Searcher::search`] call.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// `None` when the root position has no legal move (must pass).
    pub best_move: Option<Square>,
    pub score: i32,
    /// Set when the endgame branch solved the position exactly.
    pub ending_flag: bool,
}

/// Owns the transposition table, stop flag, and root-move PRNG for one
/// line of play. Not safe to share a single `Searcher` across concurrent
/// searches (see the transposition table's single-owner design).
pub struct Searcher {
    tt: TranspositionTable,
    control: SearchControl,
    rng: rand::rngs::StdRng,
}

impl Searcher {
    pub fn new() -> Self {
        use rand::SeedableRng;
        Self { tt: TranspositionTable::new(), control: SearchControl::new(), rng: rand::rngs::StdRng::from_entropy() }
    }

    /// A searcher with a fixed PRNG seed, for reproducible root-move
    /// tie-breaking (tests, deterministic replays).
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self { tt: TranspositionTable::new(), control: SearchControl::new(), rng: rand::rngs::StdRng::seed_from_u64(seed) }
    }

    /// A clone of this searcher's stop-flag handle, so a caller on another
    /// thread can raise it.
    pub fn control(&self) -> SearchControl {
        self.control.clone()
    }

    /// Raise the stop flag.
    pub fn stop(&self) {
        self.control.stop();
    }

    /// Clear the transposition table and lower the stop flag, preparing the
    /// searcher for reuse.
    pub fn reset(&mut self) {
        self.control.reset();
        self.tt.clear();
    }

    /// Search `board` to `max_depth` plies, or exactly if `empty squares <=
    /// ending_depth`. `handler` receives progress events synchronously.
    pub fn search(
        &mut self,
        board: &Board,
        evaluator: &Evaluator,
        max_depth: i32,
        ending_depth: u32,
        handler: &mut impl SearchHandler,
    ) -> SearchResult {
        let root_moves_bb = board.generate_moves();
        if root_moves_bb.is_empty() {
            return SearchResult { best_move: None, score: 0, ending_flag: false };
        }
        let mut root_moves: Vec<Square> = root_moves_bb.into_iter().collect();

        if board.empty_squares().count() <= ending_depth {
            return self.search_endgame(board, &root_moves, handler);
        }

        shuffle_root_moves(&mut root_moves, &mut self.rng);

        let mut scores = vec![-(Score::INFINITY.value() as i32); root_moves.len()];
        let mut best_pv = Pv::empty();
        let mut best_score = 0;

        'iterations: for depth in 1..=max_depth {
            let (score, round_scores, pv, nodes) = if depth == 1 {
                self.search_root_moves(
                    board,
                    evaluator,
                    &root_moves,
                    depth,
                    -(Score::INFINITY.value() as i32),
                    Score::INFINITY.value() as i32,
                )
            } else {
                let mut delta = 8 * Score::SCALE;
                let mut alpha = best_score - delta;
                let mut beta = best_score + delta;
                loop {
                    let attempt = self.search_root_moves(board, evaluator, &root_moves, depth, alpha, beta);
                    if self.control.should_stop() {
                        break 'iterations;
                    }
                    let (score, _, _, nodes) = &attempt;
                    if *score > alpha && *score < beta {
                        break attempt;
                    } else if *score <= alpha {
                        alpha = *score - delta;
                        handler.on_fail_low(depth, *score, *nodes);
                    } else {
                        beta = *score + delta;
                        handler.on_fail_high(depth, *score, *nodes);
                    }
                    delta += 10 * Score::SCALE;
                }
            };

            if self.control.should_stop() {
                break 'iterations;
            }

            scores = round_scores;
            best_score = score;
            best_pv = pv;

            let mut indices: Vec<usize> = (0..root_moves.len()).collect();
            indices.sort_by_key(|&i| std::cmp::Reverse(scores[i]));
            root_moves = indices.iter().map(|&i| root_moves[i]).collect();
            scores = indices.iter().map(|&i| scores[i]).collect();

            handler.on_iterate(depth, &best_pv, best_score, nodes);
            self.store_pv(board, &best_pv, best_score);
        }

        SearchResult { best_move: root_moves.first().copied(), score: best_score, ending_flag: false }
    }

    /// Score every root move at `depth` within `(alpha, beta)` using
    /// negascout, returning the best score, per-move scores (same order as
    /// `root_moves`), the winning move's PV, and nodes visited.
    fn search_root_moves(
        &mut self,
        board: &Board,
        evaluator: &Evaluator,
        root_moves: &[Square],
        depth: i32,
        alpha: i32,
        beta: i32,
    ) -> (i32, Vec<i32>, Pv, u64) {
        let mut ctx = SearchContext { tt: &mut self.tt, control: &self.control, evaluator, nodes: 0 };
        let mut scores = vec![-(Score::INFINITY.value() as i32); root_moves.len()];
        let mut best_score = -(Score::INFINITY.value() as i32);
        let mut best_pv = Pv::empty();

        for (i, &mv) in root_moves.iter().enumerate() {
            let new_alpha = best_score.max(alpha);
            let mut child = *board;
            child.do_move(mv);

            let (score, child_pv) = if i == 0 || beta == new_alpha + 1 {
                let (s, p) = search_node(&mut ctx, &child, depth - 1, -beta, -new_alpha, 1, false);
                (-s, p)
            } else {
                let (s, p) =
                    search_node(&mut ctx, &child, depth - 1, -(new_alpha + 1), -new_alpha, 1, false);
                if -s >= new_alpha + 1 {
                    let (s2, p2) = search_node(&mut ctx, &child, depth - 1, -beta, -new_alpha, 1, false);
                    (-s2, p2)
                } else {
                    (-s, p)
                }
            };

            scores[i] = score;
            if ctx.control.should_stop() {
                break;
            }
            if score > best_score {
                best_score = score;
                let mut pv = Pv::empty();
                pv.set(mv, &child_pv);
                best_pv = pv;
                if best_score >= beta {
                    break;
                }
            }
        }

        (best_score, scores, best_pv, ctx.nodes)
    }

    /// Walk `pv`, storing each position into the TT as an exact entry with
    /// depth set to the remaining PV length.
    fn store_pv(&mut self, board: &Board, pv: &Pv, score: i32) {
        let mut walked = *board;
        let moves = pv.moves();
        for (i, &mv) in moves.iter().enumerate() {
            if walked.must_pass() {
                walked.pass();
            }
            let depth = (moves.len() - i) as u8;
            self.tt.store(walked.hash(), depth, score, Bound::Actual, Some(mv));
            walked.do_move(mv);
        }
    }

    fn search_endgame(
        &mut self,
        board: &Board,
        root_moves: &[Square],
        handler: &mut impl SearchHandler,
    ) -> SearchResult {
        let mut ctx = EndingContext { control: &self.control, nodes: 0 };
        let mut scored: Vec<(Square, i32)> = root_moves
            .iter()
            .map(|&mv| {
                let mut child = *board;
                child.do_move(mv);
                let score = -search_ending(&mut ctx, &child, -64 * Score::SCALE, 64 * Score::SCALE, false);
                (mv, score)
            })
            .collect();

        if ctx.control.should_stop() {
            return SearchResult { best_move: None, score: 0, ending_flag: true };
        }

        scored.sort_by_key(|&(_, score)| std::cmp::Reverse(score));
        let (best_move, best_score) = scored[0];
        let mut pv = Pv::empty();
        pv.set(best_move, &Pv::empty());
        handler.on_ending(&pv, best_score, ctx.nodes);

        SearchResult { best_move: Some(best_move), score: best_score, ending_flag: true }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}
