//! Self-play sample generation for the offline learner.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use beluga_core::Board;
use beluga_engine::{Evaluator, Score};
use beluga_engine::search::Searcher;

/// A labeled training position: a board and its target evaluation, in
/// Black-favoring `Score` units (as a float, to accumulate fractional loss).
pub struct Sample {
    pub board: Board,
    pub label: f32,
}

fn play_random_move(board: &mut Board, rng: &mut impl Rng) -> bool {
    let moves: Vec<_> = board.generate_moves().into_iter().collect();
    match moves.choose(rng) {
        Some(&mv) => {
            board.do_move(mv);
            true
        }
        None => {
            if board.is_end() {
                false
            } else {
                board.pass();
                true
            }
        }
    }
}

/// Supplementary batch generator: self-play uniformly-random games from the
/// opening, recording `(board, 0.0)` whenever the disc count matches one of
/// `target_counts`. Useful for smoke-testing the adjustment loop without
/// running a full search.
pub fn generate_batch_samples(rng: &mut impl Rng, target_counts: &[u32], num_games: usize) -> Vec<Sample> {
    let mut samples = Vec::new();
    for _ in 0..num_games {
        let mut board = Board::starting_position();
        loop {
            let discs = board.occupied().count();
            if target_counts.contains(&discs) {
                samples.push(Sample { board, label: 0.0 });
            }
            if board.is_end() {
                break;
            }
            if !play_random_move(&mut board, rng) {
                break;
            }
        }
    }
    samples
}

/// The production sample generator (`original_source/learn.cpp::Learn`):
/// play 12 random plies (rejecting a game whose resulting position has
/// already been seen this call), then finish the game with `searcher` at
/// `depth`/`ending_depth`, recording every pre-move board with fewer than
/// `64 - ending_depth` discs on the board, labeled with the final disc
/// difference (Black-favoring) scaled by [`Score::SCALE`].
pub fn generate_full_game_samples(
    rng: &mut impl Rng,
    searcher: &mut Searcher,
    evaluator: &Evaluator,
    num_samples: usize,
    depth: i32,
    ending_depth: u32,
) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut seen = HashSet::new();

    while samples.len() < num_samples {
        let mut board = Board::starting_position();
        for _ in 0..12 {
            if board.is_end() {
                break;
            }
            if !play_random_move(&mut board, rng) {
                break;
            }
        }
        if !seen.insert(board.hash()) {
            continue;
        }

        let mut recorded: Vec<Board> = Vec::new();
        while !board.is_end() {
            if board.occupied().count() < 64 - ending_depth {
                recorded.push(board);
            }
            if board.must_pass() {
                board.pass();
                continue;
            }
            let result = searcher.search(&board, evaluator, depth, ending_depth, &mut ());
            match result.best_move {
                Some(mv) => board.do_move(mv),
                None => board.pass(),
            }
        }

        let totals = board.total_score();
        let label = (totals.black as i32 - totals.white as i32) as f32 * Score::SCALE as f32;
        for recorded_board in recorded {
            if samples.len() >= num_samples {
                break;
            }
            samples.push(Sample { board: recorded_board, label });
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn batch_samples_land_on_requested_disc_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let samples = generate_batch_samples(&mut rng, &[10, 12], 5);
        for sample in &samples {
            let discs = sample.board.occupied().count();
            assert!(discs == 10 || discs == 12);
            assert_eq!(sample.label, 0.0);
        }
    }

    #[test]
    fn full_game_samples_reach_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut searcher = Searcher::with_seed(2);
        let evaluator = Evaluator::zeroed();
        let samples = generate_full_game_samples(&mut rng, &mut searcher, &evaluator, 5, 2, 8);
        assert_eq!(samples.len(), 5);
    }
}
