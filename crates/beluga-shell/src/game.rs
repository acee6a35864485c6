//! `Game`: an ergonomic facade over a [`Board`] and a [`Searcher`], the way a
//! GUI or demo driver consumes the core without touching its internals.

use beluga_core::{Board, Square, TotalScore};
use beluga_engine::search::{SearchHandler, SearchResult, Searcher};
use beluga_engine::Evaluator;

/// One game in progress: current position plus the searcher driving it.
pub struct Game {
    board: Board,
    searcher: Searcher,
    evaluator: Evaluator,
    max_depth: i32,
    ending_depth: u32,
}

impl Game {
    /// A fresh game from the standard starting position.
    pub fn new(evaluator: Evaluator, max_depth: i32, ending_depth: u32) -> Self {
        Self { board: Board::starting_position(), searcher: Searcher::new(), evaluator, max_depth, ending_depth }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn total_score(&self) -> TotalScore {
        self.board.total_score()
    }

    pub fn is_over(&self) -> bool {
        self.board.is_end()
    }

    /// A clone of the searcher's stop-flag handle, so a caller on another
    /// thread can cancel a `play_move` in progress.
    pub fn control(&self) -> beluga_engine::search::control::SearchControl {
        self.searcher.control()
    }

    /// Search the current position and play the resulting move (or pass, if
    /// the side to move has none). Returns `None` once the game has ended.
    pub fn play_move(&mut self, handler: &mut impl SearchHandler) -> Option<SearchResult> {
        if self.board.is_end() {
            return None;
        }
        if self.board.must_pass() {
            self.board.pass();
            return Some(SearchResult { best_move: None, score: 0, ending_flag: false });
        }

        let result = self.searcher.search(&self.board, &self.evaluator, self.max_depth, self.ending_depth, handler);
        if let Some(mv) = result.best_move {
            self.board.do_move(mv);
        }
        Some(result)
    }

    /// Apply an externally-chosen move (e.g. a human player's input) if it is
    /// legal for the side to move. Illegal moves are silently rejected, per
    /// the core's "no error surfaced" contract for shell-driven input.
    pub fn try_move(&mut self, sq: Square) -> bool {
        if !self.board.can_move(sq, self.board.side_to_move()) {
            return false;
        }
        self.board.do_move(sq);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_starts_at_the_standard_opening() {
        let game = Game::new(Evaluator::zeroed(), 2, 0);
        assert_eq!(game.board(), &Board::starting_position());
        assert!(!game.is_over());
    }

    #[test]
    fn play_move_advances_the_position() {
        let mut game = Game::new(Evaluator::zeroed(), 2, 0);
        let before = *game.board();
        let result = game.play_move(&mut ()).unwrap();
        assert!(result.best_move.is_some());
        assert_ne!(game.board(), &before);
    }

    #[test]
    fn stop_flag_is_observed_from_another_thread() {
        use std::sync::{Arc, Barrier};

        let mut game = Game::new(Evaluator::zeroed(), 20, 0);
        let control = game.control();
        let barrier = Arc::new(Barrier::new(2));
        let stopper_barrier = Arc::clone(&barrier);
        let stopper = std::thread::spawn(move || {
            stopper_barrier.wait();
            control.stop();
        });
        barrier.wait();
        let result = game.play_move(&mut ());
        stopper.join().unwrap();
        assert!(result.is_some());
    }
}
