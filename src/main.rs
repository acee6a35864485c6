use anyhow::Result;
use tracing::{info, warn};

use beluga_engine::Evaluator;
use beluga_engine::search::SearchEvent;
use beluga_shell::Game;

const EVAL_PATH: &str = "eval.bin";
const MAX_DEPTH: i32 = 6;
const ENDING_DEPTH: u32 = 10;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let evaluator = Evaluator::load(EVAL_PATH).unwrap_or_else(|err| {
        warn!(%err, "falling back to a zero-initialized evaluator");
        Evaluator::zeroed()
    });

    let mut game = Game::new(evaluator, MAX_DEPTH, ENDING_DEPTH);
    let mut handler = |event: SearchEvent| {
        if let SearchEvent::Iterate { depth, score, nodes, .. } = event {
            info!(depth, score, nodes, "search iteration complete");
        }
    };

    while !game.is_over() {
        let result = game
            .play_move(&mut handler)
            .expect("is_over() already checked above, so a move must exist or a pass must occur");
        if let Some(mv) = result.best_move {
            info!(move_ = %mv, score = result.score, ending = result.ending_flag, "played move");
        } else {
            info!("passed");
        }
    }

    let totals = game.total_score();
    info!(black = totals.black, white = totals.white, winner = ?totals.winner, "game over");
    Ok(())
}
