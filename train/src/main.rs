mod adjust;
mod sampler;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use beluga_engine::{Evaluator, Gradient};
use beluga_engine::search::Searcher;

use adjust::adjust_batch;
use sampler::generate_full_game_samples;

const EVAL_PATH: &str = "eval.bin";
const OUTER_ITERATIONS: usize = 10;
const SAMPLES_PER_ITERATION: usize = 100_000;
const BATCHES_PER_ITERATION: usize = 256;
const SEARCH_DEPTH: i32 = 3;
const ENDING_DEPTH: u32 = 10;

fn main() {
    tracing_subscriber::fmt::init();

    let mut evaluator = Evaluator::load(EVAL_PATH).unwrap_or_else(|err| {
        warn!(%err, "falling back to a zero-initialized evaluator");
        Evaluator::zeroed()
    });
    let mut gradient = Gradient::zeroed();
    let mut rng = StdRng::from_entropy();
    let mut searcher = Searcher::new();

    for iteration in 0..OUTER_ITERATIONS {
        info!(iteration, "generating full-game samples");
        let samples = generate_full_game_samples(
            &mut rng,
            &mut searcher,
            &evaluator,
            SAMPLES_PER_ITERATION,
            SEARCH_DEPTH,
            ENDING_DEPTH,
        );

        for batch_index in 0..BATCHES_PER_ITERATION {
            let mean_abs_loss = adjust_batch(&mut evaluator, &mut gradient, &samples, &mut rng);
            evaluator.symmetrize();
            if batch_index % 32 == 0 {
                info!(iteration, batch_index, mean_abs_loss, "adjustment batch complete");
            }
        }

        evaluator.save(EVAL_PATH).unwrap_or_else(|err| {
            warn!(%err, "failed to save parameters at end of iteration");
        });
        info!(iteration, "saved parameters");
    }
}
