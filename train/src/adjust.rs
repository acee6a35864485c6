//! The adjustment loop: turn accumulated loss into small integer parameter
//! steps, mirroring `original_source/learn.cpp`'s training update.

use rand::Rng;

use beluga_engine::eval::Score;
use beluga_engine::{Evaluator, Gradient};

use crate::sampler::Sample;

const LEARNING_RATE: f32 = 1e-4;
const L1_SHRINKAGE: f32 = 1e-3;

/// Run one adjustment batch over `samples`, mutating `evaluator` in place.
/// Returns the mean absolute loss for progress reporting.
pub fn adjust_batch(evaluator: &mut Evaluator, gradient: &mut Gradient, samples: &[Sample], rng: &mut impl Rng) -> f32 {
    gradient.clear();
    let mut total_abs_loss = 0.0f32;

    for sample in samples {
        let predicted = evaluator.evaluate(&sample.board).value() as f32;
        let loss = (sample.label - predicted) / Score::SCALE as f32;
        total_abs_loss += loss.abs();
        gradient.add(&sample.board, loss * LEARNING_RATE);
    }
    gradient.symmetrize();

    for (param_table, grad_table) in evaluator.params_mut().tables_mut().into_iter().zip(gradient.params_mut().tables_mut()) {
        for (cell, g) in param_table.iter_mut().zip(grad_table.iter_mut()) {
            let mut g_shrunk = *g;
            if g_shrunk > 0.0 {
                g_shrunk -= L1_SHRINKAGE;
            } else if g_shrunk < 0.0 {
                g_shrunk += L1_SHRINKAGE;
            }

            let step = if g_shrunk == 0.0 {
                0
            } else {
                let s1 = rng.gen_bool(0.5) as i16;
                let s2 = rng.gen_bool(0.5) as i16;
                let magnitude = s1 + s2;
                if g_shrunk > 0.0 { magnitude } else { -magnitude }
            };

            *cell = *cell + Score::new(step);
        }
    }

    if samples.is_empty() { 0.0 } else { total_abs_loss / samples.len() as f32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beluga_core::Board;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_samples_produces_zero_loss_and_leaves_parameters_untouched() {
        let mut evaluator = Evaluator::zeroed();
        let mut gradient = Gradient::zeroed();
        let mut rng = StdRng::seed_from_u64(3);
        let loss = adjust_batch(&mut evaluator, &mut gradient, &[], &mut rng);
        assert_eq!(loss, 0.0);
        assert_eq!(evaluator.evaluate(&Board::starting_position()), Score::ZERO);
    }

    #[test]
    fn a_nonzero_label_nudges_the_matching_cell_away_from_zero() {
        let mut evaluator = Evaluator::zeroed();
        let mut gradient = Gradient::zeroed();
        let mut rng = StdRng::seed_from_u64(4);
        let board = Board::starting_position();
        let samples = vec![Sample { board, label: 64.0 * Score::SCALE as f32 }];
        adjust_batch(&mut evaluator, &mut gradient, &samples, &mut rng);
        assert_ne!(evaluator.evaluate(&board), Score::ZERO);
    }
}
