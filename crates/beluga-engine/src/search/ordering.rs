//! Root move shuffling, so that equally-scored root moves tie-break
//! differently across repeated searches from the same position.

use beluga_core::Square;
use rand::RngCore;
use rand::seq::SliceRandom;

pub fn shuffle_root_moves(moves: &mut [Square], rng: &mut dyn RngCore) {
    moves.shuffle(rng);
}
