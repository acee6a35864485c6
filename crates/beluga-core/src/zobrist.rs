//! Zobrist hashing keys for transposition-table lookups.
//!
//! 32 tables of 16 `u64` constants, one table per 4-bit (nibble) window of
//! the black and white bitboards (16 nibbles each). The hash XORs all 32
//! nibble lookups together. It intentionally does not fold in side-to-move
//! (see `Board::hash`).

use crate::board::Board;

/// `NIBBLE_KEYS[t]` holds the 16 possible keys for nibble `t`.
/// `t` in `0..16` indexes black's nibbles, `t` in `16..32` indexes white's.
pub(crate) static NIBBLE_KEYS: [[u64; 16]; 32] = {
    let mut table = [[0u64; 16]; 32];
    let mut state = SEED;
    let mut t = 0;
    while t < 32 {
        let mut v = 0;
        while v < 16 {
            let (val, next) = xorshift64(state);
            table[t][v] = val;
            state = next;
            v += 1;
        }
        t += 1;
    }
    table
};

const SEED: u64 = 0x6265_6c75_6761_0001; // "beluga" + 0x0001

/// Xorshift64 PRNG. Returns (value, next_state).
const fn xorshift64(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

/// Compute a Zobrist hash from scratch for the given board's bitboards.
pub(crate) fn hash_from_scratch(board: &Board) -> u64 {
    let black = board.black().inner();
    let white = board.white().inner();

    let mut hash = 0u64;
    for t in 0..16 {
        let nibble = ((black >> (4 * t)) & 0xF) as usize;
        hash ^= NIBBLE_KEYS[t][nibble];
    }
    for t in 0..16 {
        let nibble = ((white >> (4 * t)) & 0xF) as usize;
        hash ^= NIBBLE_KEYS[16 + t][nibble];
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn starting_position_hash_matches_field() {
        let board = Board::starting_position();
        assert_eq!(board.hash(), hash_from_scratch(&board));
    }

    #[test]
    fn hash_is_pure_function_of_bitboards() {
        let a = Board::starting_position();
        let b = Board::starting_position();
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn different_positions_different_hashes() {
        let start = Board::starting_position();
        let mut after_move = start;
        after_move.do_move(crate::square::Square::F5);
        assert_ne!(start.hash(), after_move.hash());
    }

    #[test]
    fn all_nibble_keys_distinct() {
        let mut all_keys = Vec::new();
        for table in &NIBBLE_KEYS {
            all_keys.extend_from_slice(table);
        }
        let count = all_keys.len();
        all_keys.sort();
        all_keys.dedup();
        assert_eq!(all_keys.len(), count, "some Zobrist keys collide");
    }
}
