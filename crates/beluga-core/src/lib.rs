//! Core Reversi types: bitboard position representation, move generation,
//! and Zobrist hashing.

mod bitboard;
mod board;
mod color;
mod square;
mod zobrist;

pub use bitboard::Bitboard;
pub use board::{Board, TotalScore, Winner};
pub use color::Color;
pub use square::{Direction, Square};
