//! Ergonomic facade over `beluga-core`/`beluga-engine`, for a GUI or demo
//! driver that only wants to play moves and observe search progress.

pub mod game;

pub use game::Game;
