//! The Reversi board: two bitboards plus side to move.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::{Direction, Square};
use crate::zobrist;

/// Final disc tally and winner of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    BlackWon,
    WhiteWon,
    Draw,
}

/// Disc counts and winner, as returned by [`Board::total_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalScore {
    pub black: u32,
    pub white: u32,
    pub winner: Winner,
}

/// Complete Reversi position state: black discs, white discs, side to move.
///
/// Invariant: `black & white == 0`; a square is empty iff neither bit is set.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
    side_to_move: Color,
    hash: u64,
}

impl Board {
    /// An empty board with Black to move.
    pub fn empty() -> Board {
        let mut board = Board {
            black: Bitboard::EMPTY,
            white: Bitboard::EMPTY,
            side_to_move: Color::Black,
            hash: 0,
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    /// The standard Reversi starting position: white on d4/e5, black on e4/d5,
    /// Black to move.
    pub fn starting_position() -> Board {
        let mut board = Board {
            black: Bitboard::EMPTY.with(Square::E4).with(Square::D5),
            white: Bitboard::EMPTY.with(Square::D4).with(Square::E5),
            side_to_move: Color::Black,
            hash: 0,
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    #[inline]
    pub fn black(&self) -> Bitboard {
        self.black
    }

    #[inline]
    pub fn white(&self) -> Bitboard {
        self.white
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Return the disc color occupying `sq`, if any.
    pub fn get(&self, sq: Square) -> Option<Color> {
        if self.black.contains(sq) {
            Some(Color::Black)
        } else if self.white.contains(sq) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Zobrist hash of the position, a pure function of `(black, white)`.
    ///
    /// Does not incorporate side to move: two positions with identical discs
    /// but different side-to-move collide. The search never probes the TT
    /// across a bare `Pass` without the boards also having changed, so this
    /// has not been observed to cause incorrect cutoffs, but it remains a
    /// latent hash-collision source rather than a verified-safe design.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    fn side_bitboard(&self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// The bitboard of discs that would flip in `dir` if `color` played `sq`,
    /// or `None` if that direction contributes no flips.
    fn ray_flip(&self, sq: Square, color: Color, dir: Direction) -> Option<Bitboard> {
        let own = self.side_bitboard(color);
        let opponent = self.side_bitboard(!color);

        let mut mask = Bitboard::EMPTY;
        let mut cur = sq;
        loop {
            let next = cur.step(dir)?;
            if opponent.contains(next) {
                mask = mask.with(next);
                cur = next;
            } else if own.contains(next) {
                return if mask.is_empty() { None } else { Some(mask) };
            } else {
                return None;
            }
        }
    }

    /// True iff `square` is empty and playing `color` there flips at least
    /// one opponent disc in some direction.
    pub fn can_move(&self, sq: Square, color: Color) -> bool {
        if self.occupied().contains(sq) {
            return false;
        }
        Direction::ALL.iter().any(|&dir| self.ray_flip(sq, color, dir).is_some())
    }

    /// Legal destination squares for `color`.
    ///
    /// Restricts the candidate set to empty squares adjacent to at least one
    /// opposite-colored disc before testing `can_move`, for efficiency.
    pub fn generate_moves_for(&self, color: Color) -> Bitboard {
        let opponent = self.side_bitboard(!color);
        let mut adjacent = Bitboard::EMPTY;
        for dir in Direction::ALL {
            adjacent |= opponent.shift(dir);
        }
        let candidates = adjacent & self.empty_squares();

        let mut moves = Bitboard::EMPTY;
        for sq in candidates {
            if self.can_move(sq, color) {
                moves = moves.with(sq);
            }
        }
        moves
    }

    /// Legal destination squares for the side to move.
    pub fn generate_moves(&self) -> Bitboard {
        self.generate_moves_for(self.side_to_move)
    }

    /// Play `sq` for the side to move, flipping bracketed discs and toggling
    /// side to move. Returns the flip mask so `undo_move` can reverse it.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `sq` is a legal move.
    pub fn do_move(&mut self, sq: Square) -> Bitboard {
        let color = self.side_to_move;
        debug_assert!(self.can_move(sq, color));

        let mut flip_mask = Bitboard::EMPTY;
        for dir in Direction::ALL {
            if let Some(mask) = self.ray_flip(sq, color, dir) {
                flip_mask |= mask;
            }
        }

        self.black ^= flip_mask;
        self.white ^= flip_mask;
        match color {
            Color::Black => self.black = self.black.with(sq),
            Color::White => self.white = self.white.with(sq),
        }
        self.side_to_move = !self.side_to_move;
        self.hash = zobrist::hash_from_scratch(self);

        flip_mask
    }

    /// Reverse a prior `do_move(sq)` given the flip mask it returned.
    pub fn undo_move(&mut self, sq: Square, flip_mask: Bitboard) {
        self.side_to_move = !self.side_to_move;
        let color = self.side_to_move;
        match color {
            Color::Black => self.black = self.black.without(sq),
            Color::White => self.white = self.white.without(sq),
        }
        self.black ^= flip_mask;
        self.white ^= flip_mask;
        self.hash = zobrist::hash_from_scratch(self);
    }

    /// True iff the side to move has no legal move.
    pub fn must_pass(&self) -> bool {
        self.generate_moves().is_empty()
    }

    /// True iff neither side has a legal move.
    pub fn is_end(&self) -> bool {
        self.generate_moves_for(Color::Black).is_empty()
            && self.generate_moves_for(Color::White).is_empty()
    }

    /// Toggle side to move without touching the discs.
    pub fn pass(&mut self) {
        self.side_to_move = !self.side_to_move;
        // Hash does not depend on side to move (see `hash`), so it is
        // unchanged, but recomputed for symmetry with do_move/undo_move.
        self.hash = zobrist::hash_from_scratch(self);
    }

    /// Final disc counts and winner.
    pub fn total_score(&self) -> TotalScore {
        let black = self.black.count();
        let white = self.white.count();
        let winner = match black.cmp(&white) {
            std::cmp::Ordering::Greater => Winner::BlackWon,
            std::cmp::Ordering::Less => Winner::WhiteWon,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        TotalScore { black, white, winner }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in (0..8).rev() {
            write!(f, "  {} ", row + 1)?;
            for col in 0..8 {
                let sq = Square::new(row, col);
                let c = match self.get(sq) {
                    Some(Color::Black) => 'b',
                    Some(Color::White) => 'w',
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "    a b c d e f g h")
    }
}
