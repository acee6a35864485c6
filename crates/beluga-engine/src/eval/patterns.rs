//! Pattern-table geometry: which squares feed which table, and the
//! base-3 Horner encoding used to index a table cell from a board.
//!
//! Square orderings below are load-bearing: they define which ternary
//! code maps to which table cell, and must not be reordered.

use beluga_core::{Board, Color, Square};

/// Number of cells in a table indexed by an `n`-square pattern.
pub const fn cells(squares: usize) -> usize {
    3usize.pow(squares as u32)
}

pub const EDGE_CELLS: usize = cells(10);
pub const HOR_CELLS: usize = cells(8);
pub const DIAG7_CELLS: usize = cells(7);
pub const DIAG6_CELLS: usize = cells(6);
pub const DIAG5_CELLS: usize = cells(5);
pub const DIAG4_CELLS: usize = cells(4);
pub const CORNER3X3_CELLS: usize = cells(9);
pub const CORNER5X2_CELLS: usize = cells(10);

const fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

pub const EDGE_INSTANCES: [[Square; 10]; 4] = [
    [sq(1,1), sq(0,0), sq(0,1), sq(0,2), sq(0,3), sq(0,4), sq(0,5), sq(0,6), sq(0,7), sq(1,6)],
    [sq(6,1), sq(7,0), sq(7,1), sq(7,2), sq(7,3), sq(7,4), sq(7,5), sq(7,6), sq(7,7), sq(6,6)],
    [sq(1,1), sq(0,0), sq(1,0), sq(2,0), sq(3,0), sq(4,0), sq(5,0), sq(6,0), sq(7,0), sq(6,1)],
    [sq(1,6), sq(0,7), sq(1,7), sq(2,7), sq(3,7), sq(4,7), sq(5,7), sq(6,7), sq(7,7), sq(6,6)],
];

pub const HOR2_INSTANCES: [[Square; 8]; 4] = [
    [sq(1,0), sq(1,1), sq(1,2), sq(1,3), sq(1,4), sq(1,5), sq(1,6), sq(1,7)],
    [sq(6,0), sq(6,1), sq(6,2), sq(6,3), sq(6,4), sq(6,5), sq(6,6), sq(6,7)],
    [sq(0,1), sq(1,1), sq(2,1), sq(3,1), sq(4,1), sq(5,1), sq(6,1), sq(7,1)],
    [sq(0,6), sq(1,6), sq(2,6), sq(3,6), sq(4,6), sq(5,6), sq(6,6), sq(7,6)],
];

pub const HOR3_INSTANCES: [[Square; 8]; 4] = [
    [sq(2,0), sq(2,1), sq(2,2), sq(2,3), sq(2,4), sq(2,5), sq(2,6), sq(2,7)],
    [sq(5,0), sq(5,1), sq(5,2), sq(5,3), sq(5,4), sq(5,5), sq(5,6), sq(5,7)],
    [sq(0,2), sq(1,2), sq(2,2), sq(3,2), sq(4,2), sq(5,2), sq(6,2), sq(7,2)],
    [sq(0,5), sq(1,5), sq(2,5), sq(3,5), sq(4,5), sq(5,5), sq(6,5), sq(7,5)],
];

pub const HOR4_INSTANCES: [[Square; 8]; 4] = [
    [sq(3,0), sq(3,1), sq(3,2), sq(3,3), sq(3,4), sq(3,5), sq(3,6), sq(3,7)],
    [sq(4,0), sq(4,1), sq(4,2), sq(4,3), sq(4,4), sq(4,5), sq(4,6), sq(4,7)],
    [sq(0,3), sq(1,3), sq(2,3), sq(3,3), sq(4,3), sq(5,3), sq(6,3), sq(7,3)],
    [sq(0,4), sq(1,4), sq(2,4), sq(3,4), sq(4,4), sq(5,4), sq(6,4), sq(7,4)],
];

pub const DIAG8_INSTANCES: [[Square; 8]; 2] = [
    [sq(0,0), sq(1,1), sq(2,2), sq(3,3), sq(4,4), sq(5,5), sq(6,6), sq(7,7)],
    [sq(7,0), sq(6,1), sq(5,2), sq(4,3), sq(3,4), sq(2,5), sq(1,6), sq(0,7)],
];

pub const DIAG7_INSTANCES: [[Square; 7]; 4] = [
    [sq(0,1), sq(1,2), sq(2,3), sq(3,4), sq(4,5), sq(5,6), sq(6,7)],
    [sq(1,0), sq(2,1), sq(3,2), sq(4,3), sq(5,4), sq(6,5), sq(7,6)],
    [sq(7,1), sq(6,2), sq(5,3), sq(4,4), sq(3,5), sq(2,6), sq(1,7)],
    [sq(6,0), sq(5,1), sq(4,2), sq(3,3), sq(2,4), sq(1,5), sq(0,6)],
];

pub const DIAG6_INSTANCES: [[Square; 6]; 4] = [
    [sq(0,2), sq(1,3), sq(2,4), sq(3,5), sq(4,6), sq(5,7)],
    [sq(2,0), sq(3,1), sq(4,2), sq(5,3), sq(6,4), sq(7,5)],
    [sq(7,2), sq(6,3), sq(5,4), sq(4,5), sq(3,6), sq(2,7)],
    [sq(5,0), sq(4,1), sq(3,2), sq(2,3), sq(1,4), sq(0,5)],
];

pub const DIAG5_INSTANCES: [[Square; 5]; 4] = [
    [sq(0,3), sq(1,4), sq(2,5), sq(3,6), sq(4,7)],
    [sq(3,0), sq(4,1), sq(5,2), sq(6,3), sq(7,4)],
    [sq(7,3), sq(6,4), sq(5,5), sq(4,6), sq(3,7)],
    [sq(4,0), sq(3,1), sq(2,2), sq(1,3), sq(0,4)],
];

pub const DIAG4_INSTANCES: [[Square; 4]; 4] = [
    [sq(0,4), sq(1,5), sq(2,6), sq(3,7)],
    [sq(4,0), sq(5,1), sq(6,2), sq(7,3)],
    [sq(7,4), sq(6,5), sq(5,6), sq(4,7)],
    [sq(3,0), sq(2,1), sq(1,2), sq(0,3)],
];

pub const CORNER3X3_INSTANCES: [[Square; 9]; 4] = [
    [sq(0,0), sq(0,1), sq(0,2), sq(1,0), sq(1,1), sq(1,2), sq(2,0), sq(2,1), sq(2,2)],
    [sq(0,7), sq(0,6), sq(0,5), sq(1,7), sq(1,6), sq(1,5), sq(2,7), sq(2,6), sq(2,5)],
    [sq(7,0), sq(7,1), sq(7,2), sq(6,0), sq(6,1), sq(6,2), sq(5,0), sq(5,1), sq(5,2)],
    [sq(7,7), sq(7,6), sq(7,5), sq(6,7), sq(6,6), sq(6,5), sq(5,7), sq(5,6), sq(5,5)],
];

pub const CORNER5X2_INSTANCES: [[Square; 10]; 8] = [
    [sq(0,0), sq(0,1), sq(0,2), sq(0,3), sq(0,4), sq(1,0), sq(1,1), sq(1,2), sq(1,3), sq(1,4)],
    [sq(0,7), sq(0,6), sq(0,5), sq(0,4), sq(0,3), sq(1,7), sq(1,6), sq(1,5), sq(1,4), sq(1,3)],
    [sq(7,0), sq(7,1), sq(7,2), sq(7,3), sq(7,4), sq(6,0), sq(6,1), sq(6,2), sq(6,3), sq(6,4)],
    [sq(7,7), sq(7,6), sq(7,5), sq(7,4), sq(7,3), sq(6,7), sq(6,6), sq(6,5), sq(6,4), sq(6,3)],
    [sq(0,0), sq(1,0), sq(2,0), sq(3,0), sq(4,0), sq(0,1), sq(1,1), sq(2,1), sq(3,1), sq(4,1)],
    [sq(7,0), sq(6,0), sq(5,0), sq(4,0), sq(3,0), sq(7,1), sq(6,1), sq(5,1), sq(4,1), sq(3,1)],
    [sq(0,7), sq(1,7), sq(2,7), sq(3,7), sq(4,7), sq(0,6), sq(1,6), sq(2,6), sq(3,6), sq(4,6)],
    [sq(7,7), sq(6,7), sq(5,7), sq(4,7), sq(3,7), sq(7,6), sq(6,6), sq(5,6), sq(4,6), sq(3,6)],
];

/// Permutation applied to a Corner3x3 digit sequence to get its 3x3 transpose:
/// new digit `k` comes from old digit `TRANSPOSE_PERM[k]`.
pub const CORNER3X3_TRANSPOSE_PERM: [usize; 9] = [0, 3, 6, 1, 4, 7, 2, 5, 8];

/// Sum `table[horner_index(board, instance)]` over every instance.
pub fn sum_over_instances<T, const N: usize, const M: usize>(
    board: &Board,
    instances: &[[Square; N]; M],
    table: &[T],
) -> T
where
    T: Copy + Default + std::ops::Add<Output = T>,
{
    let mut total = T::default();
    for instance in instances {
        total = total + table[horner_index(board, instance)];
    }
    total
}

/// Add `g` to `table[horner_index(board, instance)]` for every instance.
pub fn add_over_instances<T, const N: usize, const M: usize>(
    board: &Board,
    instances: &[[Square; N]; M],
    table: &mut [T],
    g: T,
) where
    T: Copy + std::ops::Add<Output = T>,
{
    for instance in instances {
        let idx = horner_index(board, instance);
        table[idx] = table[idx] + g;
    }
}

/// Base-3 Horner index of `squares` on `board`: empty=0, black=1, white=2.
pub fn horner_index(board: &Board, squares: &[Square]) -> usize {
    let mut index = 0usize;
    for &square in squares {
        let digit = match board.get(square) {
            None => 0,
            Some(Color::Black) => 1,
            Some(Color::White) => 2,
        };
        index = index * 3 + digit;
    }
    index
}

/// Decompose `index` (an `n`-digit base-3 Horner code) into its digits,
/// most-significant first.
pub fn ternary_digits(mut index: usize, n: usize) -> Vec<u8> {
    let mut digits = vec![0u8; n];
    for slot in digits.iter_mut().rev() {
        *slot = (index % 3) as u8;
        index /= 3;
    }
    digits
}

/// Re-encode a most-significant-first digit sequence as a Horner index.
pub fn from_ternary_digits(digits: &[u8]) -> usize {
    digits.iter().fold(0usize, |acc, &d| acc * 3 + d as usize)
}

/// The index whose digit sequence is `index`'s reversed.
pub fn reverse_index(index: usize, n: usize) -> usize {
    let mut digits = ternary_digits(index, n);
    digits.reverse();
    from_ternary_digits(&digits)
}

/// The index whose digit sequence is `index`'s permuted by `perm`
/// (`new_digits[k] = old_digits[perm[k]]`).
pub fn permuted_index(index: usize, n: usize, perm: &[usize]) -> usize {
    let digits = ternary_digits(index, n);
    let new_digits: Vec<u8> = (0..n).map(|k| digits[perm[k]]).collect();
    from_ternary_digits(&new_digits)
}
