//! Builders for the per-square attack tables.
//!
//! Steps and directions are `(row delta, column delta)` pairs, the same
//! convention as `offset_square`. Tables are built at compile time; sliding
//! attacks against a live occupancy are walked at run time.

use crate::game_state::chess_types::{offset_square, square_mask, Square};

#[inline]
const fn on_board(row: i8, col: i8) -> bool {
    row >= 0 && row < 8 && col >= 0 && col < 8
}

/// One-hop reach from every square, for pieces that jump a fixed step.
pub(crate) const fn leaper_table(steps: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut i = 0;
        while i < steps.len() {
            let (to_row, to_col) = (row + steps[i].0, col + steps[i].1);
            if on_board(to_row, to_col) {
                table[sq] |= 1u64 << (to_row * 8 + to_col) as u32;
            }
            i += 1;
        }
        sq += 1;
    }

    table
}

/// Full empty-board rays from every square in the given directions.
pub(crate) const fn ray_table(directions: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut i = 0;
        while i < directions.len() {
            let (d_row, d_col) = directions[i];
            let mut row = (sq / 8) as i8 + d_row;
            let mut col = (sq % 8) as i8 + d_col;
            while on_board(row, col) {
                table[sq] |= 1u64 << (row * 8 + col) as u32;
                row += d_row;
                col += d_col;
            }
            i += 1;
        }
        sq += 1;
    }

    table
}

/// Sliding reach from `square`; each ray stops on, and includes, the first
/// occupied square.
pub(crate) fn slide(square: Square, directions: &[(i8, i8)], occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    for &(d_row, d_col) in directions {
        let mut current = square;
        while let Some(next) = offset_square(current, d_row, d_col) {
            let bit = square_mask(next);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            current = next;
        }
    }
    attacks
}
