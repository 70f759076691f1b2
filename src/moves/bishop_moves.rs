//! Bishop reach on the board.
//!
//! Diagonal rays are traced against the current occupancy; the first piece
//! met on each ray is included so callers can decide between capture and
//! friendly block.

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::moves::move_tables::{ray_table, slide};

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Empty-board diagonal rays, used to test diagonal alignment.
pub const BISHOP_RAYS: [u64; 64] = ray_table(&BISHOP_DIRECTIONS);

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &BISHOP_DIRECTIONS, occupancy)
}

#[inline]
pub fn bishop_destinations(position: &Position, from: Square, color: Color) -> u64 {
    bishop_attacks(from, position.occupancy_all()) & !position.occupancy(color)
}
