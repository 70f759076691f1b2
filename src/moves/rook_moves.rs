//! Rook reach along ranks and files.

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::moves::move_tables::{ray_table, slide};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Empty-board orthogonal rays, used to test rank/file alignment.
pub const ROOK_RAYS: [u64; 64] = ray_table(&ROOK_DIRECTIONS);

/// Orthogonal reach from `square`, stopping on (and including) the first blocker.
#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &ROOK_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_destinations(position: &Position, from: Square, color: Color) -> u64 {
    rook_attacks(from, position.occupancy_all()) & !position.occupancy(color)
}
