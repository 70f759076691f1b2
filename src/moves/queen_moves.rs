use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::moves::bishop_moves::BISHOP_RAYS;
use crate::moves::move_tables::slide;
use crate::moves::rook_moves::ROOK_RAYS;

const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const QUEEN_RAYS: [u64; 64] = queen_rays();

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &QUEEN_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_destinations(position: &Position, from: Square, color: Color) -> u64 {
    queen_attacks(from, position.occupancy_all()) & !position.occupancy(color)
}

const fn queen_rays() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = BISHOP_RAYS[sq] | ROOK_RAYS[sq];
        sq += 1;
    }
    table
}
