use crate::game_state::chess_types::{Color, Square};
use crate::game_state::position::Position;
use crate::moves::move_tables::leaper_table;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_STEPS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

/// Knight jumps that do not land on a friendly piece.
#[inline]
pub fn knight_destinations(position: &Position, from: Square, color: Color) -> u64 {
    knight_attacks(from) & !position.occupancy(color)
}
