//! King steps and castling candidates.
//!
//! Plain king steps here are pseudo-legal; the attack filter lives in
//! `legal_move_checks::legal_king_destinations`. Castling candidates are
//! fully checked here because they depend on attacked transit squares.

use crate::game_state::chess_rules::{castle_king_target, castle_rook_target, king_home, rook_home};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::moves::move_tables::leaper_table;

const KING_STEPS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_STEPS);

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

#[inline]
pub fn king_destinations(position: &Position, from: Square, color: Color) -> u64 {
    king_attacks(from) & !position.occupancy(color)
}

/// King target squares (g- or c-file) for every castle `color` may make now.
pub fn castle_destinations(position: &Position, color: Color, rights: CastlingRights) -> u64 {
    let home = king_home(color);
    if position.king_of(color) != home || is_king_in_check(position, color) {
        return 0;
    }

    [Wing::KingSide, Wing::QueenSide]
        .into_iter()
        .filter(|&wing| can_castle_now(position, color, rights, wing))
        .fold(0u64, |acc, wing| acc | square_mask(castle_king_target(color, wing)))
}

fn can_castle_now(position: &Position, color: Color, rights: CastlingRights, wing: Wing) -> bool {
    if rights & castle_flag(color, wing) == 0 {
        return false;
    }

    let rook_square = rook_home(color, wing);
    if position.piece_at(rook_square) != Some(Piece::new(color, PieceKind::Rook)) {
        return false;
    }

    let home = king_home(color);
    let (low, high) = if rook_square < home {
        (rook_square, home)
    } else {
        (home, rook_square)
    };
    if (low + 1..high).any(|sq| !position.is_empty(sq)) {
        return false;
    }

    [castle_rook_target(color, wing), castle_king_target(color, wing)]
        .into_iter()
        .all(|sq| !is_square_attacked(position, color, sq))
}
