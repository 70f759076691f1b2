//! Pawn pushes, captures, promotions and en passant.

use crate::game_state::chess_rules::{en_passant_row, pawn_start_row, promotion_row};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_tables::leaper_table;
use crate::moves::piece_rules::Destinations;

pub const WHITE_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(1, -1), (1, 1)]);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, -1), (-1, 1)]);

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

/// Pseudo-legal pawn moves. Anything reaching the far rank lands in the
/// promotion set instead of the standard set.
pub fn pawn_destinations(
    position: &Position,
    from: Square,
    color: Color,
    en_passant_target: Option<Square>,
) -> Destinations {
    let mut targets = 0u64;

    if let Some(one) = offset_square(from, color.forward(), 0) {
        if position.is_empty(one) {
            targets |= square_mask(one);
            if row_of(from) == pawn_start_row(color) {
                if let Some(two) = offset_square(one, color.forward(), 0) {
                    if position.is_empty(two) {
                        targets |= square_mask(two);
                    }
                }
            }
        }
    }

    targets |= pawn_attacks(color, from) & position.occupancy(color.opposite());

    let far_rank = rank_mask(promotion_row(color));
    let mut destinations = Destinations {
        standard: targets & !far_rank,
        promotion: targets & far_rank,
        ..Destinations::default()
    };

    if let Some(target) = en_passant_target {
        if is_en_passant_capture(position, from, color, target) {
            destinations.en_passant = square_mask(target);
        }
    }

    destinations
}

/// Square of the pawn removed by an en passant capture landing on `to`.
#[inline]
pub fn en_passant_victim(from: Square, to: Square) -> Square {
    square_at(row_of(from), col_of(to))
}

fn is_en_passant_capture(position: &Position, from: Square, color: Color, target: Square) -> bool {
    if row_of(from) != en_passant_row(color) {
        return false;
    }
    if pawn_attacks(color, from) & square_mask(target) == 0 || !position.is_empty(target) {
        return false;
    }
    position.piece_at(en_passant_victim(from, target))
        == Some(Piece::new(color.opposite(), PieceKind::Pawn))
}

#[inline]
fn rank_mask(row: u8) -> u64 {
    0xFFu64 << (row * 8)
}
