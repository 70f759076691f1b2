//! Legal move selection for the side to move.
//!
//! Computes the checking pieces once, then asks each friendly piece for its
//! pseudo-legal destinations filtered through the pin and check-block
//! whitelists. En passant captures get a final check on a scratch copy of the
//! position, because removing two pawns from one rank can expose the king
//! along that rank.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::{
    check_block_whitelist, legal_king_destinations, pin_whitelist, squares_attacking_king,
};
use crate::moves::king_moves::castle_destinations;
use crate::moves::pawn_moves::en_passant_victim;
use crate::moves::piece_rules::{
    pseudo_legal_moves, pseudo_legal_moves_within, Destinations, MoveContext,
};

/// Legal-move table for one side, indexed by origin square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    color: Color,
    attackers: u64,
    table: [Destinations; 64],
}

impl LegalMoves {
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Enemy pieces giving check when the table was built.
    #[inline]
    pub fn attackers(&self) -> u64 {
        self.attackers
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.attackers != 0
    }

    #[inline]
    pub fn destinations(&self, from: Square) -> Destinations {
        self.table[from as usize]
    }

    pub fn has_any(&self) -> bool {
        self.table.iter().any(|d| !d.is_empty())
    }

    /// Origin squares with at least one legal destination.
    pub fn origins(&self) -> impl Iterator<Item = (Square, Destinations)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_empty())
            .map(|(sq, d)| (sq as Square, *d))
    }

    /// Number of distinct plies, counting each promotion once per choice.
    pub fn ply_count(&self) -> usize {
        self.table
            .iter()
            .map(|d| {
                (d.standard | d.en_passant | d.castle).count_ones() as usize
                    + d.promotion.count_ones() as usize * PieceKind::PROMOTION_CHOICES.len()
            })
            .sum()
    }
}

/// Build the legal-move table for `color` in `position`.
pub fn generate_legal_moves(position: &Position, color: Color, ctx: &MoveContext) -> LegalMoves {
    let king = position.king_of(color);
    let attackers = squares_attacking_king(position, color);
    let attacker_count = attackers.count_ones();
    let block = check_block_whitelist(position, attackers, king);

    let mut table = [Destinations::EMPTY; 64];
    for (from, piece) in position.pieces_of(color) {
        let mut destinations = if piece.kind == PieceKind::King {
            Destinations {
                standard: legal_king_destinations(position, color),
                castle: castle_destinations(position, color, ctx.castling_rights),
                ..Destinations::EMPTY
            }
        } else {
            match (pin_whitelist(position, from, king), attacker_count) {
                (_, 2..) => Destinations::EMPTY,
                (Some(pin), 0) => pseudo_legal_moves_within(position, from, ctx, pin),
                (Some(pin), _) => pseudo_legal_moves_within(position, from, ctx, pin & block),
                (None, 1) => pseudo_legal_moves_within(position, from, ctx, block),
                (None, _) => pseudo_legal_moves(position, from, ctx),
            }
        };

        destinations.en_passant = squares_in(destinations.en_passant)
            .filter(|&to| en_passant_keeps_king_safe(position, color, from, to))
            .fold(0u64, |acc, to| acc | square_mask(to));

        table[from as usize] = destinations;
    }

    LegalMoves {
        color,
        attackers,
        table,
    }
}

fn en_passant_keeps_king_safe(position: &Position, color: Color, from: Square, to: Square) -> bool {
    let mut scratch = position.clone();
    scratch.move_piece(from, to);
    scratch.remove(en_passant_victim(from, to));
    squares_attacking_king(&scratch, color) == 0
}
