//! Per-piece movement dispatch.
//!
//! Every piece kind answers the same question: which squares could it move to
//! from here, ignoring whether its own king ends up in check. The answer is
//! split by move kind so the caller can apply the right mutation later.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::{castle_destinations, king_destinations};
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::{en_passant_victim, pawn_destinations};
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;

/// Destination squares of one piece, grouped by how the move is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Destinations {
    pub standard: u64,
    pub en_passant: u64,
    pub promotion: u64,
    /// King target squares of available castles.
    pub castle: u64,
}

impl Destinations {
    pub const EMPTY: Destinations = Destinations {
        standard: 0,
        en_passant: 0,
        promotion: 0,
        castle: 0,
    };

    #[inline]
    pub fn all(&self) -> u64 {
        self.standard | self.en_passant | self.promotion | self.castle
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.all() == 0
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.all() & square_mask(square) != 0
    }
}

/// Game-level facts piece movement depends on beyond the placement itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext {
    pub castling_rights: CastlingRights,
    /// Square skipped by the immediately preceding double pawn push.
    pub en_passant_target: Option<Square>,
}

impl Default for MoveContext {
    fn default() -> Self {
        Self {
            castling_rights: CASTLE_ALL,
            en_passant_target: None,
        }
    }
}

/// Pseudo-legal destinations of the piece on `from`; empty for an empty square.
pub fn pseudo_legal_moves(position: &Position, from: Square, ctx: &MoveContext) -> Destinations {
    let Some(piece) = position.piece_at(from) else {
        return Destinations::EMPTY;
    };
    let color = piece.color;

    match piece.kind {
        PieceKind::Pawn => pawn_destinations(position, from, color, ctx.en_passant_target),
        PieceKind::Knight => standard_only(knight_destinations(position, from, color)),
        PieceKind::Bishop => standard_only(bishop_destinations(position, from, color)),
        PieceKind::Rook => standard_only(rook_destinations(position, from, color)),
        PieceKind::Queen => standard_only(queen_destinations(position, from, color)),
        PieceKind::King => Destinations {
            standard: king_destinations(position, from, color),
            castle: castle_destinations(position, color, ctx.castling_rights),
            ..Destinations::EMPTY
        },
    }
}

/// Pseudo-legal destinations restricted to `whitelist`.
///
/// An en passant capture survives when either its landing square or the
/// captured pawn's square is whitelisted, so a checking pawn can be taken
/// en passant.
pub fn pseudo_legal_moves_within(
    position: &Position,
    from: Square,
    ctx: &MoveContext,
    whitelist: u64,
) -> Destinations {
    let pseudo = pseudo_legal_moves(position, from, ctx);

    let en_passant = squares_in(pseudo.en_passant)
        .filter(|&to| {
            let victim = en_passant_victim(from, to);
            (square_mask(to) | square_mask(victim)) & whitelist != 0
        })
        .fold(0u64, |acc, to| acc | square_mask(to));

    Destinations {
        standard: pseudo.standard & whitelist,
        en_passant,
        promotion: pseudo.promotion & whitelist,
        castle: pseudo.castle & whitelist,
    }
}

#[inline]
fn standard_only(standard: u64) -> Destinations {
    Destinations {
        standard,
        ..Destinations::EMPTY
    }
}
