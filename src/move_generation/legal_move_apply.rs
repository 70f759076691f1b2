//! Position mutations for the five move kinds.
//!
//! These functions trust that the move was taken from the legal-move table.
//! They only refuse to run when the origin square is empty.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{
    castle_king_target, castle_rook_target, king_home, rook_home,
};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::pawn_moves::en_passant_victim;

/// What a mutation moved and what, if anything, it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub piece: Piece,
    pub captured: Option<Piece>,
}

pub fn apply_standard(
    position: &mut Position,
    from: Square,
    to: Square,
) -> Result<AppliedMove, ChessErrors> {
    let piece = position
        .piece_at(from)
        .ok_or(ChessErrors::IllegalMove { from, to })?;
    let captured = position.move_piece(from, to);
    Ok(AppliedMove { piece, captured })
}

pub fn apply_en_passant(
    position: &mut Position,
    from: Square,
    to: Square,
) -> Result<AppliedMove, ChessErrors> {
    let piece = position
        .piece_at(from)
        .ok_or(ChessErrors::IllegalMove { from, to })?;
    position.move_piece(from, to);
    let captured = position.remove(en_passant_victim(from, to));
    Ok(AppliedMove { piece, captured })
}

/// Replace the pawn with `kind` on the far rank. `piece` in the result is the
/// pawn that moved.
pub fn apply_promotion(
    position: &mut Position,
    from: Square,
    to: Square,
    kind: PieceKind,
) -> Result<AppliedMove, ChessErrors> {
    if !kind.is_promotion_choice() {
        return Err(ChessErrors::InvalidPromotionChoice(kind));
    }
    let pawn = position
        .remove(from)
        .ok_or(ChessErrors::IllegalMove { from, to })?;
    let captured = position.remove(to);
    position.place(Piece::new(pawn.color, kind), to);
    Ok(AppliedMove {
        piece: pawn,
        captured,
    })
}

/// Move king and rook; the rook lands on the square the king crossed.
pub fn apply_castle(
    position: &mut Position,
    color: Color,
    wing: Wing,
) -> Result<AppliedMove, ChessErrors> {
    let home = king_home(color);
    let king_target = castle_king_target(color, wing);
    let piece = position
        .piece_at(home)
        .filter(|p| p.kind == PieceKind::King)
        .ok_or(ChessErrors::IllegalMove {
            from: home,
            to: king_target,
        })?;

    position.move_piece(home, king_target);
    position.move_piece(rook_home(color, wing), castle_rook_target(color, wing));
    Ok(AppliedMove {
        piece,
        captured: None,
    })
}

/// Rights remaining after `piece` moved `from` → `to`.
///
/// A king leaving home drops both of its flags; anything leaving or landing on
/// a corner drops that corner's flag.
pub fn update_castling_rights(
    rights: CastlingRights,
    piece: Piece,
    from: Square,
    to: Square,
) -> CastlingRights {
    let mut rights = rights;

    if piece.kind == PieceKind::King && from == king_home(piece.color) {
        rights &= !(castle_flag(piece.color, Wing::KingSide)
            | castle_flag(piece.color, Wing::QueenSide));
    }

    for color in [Color::White, Color::Black] {
        for wing in [Wing::KingSide, Wing::QueenSide] {
            let corner = rook_home(color, wing);
            if from == corner || to == corner {
                rights &= !castle_flag(color, wing);
            }
        }
    }

    rights
}

/// Square skipped by a double pawn push, if this move was one.
pub fn en_passant_target_after(piece: Piece, from: Square, to: Square) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || row_of(from).abs_diff(row_of(to)) != 2 {
        return None;
    }
    Some(square_at((row_of(from) + row_of(to)) / 2, col_of(from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn standard_capture_reports_the_taken_piece() {
        let mut position = parse_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - -")
            .expect("test FEN should parse")
            .position;
        let applied = apply_standard(&mut position, square_at(3, 4), square_at(4, 3))
            .expect("pawn should capture");
        assert_eq!(applied.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(
            position.piece_at(square_at(4, 3)),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn en_passant_clears_the_passed_pawn() {
        let mut position = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6")
            .expect("test FEN should parse")
            .position;
        let applied = apply_en_passant(&mut position, square_at(4, 4), square_at(5, 3))
            .expect("en passant should apply");
        assert!(applied.captured.is_some());
        assert!(position.is_empty(square_at(4, 3)));
        assert!(position.piece_at(square_at(5, 3)).is_some());
    }

    #[test]
    fn promotion_rejects_king_and_pawn_without_mutating() {
        let mut position = parse_fen("4k3/1P6/8/8/8/8/8/4K3 w - -")
            .expect("test FEN should parse")
            .position;
        let before = position.clone();
        for kind in [PieceKind::King, PieceKind::Pawn] {
            assert_eq!(
                apply_promotion(&mut position, square_at(6, 1), square_at(7, 1), kind),
                Err(ChessErrors::InvalidPromotionChoice(kind))
            );
        }
        assert_eq!(position, before);
    }

    #[test]
    fn queen_side_castle_moves_rook_to_d_file() {
        let mut position = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq -")
            .expect("test FEN should parse")
            .position;
        apply_castle(&mut position, Color::Black, Wing::QueenSide).expect("castle should apply");
        assert_eq!(position.king_of(Color::Black), square_at(7, 2));
        assert_eq!(
            position.piece_at(square_at(7, 3)),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert!(position.is_empty(square_at(7, 0)));
    }

    #[test]
    fn castling_rights_drop_on_king_moves_and_corner_captures() {
        let king = Piece::new(Color::White, PieceKind::King);
        let rights = update_castling_rights(CASTLE_ALL, king, square_at(0, 4), square_at(1, 4));
        assert_eq!(rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);

        let bishop = Piece::new(Color::White, PieceKind::Bishop);
        let rights = update_castling_rights(CASTLE_ALL, bishop, square_at(6, 6), square_at(7, 7));
        assert_eq!(rights, CASTLE_ALL & !CASTLE_BLACK_KINGSIDE);
    }

    #[test]
    fn only_double_pushes_leave_an_en_passant_target() {
        let pawn = Piece::new(Color::Black, PieceKind::Pawn);
        assert_eq!(
            en_passant_target_after(pawn, square_at(6, 3), square_at(4, 3)),
            Some(square_at(5, 3))
        );
        assert_eq!(en_passant_target_after(pawn, square_at(6, 3), square_at(5, 3)), None);
    }
}
