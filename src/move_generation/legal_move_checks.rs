//! Attack, check and pin analysis.
//!
//! All queries walk outward from a target square: knight offsets, the four
//! diagonals (bishops, queens, and pawns only from the side they capture
//! toward), the four orthogonals (rooks, queens) and the adjacent ring for
//! the enemy king.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_RAYS};
use crate::moves::king_moves::{king_attacks, king_destinations};
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::{rook_attacks, ROOK_RAYS};

/// Mask of enemy pieces currently giving check to `color`'s king.
#[inline]
pub fn squares_attacking_king(position: &Position, color: Color) -> u64 {
    let king = position.king_of(color);
    attackers_to_square(position, color, king, position.occupancy_all())
}

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    squares_attacking_king(position, color) != 0
}

/// Whether `color`'s king would be attacked standing on `square`.
///
/// The king's current square counts as empty, so a slider's ray continues
/// through it, and squares next to the enemy king count as attacked.
pub fn is_square_attacked(position: &Position, color: Color, square: Square) -> bool {
    let occupancy = position.occupancy_all() & !square_mask(position.king_of(color));
    if attackers_to_square(position, color, square, occupancy) != 0 {
        return true;
    }
    king_attacks(square) & position.pieces(color.opposite(), PieceKind::King) != 0
}

/// King steps that avoid friendly pieces, attacked squares and the enemy king.
pub fn legal_king_destinations(position: &Position, color: Color) -> u64 {
    let king = position.king_of(color);
    squares_in(king_destinations(position, king, color))
        .filter(|&sq| !is_square_attacked(position, color, sq))
        .fold(0u64, |acc, sq| acc | square_mask(sq))
}

/// Squares a non-king piece may move to in order to answer a check.
///
/// Empty unless there is exactly one attacker. A knight or pawn check can only
/// be answered by capturing; a slider check also by interposing.
pub fn check_block_whitelist(position: &Position, attackers: u64, king: Square) -> u64 {
    if attackers.count_ones() != 1 {
        return 0;
    }
    let attacker = attackers.trailing_zeros() as Square;
    let attacker_mask = square_mask(attacker);

    match position.piece_at(attacker).map(|piece| piece.kind) {
        Some(PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
            squares_between(king, attacker) | attacker_mask
        }
        _ => attacker_mask,
    }
}

/// Ray the piece on `square` is confined to because it shields `king`.
///
/// `Some(ray)` holds the squares from beside the king up to and including the
/// pinning slider; `None` when the piece is free to leave the line.
pub fn pin_whitelist(position: &Position, square: Square, king: Square) -> Option<u64> {
    let piece = position.piece_at(square)?;
    let king_piece = position.piece_at(king)?;
    if piece.color != king_piece.color || square == king {
        return None;
    }

    let diagonal = BISHOP_RAYS[king as usize] & square_mask(square) != 0;
    let orthogonal = ROOK_RAYS[king as usize] & square_mask(square) != 0;
    if !diagonal && !orthogonal {
        return None;
    }
    if squares_between(king, square) & position.occupancy_all() != 0 {
        return None;
    }

    let (d_row, d_col) = direction(king, square);
    let mut cursor = square;
    while let Some(next) = offset_square(cursor, d_row, d_col) {
        cursor = next;
        let Some(beyond) = position.piece_at(cursor) else {
            continue;
        };
        let pins = beyond.color != piece.color
            && match beyond.kind {
                PieceKind::Queen => true,
                PieceKind::Bishop => diagonal,
                PieceKind::Rook => orthogonal,
                _ => false,
            };
        return pins.then(|| squares_between(king, cursor) | square_mask(cursor));
    }

    None
}

/// Squares strictly between two squares on a shared rank, file or diagonal.
pub fn squares_between(a: Square, b: Square) -> u64 {
    let aligned = (BISHOP_RAYS[a as usize] | ROOK_RAYS[a as usize]) & square_mask(b) != 0;
    if !aligned {
        return 0;
    }

    let (d_row, d_col) = direction(a, b);
    let mut between = 0u64;
    let mut cursor = a;
    while let Some(next) = offset_square(cursor, d_row, d_col) {
        if next == b {
            break;
        }
        between |= square_mask(next);
        cursor = next;
    }
    between
}

fn direction(from: Square, to: Square) -> (i8, i8) {
    let d_row = (row_of(to) as i8 - row_of(from) as i8).signum();
    let d_col = (col_of(to) as i8 - col_of(from) as i8).signum();
    (d_row, d_col)
}

/// Enemy pieces (excluding the king) attacking `square` for a defender of
/// `color`, with sliders traced against `occupancy`.
fn attackers_to_square(position: &Position, color: Color, square: Square, occupancy: u64) -> u64 {
    let enemy = color.opposite();

    let pawns = pawn_attacks(color, square) & position.pieces(enemy, PieceKind::Pawn);
    let knights = knight_attacks(square) & position.pieces(enemy, PieceKind::Knight);

    let queens = position.pieces(enemy, PieceKind::Queen);
    let diagonal = bishop_attacks(square, occupancy)
        & (position.pieces(enemy, PieceKind::Bishop) | queens);
    let orthogonal =
        rook_attacks(square, occupancy) & (position.pieces(enemy, PieceKind::Rook) | queens);

    pawns | knights | diagonal | orthogonal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn position_of(fen: &str) -> Position {
        parse_fen(fen).expect("test FEN should parse").position
    }

    #[test]
    fn nobody_is_in_check_at_the_start() {
        let position = Position::starting();
        assert_eq!(squares_attacking_king(&position, Color::White), 0);
        assert_eq!(squares_attacking_king(&position, Color::Black), 0);
    }

    #[test]
    fn double_check_reports_two_attackers() {
        // Rook on e8 and knight on d3 both hit the e1 king.
        let position = position_of("4r2k/8/8/8/8/3n4/8/4K3 w - -");
        let attackers = squares_attacking_king(&position, Color::White);
        assert_eq!(attackers.count_ones(), 2);
        assert_eq!(check_block_whitelist(&position, attackers, square_at(0, 4)), 0);
    }

    #[test]
    fn pawns_only_attack_forward() {
        // A white pawn on e4 sits diagonally behind the d3 black king.
        let position = position_of("8/8/8/8/4P3/3k4/8/K7 b - -");
        assert_eq!(squares_attacking_king(&position, Color::Black), 0);

        // A black pawn on e2 does attack the d1 white king.
        let position = position_of("7k/8/8/8/8/8/4p3/3K4 w - -");
        assert_eq!(
            squares_attacking_king(&position, Color::White),
            square_mask(square_at(1, 4))
        );
    }

    #[test]
    fn slider_check_can_be_blocked_or_captured() {
        let position = position_of("4r2k/8/8/8/8/8/8/4K3 w - -");
        let king = square_at(0, 4);
        let attackers = squares_attacking_king(&position, Color::White);
        let whitelist = check_block_whitelist(&position, attackers, king);
        // e2..e7 plus the rook on e8.
        assert_eq!(whitelist.count_ones(), 7);
        assert_ne!(whitelist & square_mask(square_at(7, 4)), 0);
    }

    #[test]
    fn king_may_not_retreat_along_the_checking_ray() {
        let position = position_of("4r2k/8/8/8/8/8/8/4K3 w - -");
        let destinations = legal_king_destinations(&position, Color::White);
        assert_eq!(destinations & square_mask(square_at(1, 4)), 0);
        assert_ne!(destinations & square_mask(square_at(0, 3)), 0);
    }

    #[test]
    fn kings_keep_their_distance() {
        let position = position_of("8/8/8/4k3/8/4K3/8/8 w - -");
        let destinations = legal_king_destinations(&position, Color::White);
        for col in 3..=5 {
            assert_eq!(destinations & square_mask(square_at(3, col)), 0);
        }
        assert_eq!(destinations.count_ones(), 5);
    }

    #[test]
    fn pinned_bishop_is_confined_to_the_pin_ray() {
        let position = position_of("7k/8/8/8/q7/8/2B5/3K4 w - -");
        let king = square_at(0, 3);
        let c2 = square_at(1, 2);
        let ray = pin_whitelist(&position, c2, king).expect("bishop should be pinned");
        // c2, b3 and the queen on a4.
        assert_eq!(ray, square_mask(c2) | square_mask(square_at(2, 1)) | square_mask(square_at(3, 0)));

        let free = position_of("7k/8/8/8/r7/8/2B5/3K4 w - -");
        assert_eq!(pin_whitelist(&free, c2, king), None);
    }
}
