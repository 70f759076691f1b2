//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g. `e4`) and square
//! indices, reused by the notation builder, FEN and the text front end.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::MoveKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoves;

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraic(format!(
            "expected a square like e4, got {square:?}"
        )));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessErrors::InvalidAlgebraic(format!(
            "invalid file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraic(format!(
            "invalid rank: {}",
            rank as char
        )));
    }

    Ok(square_at(rank - b'1', file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    assert!(square < 64, "square index {square} is off the board");
    format!("{}{}", file_char(col_of(square)), rank_char(row_of(square)))
}

#[inline]
pub fn file_char(col: u8) -> char {
    char::from(b'a' + col)
}

#[inline]
pub fn rank_char(row: u8) -> char {
    char::from(b'1' + row)
}

/// Standard algebraic notation for a ply, without its suffixes.
///
/// `position` and `legal` must describe the board before the ply; the
/// legal table decides whether another piece of the same kind could also
/// reach `to` and so needs disambiguating.
pub fn standard_algebraic_base(
    position: &Position,
    legal: &LegalMoves,
    from: Square,
    to: Square,
    kind: MoveKind,
) -> String {
    match kind {
        MoveKind::CastleKingSide => return "0-0".to_owned(),
        MoveKind::CastleQueenSide => return "0-0-0".to_owned(),
        _ => {}
    }

    let Some(piece) = position.piece_at(from) else {
        return square_to_algebraic(to);
    };
    let capture = kind == MoveKind::EnPassant || position.piece_at(to).is_some();

    let mut out = String::from(piece.kind.notation());
    if piece.kind == PieceKind::Pawn {
        if capture {
            out.push(file_char(col_of(from)));
        }
    } else {
        out.push_str(&disambiguation(position, legal, piece, from, to));
    }
    if capture {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(to));
    out
}

fn disambiguation(
    position: &Position,
    legal: &LegalMoves,
    piece: Piece,
    from: Square,
    to: Square,
) -> String {
    let rivals: Vec<Square> = squares_in(position.pieces(piece.color, piece.kind))
        .filter(|&sq| sq != from && legal.destinations(sq).contains(to))
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|&sq| col_of(sq) != col_of(from)) {
        return file_char(col_of(from)).to_string();
    }
    if rivals.iter().all(|&sq| row_of(sq) != row_of(from)) {
        return rank_char(row_of(from)).to_string();
    }
    square_to_algebraic(from)
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic, standard_algebraic_base};
    use crate::game_state::move_record::MoveKind;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::moves::piece_rules::MoveContext;
    use crate::utils::fen_parser::parse_fen;

    fn san(fen: &str, from: &str, to: &str, kind: MoveKind) -> String {
        let parsed = parse_fen(fen).expect("test FEN should parse");
        let ctx = MoveContext {
            castling_rights: parsed.castling_rights,
            en_passant_target: parsed.en_passant_target,
        };
        let legal = generate_legal_moves(&parsed.position, parsed.side_to_move, &ctx);
        standard_algebraic_base(
            &parsed.position,
            &legal,
            algebraic_to_square(from).expect("from should parse"),
            algebraic_to_square(to).expect("to should parse"),
            kind,
        )
    }

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 28);
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
        assert_eq!(square_to_algebraic(28), "e4");
    }

    #[test]
    fn rejects_malformed_squares() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a10").is_err());
        assert!(algebraic_to_square("").is_err());
    }

    #[test]
    fn knights_on_one_rank_disambiguate_by_file() {
        let fen = "4k3/8/8/8/8/8/8/1N2KN2 w - -";
        assert_eq!(san(fen, "b1", "d2", MoveKind::Standard), "Nbd2");
        assert_eq!(san(fen, "f1", "g3", MoveKind::Standard), "Ng3");
    }

    #[test]
    fn rooks_on_one_file_disambiguate_by_rank() {
        let fen = "4k3/R7/8/8/8/8/R7/4K3 w - -";
        assert_eq!(san(fen, "a2", "a5", MoveKind::Standard), "R2a5");
    }

    #[test]
    fn three_queens_need_the_full_square() {
        let fen = "7k/8/8/8/Q1Q5/8/Q7/4K3 w - -";
        // a4 shares the file with a2 and the rank with c4.
        assert_eq!(san(fen, "a4", "b3", MoveKind::Standard), "Qa4b3");
    }

    #[test]
    fn pinned_rival_does_not_force_disambiguation() {
        // The e2 knight is pinned by the e8 rook, so only the b1 knight reaches c3.
        let fen = "4r2k/8/8/8/8/8/4N3/1N2K3 w - -";
        assert_eq!(san(fen, "b1", "c3", MoveKind::Standard), "Nc3");
    }

    #[test]
    fn pawn_captures_carry_their_file() {
        let fen = "4k3/8/8/3p4/4P3/8/8/4K3 w - -";
        assert_eq!(san(fen, "e4", "d5", MoveKind::Standard), "exd5");
        assert_eq!(san(fen, "e4", "e5", MoveKind::Standard), "e5");
    }

    #[test]
    fn castles_use_zero_notation() {
        let fen = "4k3/8/8/8/8/8/8/R3K2R w KQ -";
        assert_eq!(san(fen, "e1", "g1", MoveKind::CastleKingSide), "0-0");
        assert_eq!(san(fen, "e1", "c1", MoveKind::CastleQueenSide), "0-0-0");
    }
}
