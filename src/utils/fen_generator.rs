use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

/// Four-field FEN: placement, side to move, castling, en passant target.
pub fn generate_fen(
    board: &ByteBoard,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> String {
    let side = match side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    format!(
        "{} {} {} {}",
        generate_board_field(board),
        side,
        generate_castling_field(castling_rights),
        en_passant_target.map_or_else(|| "-".to_owned(), square_to_algebraic)
    )
}

fn generate_board_field(board: &ByteBoard) -> String {
    let mut out = String::new();

    for row in (0..8).rev() {
        let mut empty_count = 0u8;

        for &code in &board[row] {
            match Piece::from_board_code(code) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if (rights & CASTLE_WHITE_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_WHITE_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_BLACK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_BLACK_QUEENSIDE) != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::{INITIAL_BOARD, STARTING_POSITION_FEN};
    use crate::game_state::chess_types::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_fen() {
        let fen = generate_fen(&INITIAL_BOARD, Color::White, CASTLE_ALL, None);
        assert_eq!(fen, STARTING_POSITION_FEN);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq -";
        let parsed = parse_fen(fen).expect("custom FEN should parse");
        let generated = generate_fen(
            &parsed.position.to_byte_board(),
            parsed.side_to_move,
            parsed.castling_rights,
            parsed.en_passant_target,
        );

        assert_eq!(generated, fen);
        assert_eq!(
            parsed.castling_rights,
            CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE
        );
    }

    #[test]
    fn en_passant_target_and_empty_rights() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6";
        let parsed = parse_fen(fen).expect("FEN should parse");
        let generated = generate_fen(
            &parsed.position.to_byte_board(),
            parsed.side_to_move,
            parsed.castling_rights,
            parsed.en_passant_target,
        );
        assert_eq!(generated, fen);
    }
}
