//! FEN-to-position parser.
//!
//! Reads the placement, side-to-move, castling and en passant fields. The
//! half-move and full-move counters are optional and ignored since the engine
//! does not track them.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::algebraic::algebraic_to_square;

/// Everything a FEN string says about the game that the engine tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    pub position: Position,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

pub fn parse_fen(fen: &str) -> Result<ParsedFen, ChessErrors> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(ChessErrors::InvalidFen(format!(
            "expected 4 to 6 fields, found {}",
            fields.len()
        )));
    }

    let board = parse_board(fields[0])?;
    let position = Position::from_byte_board(&board)?;
    let side_to_move = parse_side_to_move(fields[1])?;
    let castling_rights = parse_castling_rights(fields[2])?;
    let en_passant_target = parse_en_passant_square(fields[3])?;

    if is_king_in_check(&position, side_to_move.opposite()) {
        return Err(ChessErrors::InvalidFen(format!(
            "{} is in check but not on move",
            side_to_move.opposite().name()
        )));
    }

    for counter in &fields[4..] {
        counter
            .parse::<u32>()
            .map_err(|_| ChessErrors::InvalidFen(format!("invalid move counter: {counter}")))?;
    }

    Ok(ParsedFen {
        position,
        side_to_move,
        castling_rights,
        en_passant_target,
    })
}

fn parse_board(board_part: &str) -> Result<ByteBoard, ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut board = [[0u8; 8]; 8];
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - fen_rank_idx;
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                ChessErrors::InvalidFen(format!("invalid piece character '{ch}'"))
            })?;
            if col >= 8 {
                return Err(ChessErrors::InvalidFen(format!(
                    "rank {} has too many files",
                    row + 1
                )));
            }
            board[row][col] = piece.board_code();
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFen(format!(
                "rank {} does not sum to 8 files",
                row + 1
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::InvalidFen(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(ChessErrors::InvalidFen(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|e| ChessErrors::InvalidFen(e.to_string()))?;
    if row_of(square) != 2 && row_of(square) != 5 {
        return Err(ChessErrors::InvalidFen(format!(
            "en passant target must be on rank 3 or 6: {en_passant_part}"
        )));
    }
    Ok(Some(square))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::{INITIAL_BOARD, STARTING_POSITION_FEN};
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(parsed.position.to_byte_board(), INITIAL_BOARD);
        assert_eq!(parsed.side_to_move, Color::White);
        assert_eq!(parsed.castling_rights, CASTLE_ALL);
        assert_eq!(parsed.en_passant_target, None);
    }

    #[test]
    fn move_counters_are_accepted_and_ignored() {
        let six = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("six-field FEN should parse");
        assert_eq!(six.side_to_move, Color::Black);
        assert_eq!(six.en_passant_target, Some(square_at(2, 4)));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let bad = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
        ];
        for fen in bad {
            assert!(
                matches!(parse_fen(fen), Err(ChessErrors::InvalidFen(_))),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn boards_without_both_kings_are_rejected() {
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - -").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/3KK3 w - -").is_err());
    }

    #[test]
    fn side_not_on_move_may_not_be_in_check() {
        // The d6 knight already attacks the black king with White to move.
        assert!(matches!(
            parse_fen("4k3/8/3N4/8/8/8/8/4K3 w - -"),
            Err(ChessErrors::InvalidFen(_))
        ));
        assert!(parse_fen("4k3/8/3N4/8/8/8/8/4K3 b - -").is_ok());
    }
}
