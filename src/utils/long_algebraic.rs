//! Long algebraic move text (`e2e4`, `e7e8q`, `e1g1`).
//!
//! Parsing consults the legal-move table so the text maps onto the right
//! request kind; castles are written as the king's two-square step.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{castle_king_target, king_home};
use crate::game_state::chess_types::*;
use crate::game_state::game_history::GameHistory;
use crate::game_state::move_record::MoveRequest;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn long_algebraic_to_move_request(
    long_algebraic: &str,
    game: &GameHistory,
) -> Result<MoveRequest, ChessErrors> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraic(format!(
            "expected a move like e2e4 or e7e8q, got {long_algebraic:?}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = text[4..].chars().next();
    let destinations = game.legal_destinations(from);
    let to_mask = square_mask(to);

    if destinations.promotion & to_mask != 0 {
        let ch = promotion.ok_or_else(|| {
            ChessErrors::InvalidAlgebraic(format!("{text} needs a promotion piece"))
        })?;
        let kind = PieceKind::from_fen_char(ch).ok_or_else(|| {
            ChessErrors::InvalidAlgebraic(format!("unknown promotion piece '{ch}'"))
        })?;
        return Ok(MoveRequest::Promotion { from, to, kind });
    }
    if let Some(ch) = promotion {
        return Err(ChessErrors::InvalidAlgebraic(format!(
            "{text} is not a promotion but names '{ch}'"
        )));
    }

    if destinations.castle & to_mask != 0 {
        return Ok(if col_of(to) == 6 {
            MoveRequest::CastleKingSide
        } else {
            MoveRequest::CastleQueenSide
        });
    }
    if destinations.en_passant & to_mask != 0 {
        return Ok(MoveRequest::EnPassant { from, to });
    }

    Ok(MoveRequest::Standard { from, to })
}

/// Render a request for the side `color`; castles become the king's step.
pub fn move_request_to_long_algebraic(request: MoveRequest, color: Color) -> String {
    match request {
        MoveRequest::Standard { from, to } | MoveRequest::EnPassant { from, to } => {
            format!("{}{}", square_to_algebraic(from), square_to_algebraic(to))
        }
        MoveRequest::Promotion { from, to, kind } => format!(
            "{}{}{}",
            square_to_algebraic(from),
            square_to_algebraic(to),
            Piece::new(Color::Black, kind).fen_char()
        ),
        MoveRequest::CastleKingSide => format!(
            "{}{}",
            square_to_algebraic(king_home(color)),
            square_to_algebraic(castle_king_target(color, Wing::KingSide))
        ),
        MoveRequest::CastleQueenSide => format!(
            "{}{}",
            square_to_algebraic(king_home(color)),
            square_to_algebraic(castle_king_target(color, Wing::QueenSide))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move_request, move_request_to_long_algebraic};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_history::GameHistory;
    use crate::game_state::move_record::MoveRequest;

    #[test]
    fn plain_moves_map_to_standard_requests() {
        let game = GameHistory::new();
        assert_eq!(
            long_algebraic_to_move_request("e2e4", &game).expect("e2e4 should parse"),
            MoveRequest::Standard {
                from: square_at(1, 4),
                to: square_at(3, 4)
            }
        );
    }

    #[test]
    fn king_steps_of_two_map_to_castles() {
        let game = GameHistory::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -")
            .expect("FEN should parse");
        assert_eq!(
            long_algebraic_to_move_request("e1g1", &game).expect("e1g1 should parse"),
            MoveRequest::CastleKingSide
        );
        assert_eq!(
            long_algebraic_to_move_request("e1c1", &game).expect("e1c1 should parse"),
            MoveRequest::CastleQueenSide
        );
    }

    #[test]
    fn promotions_need_a_piece_letter() {
        let game = GameHistory::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - -").expect("FEN should parse");
        assert!(matches!(
            long_algebraic_to_move_request("b7b8", &game),
            Err(ChessErrors::InvalidAlgebraic(_))
        ));
        assert_eq!(
            long_algebraic_to_move_request("b7b8n", &game).expect("b7b8n should parse"),
            MoveRequest::Promotion {
                from: square_at(6, 1),
                to: square_at(7, 1),
                kind: PieceKind::Knight
            }
        );
        assert!(long_algebraic_to_move_request("e1e2q", &game).is_err());
    }

    #[test]
    fn requests_render_back_to_text() {
        let promo = MoveRequest::Promotion {
            from: square_at(6, 1),
            to: square_at(7, 1),
            kind: PieceKind::Queen,
        };
        assert_eq!(move_request_to_long_algebraic(promo, Color::White), "b7b8q");
        assert_eq!(
            move_request_to_long_algebraic(MoveRequest::CastleQueenSide, Color::Black),
            "e8c8"
        );
    }
}
