//! Terminal-oriented Unicode board renderer.
//!
//! Draws a byte-board snapshot with rank and file labels; the game view adds
//! the status line the front end prints after every command.

use crate::game_state::chess_types::*;
use crate::game_state::game_history::{GameHistory, GameStatus};

/// Render a snapshot to a Unicode string for terminal output.
///
/// Squares in `highlight` are drawn in brackets.
pub fn render_board(board: &ByteBoard, highlight: Option<(Square, Square)>) -> String {
    let marked = |sq: Square| highlight.is_some_and(|(a, b)| sq == a || sq == b);
    let mut out = String::new();

    out.push_str("   a  b  c  d  e  f  g  h\n");

    for row in (0..8u8).rev() {
        out.push(char::from(b'1' + row));
        out.push(' ');

        for col in 0..8u8 {
            let sq = square_at(row, col);
            let glyph = Piece::from_board_code(board[row as usize][col as usize])
                .map_or('·', piece_to_unicode);
            if marked(sq) {
                out.push('[');
                out.push(glyph);
                out.push(']');
            } else {
                out.push(' ');
                out.push(glyph);
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + row));
        out.push('\n');
    }

    out.push_str("   a  b  c  d  e  f  g  h");

    out
}

/// Board at the cursor followed by a one-line summary.
pub fn render_game_state(game: &GameHistory) -> String {
    let mut out = render_board(&game.viewed_board(), game.highlight_squares());
    out.push('\n');

    let (white, black) = game.material_balance();
    let status = match game.status() {
        GameStatus::InProgress if game.is_check() => {
            format!("{} to move, in check", game.side_to_move().name())
        }
        GameStatus::InProgress => format!("{} to move", game.side_to_move().name()),
        GameStatus::Checkmate { winner } => format!("checkmate, {} wins", winner.name()),
        GameStatus::Stalemate => "stalemate".to_owned(),
        GameStatus::TimedOut { loser } => format!("{} lost on time", loser.name()),
    };
    out.push_str(&format!(
        "ply {}/{} | {} | material {}-{}",
        game.move_num() + 1,
        game.moves().len(),
        status,
        white,
        black
    ));
    if !game.is_on_last_turn() {
        out.push_str(" | browsing");
    }

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::{render_board, render_game_state};
    use crate::game_state::chess_rules::INITIAL_BOARD;
    use crate::game_state::game_history::GameHistory;

    #[test]
    fn starting_board_has_labelled_ranks() {
        let rendered = render_board(&INITIAL_BOARD, None);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8  ♜  ♞  ♝  ♛  ♚  ♝  ♞  ♜  8");
        assert_eq!(lines[8], "1  ♖  ♘  ♗  ♕  ♔  ♗  ♘  ♖  1");
    }

    #[test]
    fn highlighted_squares_are_bracketed() {
        let rendered = render_board(&INITIAL_BOARD, Some((12, 28)));
        assert_eq!(rendered.matches('[').count(), 2);
    }

    #[test]
    fn game_view_reports_side_and_material() {
        let game = GameHistory::new();
        let rendered = render_game_state(&game);
        assert!(rendered.ends_with("ply 0/0 | White to move | material 39-39"));
    }
}
