//! Errors used throughout the engine.
//!
//! `ChessErrors` is the single error type returned by game history operations
//! and the text parsers. Every variant is raised before any state is touched,
//! so a returned error always means "nothing changed".
//!
//! Off-board coordinates are not represented here: they are programming
//! errors and panic at the point a square is built.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// The requested ply is not in the legal set computed for the mover.
    ///
    /// Payload: origin and destination squares of the request.
    IllegalMove { from: Square, to: Square },

    /// A promotion named something other than queen, rook, bishop or knight.
    InvalidPromotionChoice(PieceKind),

    /// Undo with nothing to undo, cursor already at an end, or a `jump_to`
    /// target outside `-1..len`.
    HistoryNavigation(String),

    /// The game ended (mate, stalemate or timeout); only undo is accepted.
    GameFinished,

    /// New plies can only be appended while the cursor sits on the last one.
    NotOnLatestPly { viewing: isize, latest: isize },

    /// A timeout was reported for the side that is not on move.
    NotOnMove(Color),

    /// A FEN string could not be parsed or describes an unplayable board.
    InvalidFen(String),

    /// A square or long algebraic move could not be parsed.
    InvalidAlgebraic(String),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::IllegalMove { from, to } => write!(
                f,
                "illegal move {}{}",
                square_to_algebraic(*from),
                square_to_algebraic(*to)
            ),
            ChessErrors::InvalidPromotionChoice(kind) => {
                write!(f, "cannot promote to {kind:?}")
            }
            ChessErrors::HistoryNavigation(msg) => write!(f, "history navigation failed: {msg}"),
            ChessErrors::GameFinished => write!(f, "the game is over"),
            ChessErrors::NotOnLatestPly { viewing, latest } => write!(
                f,
                "viewing ply {viewing} but moves can only be made from ply {latest}"
            ),
            ChessErrors::NotOnMove(color) => write!(f, "{} is not on move", color.name()),
            ChessErrors::InvalidFen(msg) => write!(f, "invalid FEN: {msg}"),
            ChessErrors::InvalidAlgebraic(msg) => write!(f, "invalid algebraic notation: {msg}"),
        }
    }
}

impl Error for ChessErrors {}
