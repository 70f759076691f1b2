//! Canonical chess-rule constants.
//!
//! Starting layout (as a byte board and as FEN) and the fixed squares that
//! castling depends on.

use crate::game_state::chess_types::*;

/// Standard starting position in the four-field FEN this engine exports.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

const WR: u8 = 4;
const WN: u8 = 3;
const WB: u8 = 2;
const WQ: u8 = 5;
const WK: u8 = 6;
const WP: u8 = 1;
const BR: u8 = WR + 6;
const BN: u8 = WN + 6;
const BB: u8 = WB + 6;
const BQ: u8 = WQ + 6;
const BK: u8 = WK + 6;
const BP: u8 = WP + 6;

pub const INITIAL_BOARD: ByteBoard = [
    [WR, WN, WB, WQ, WK, WB, WN, WR],
    [WP, WP, WP, WP, WP, WP, WP, WP],
    [0; 8],
    [0; 8],
    [0; 8],
    [0; 8],
    [BP, BP, BP, BP, BP, BP, BP, BP],
    [BR, BN, BB, BQ, BK, BB, BN, BR],
];

pub const KING_HOME_COL: u8 = 4;

/// Row a pawn must stand on to capture en passant.
#[inline]
pub const fn en_passant_row(color: Color) -> u8 {
    match color {
        Color::White => 4,
        Color::Black => 3,
    }
}

#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

#[inline]
pub fn king_home(color: Color) -> Square {
    square_at(color.home_row(), KING_HOME_COL)
}

#[inline]
pub fn rook_home(color: Color, wing: Wing) -> Square {
    match wing {
        Wing::KingSide => square_at(color.home_row(), 7),
        Wing::QueenSide => square_at(color.home_row(), 0),
    }
}

/// Where the king lands after castling.
#[inline]
pub fn castle_king_target(color: Color, wing: Wing) -> Square {
    match wing {
        Wing::KingSide => square_at(color.home_row(), 6),
        Wing::QueenSide => square_at(color.home_row(), 2),
    }
}

/// Where the rook lands after castling (the square the king crosses).
#[inline]
pub fn castle_rook_target(color: Color, wing: Wing) -> Square {
    match wing {
        Wing::KingSide => square_at(color.home_row(), 5),
        Wing::QueenSide => square_at(color.home_row(), 3),
    }
}
