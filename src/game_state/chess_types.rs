//! Shared chess vocabulary used by every other module.
//!
//! Squares are plain indices `row * 8 + col` where row 0 is White's back rank
//! and col 0 is the a-file. Sets of squares are `u64` masks with bit `sq` set.

use std::fmt;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta a pawn of this color advances by.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row holding this side's king and rooks at the start.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in the order renderers offer them.
    pub const PROMOTION_CHOICES: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Offset inside the byte-board code table. Bishop sits before knight.
    #[inline]
    const fn board_code_offset(self) -> u8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Bishop => 2,
            PieceKind::Knight => 3,
            PieceKind::Rook => 4,
            PieceKind::Queen => 5,
            PieceKind::King => 6,
        }
    }

    pub const fn material_value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Letter used in standard algebraic notation; empty for pawns.
    pub const fn notation(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    pub fn from_fen_char(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Byte-board code: 1..=6 for White, 7..=12 for Black.
    #[inline]
    pub const fn board_code(self) -> u8 {
        match self.color {
            Color::White => self.kind.board_code_offset(),
            Color::Black => self.kind.board_code_offset() + 6,
        }
    }

    pub const fn from_board_code(code: u8) -> Option<Piece> {
        let (color, offset) = match code {
            1..=6 => (Color::White, code),
            7..=12 => (Color::Black, code - 6),
            _ => return None,
        };
        let kind = match offset {
            1 => PieceKind::Pawn,
            2 => PieceKind::Bishop,
            3 => PieceKind::Knight,
            4 => PieceKind::Rook,
            5 => PieceKind::Queen,
            _ => PieceKind::King,
        };
        Some(Piece { color, kind })
    }

    pub fn fen_char(self) -> char {
        let base = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

/// 8×8 snapshot indexed `[row][col]`, holding `Piece::board_code` values.
pub type ByteBoard = [[u8; 8]; 8];

/// Build a square from row and column. Panics outside the 8×8 board.
#[inline]
pub fn square_at(row: u8, col: u8) -> Square {
    assert!(row < 8 && col < 8, "square ({row}, {col}) is off the board");
    row * 8 + col
}

#[inline]
pub const fn row_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn col_of(square: Square) -> u8 {
    square % 8
}

/// Step from `square` by a row/column delta, `None` once off the board.
#[inline]
pub fn offset_square(square: Square, d_row: i8, d_col: i8) -> Option<Square> {
    let row = row_of(square) as i8 + d_row;
    let col = col_of(square) as i8 + d_col;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some((row * 8 + col) as Square)
    } else {
        None
    }
}

#[inline]
pub fn square_mask(square: Square) -> u64 {
    assert!(square < 64, "square index {square} is off the board");
    1u64 << square
}

/// Iterate the squares set in a mask, lowest index first.
pub fn squares_in(mut mask: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let sq = mask.trailing_zeros() as Square;
        mask &= mask - 1;
        Some(sq)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    KingSide,
    QueenSide,
}

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE;

/// Castling rights bitmask built from the `CASTLE_*` flags.
pub type CastlingRights = u8;

#[inline]
pub const fn castle_flag(color: Color, wing: Wing) -> CastlingRights {
    match (color, wing) {
        (Color::White, Wing::KingSide) => CASTLE_WHITE_KINGSIDE,
        (Color::White, Wing::QueenSide) => CASTLE_WHITE_QUEENSIDE,
        (Color::Black, Wing::KingSide) => CASTLE_BLACK_KINGSIDE,
        (Color::Black, Wing::QueenSide) => CASTLE_BLACK_QUEENSIDE,
    }
}
