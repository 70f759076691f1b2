//! Piece placement on the 8×8 board.
//!
//! `Position` is the only owner of piece placement. Pieces are plain values
//! stored in a flat 64-entry array; the two king squares are cached so check
//! detection never has to scan the board.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{king_home, INITIAL_BOARD};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Option<Piece>; 64],
    kings: [Square; 2],
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    pub fn starting() -> Self {
        let mut position = Self {
            squares: [None; 64],
            kings: [king_home(Color::White), king_home(Color::Black)],
        };
        for (row, cells) in INITIAL_BOARD.iter().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                if let Some(piece) = Piece::from_board_code(code) {
                    position.place(piece, square_at(row as u8, col as u8));
                }
            }
        }
        position
    }

    /// Rebuild a position from a history snapshot.
    pub fn from_byte_board(board: &ByteBoard) -> Result<Self, ChessErrors> {
        let mut squares = [None; 64];
        let mut kings: [Option<Square>; 2] = [None, None];

        for (row, cells) in board.iter().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let piece = Piece::from_board_code(code).ok_or_else(|| {
                    ChessErrors::InvalidFen(format!("unknown board code {code}"))
                })?;
                let sq = square_at(row as u8, col as u8);
                if piece.kind == PieceKind::King {
                    if kings[piece.color.index()].is_some() {
                        return Err(ChessErrors::InvalidFen(format!(
                            "{} has more than one king",
                            piece.color.name()
                        )));
                    }
                    kings[piece.color.index()] = Some(sq);
                }
                squares[sq as usize] = Some(piece);
            }
        }

        match kings {
            [Some(white), Some(black)] => Ok(Self {
                squares,
                kings: [white, black],
            }),
            _ => Err(ChessErrors::InvalidFen(
                "each side needs exactly one king".to_owned(),
            )),
        }
    }

    pub fn to_byte_board(&self) -> ByteBoard {
        let mut board = [[0u8; 8]; 8];
        for (sq, piece) in self.squares.iter().enumerate() {
            if let Some(piece) = piece {
                board[sq / 8][sq % 8] = piece.board_code();
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square as usize].is_none()
    }

    #[inline]
    pub fn king_of(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Put a piece on a square, replacing whatever was there.
    pub fn place(&mut self, piece: Piece, square: Square) {
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = square;
        }
        self.squares[square as usize] = Some(piece);
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    /// Relocate whatever stands on `from`; returns the piece displaced from `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let captured = self.squares[to as usize].take();
        if let Some(piece) = self.squares[from as usize].take() {
            self.place(piece, to);
        }
        captured
    }

    /// Mask of every square holding a piece of `color`.
    pub fn occupancy(&self, color: Color) -> u64 {
        self.pieces_of(color)
            .fold(0u64, |acc, (sq, _)| acc | square_mask(sq))
    }

    /// Mask of the squares holding exactly this piece.
    pub fn pieces(&self, color: Color, kind: PieceKind) -> u64 {
        let wanted = Piece::new(color, kind);
        self.pieces_of(color)
            .filter(|(_, piece)| *piece == wanted)
            .fold(0u64, |acc, (sq, _)| acc | square_mask(sq))
    }

    pub fn occupancy_all(&self) -> u64 {
        self.occupancy(Color::White) | self.occupancy(Color::Black)
    }

    /// All pieces of one side with their squares, lowest square first.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(sq, piece)| match piece {
                Some(p) if p.color == color => Some((sq as Square, *p)),
                _ => None,
            })
    }

    pub fn material(&self, color: Color) -> u32 {
        self.pieces_of(color)
            .map(|(_, piece)| piece.kind.material_value())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::game_state::chess_rules::INITIAL_BOARD;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_position_round_trips_through_byte_board() {
        let position = Position::starting();
        assert_eq!(position.to_byte_board(), INITIAL_BOARD);
        assert_eq!(position.king_of(Color::White), square_at(0, 4));
        assert_eq!(position.king_of(Color::Black), square_at(7, 4));
        assert_eq!(position.occupancy_all().count_ones(), 32);
        assert_eq!(position.material(Color::White), 39);
    }

    #[test]
    fn move_piece_tracks_king_square_and_reports_capture() {
        let mut position = Position::starting();
        let e1 = square_at(0, 4);
        let e7 = square_at(6, 4);

        assert_eq!(position.move_piece(e1, e7), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(position.king_of(Color::White), e7);
        assert!(position.is_empty(e1));
    }

    #[test]
    fn byte_board_without_two_kings_is_rejected() {
        let mut board = INITIAL_BOARD;
        board[7][4] = 0;
        assert!(Position::from_byte_board(&board).is_err());

        board[7][4] = 6;
        assert!(Position::from_byte_board(&board).is_err());
    }
}
