//! Immutable records of applied plies.

use crate::game_state::chess_types::*;

/// How a ply was applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Standard,
    EnPassant,
    Promotion(PieceKind),
    CastleKingSide,
    CastleQueenSide,
}

impl MoveKind {
    pub fn castle_wing(self) -> Option<Wing> {
        match self {
            MoveKind::CastleKingSide => Some(Wing::KingSide),
            MoveKind::CastleQueenSide => Some(Wing::QueenSide),
            _ => None,
        }
    }
}

/// What the ply did to the opponent, known once their replies are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    #[default]
    None,
    Check,
    Checkmate,
    Stalemate,
}

/// A ply as requested by a caller, before it is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveRequest {
    Standard { from: Square, to: Square },
    EnPassant { from: Square, to: Square },
    Promotion { from: Square, to: Square, kind: PieceKind },
    CastleKingSide,
    CastleQueenSide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    /// `None` for castles, which move two pieces.
    pub piece: Option<Piece>,
    pub kind: MoveKind,
    pub board_after: ByteBoard,
    pub castling_rights_before: CastlingRights,
    pub castling_rights_after: CastlingRights,
    /// Square skipped by this ply when it was a double pawn push.
    pub en_passant_target: Option<Square>,
    pub capture: bool,
    /// Piece glyph, disambiguation, capture marker and destination.
    pub base_notation: String,
    pub outcome: MoveOutcome,
}

impl MoveRecord {
    /// Full notation: base, then `e.p.` or the promotion glyph, then `+`, `#`
    /// or `$`.
    pub fn notation(&self) -> String {
        let mut out = self.base_notation.clone();
        match self.kind {
            MoveKind::EnPassant => out.push_str("e.p."),
            MoveKind::Promotion(kind) => out.push_str(kind.notation()),
            _ => {}
        }
        match self.outcome {
            MoveOutcome::None => {}
            MoveOutcome::Check => out.push('+'),
            MoveOutcome::Checkmate => out.push('#'),
            MoveOutcome::Stalemate => out.push('$'),
        }
        out
    }

    pub fn request(&self) -> MoveRequest {
        match self.kind {
            MoveKind::Standard => MoveRequest::Standard {
                from: self.from,
                to: self.to,
            },
            MoveKind::EnPassant => MoveRequest::EnPassant {
                from: self.from,
                to: self.to,
            },
            MoveKind::Promotion(kind) => MoveRequest::Promotion {
                from: self.from,
                to: self.to,
                kind,
            },
            MoveKind::CastleKingSide => MoveRequest::CastleKingSide,
            MoveKind::CastleQueenSide => MoveRequest::CastleQueenSide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::INITIAL_BOARD;

    fn record(kind: MoveKind, base: &str, outcome: MoveOutcome) -> MoveRecord {
        MoveRecord {
            from: 0,
            to: 0,
            color: Color::White,
            piece: None,
            kind,
            board_after: INITIAL_BOARD,
            castling_rights_before: CASTLE_ALL,
            castling_rights_after: CASTLE_ALL,
            en_passant_target: None,
            capture: false,
            base_notation: base.to_owned(),
            outcome,
        }
    }

    #[test]
    fn suffixes_follow_the_base_notation() {
        assert_eq!(record(MoveKind::Standard, "Nf3", MoveOutcome::None).notation(), "Nf3");
        assert_eq!(
            record(MoveKind::EnPassant, "exd6", MoveOutcome::Check).notation(),
            "exd6e.p.+"
        );
        assert_eq!(
            record(MoveKind::Promotion(PieceKind::Queen), "e8", MoveOutcome::Checkmate).notation(),
            "e8Q#"
        );
        assert_eq!(
            record(MoveKind::CastleQueenSide, "0-0-0", MoveOutcome::Stalemate).notation(),
            "0-0-0$"
        );
    }
}
