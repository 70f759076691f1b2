//! Append-only game log with a viewing cursor.
//!
//! `GameHistory` owns the authoritative tail position and the legal-move
//! table for the side to move. New plies are only accepted while the cursor
//! sits on the last ply; browsing earlier plies never changes the log.

use tracing::{debug, info, warn};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{castle_king_target, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{MoveKind, MoveOutcome, MoveRecord, MoveRequest};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{
    apply_castle, apply_en_passant, apply_promotion, apply_standard, en_passant_target_after,
    update_castling_rights, AppliedMove,
};
use crate::move_generation::legal_move_generator::{generate_legal_moves, LegalMoves};
use crate::moves::piece_rules::{Destinations, MoveContext};
use crate::utils::algebraic::standard_algebraic_base;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::pgn::{write_pgn, PgnHeaders};

/// Where the game started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub board: ByteBoard,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    /// Reported by an external clock; take-backs are refused afterwards.
    TimedOut { loser: Color },
}

impl GameStatus {
    #[inline]
    pub fn is_finished(self) -> bool {
        self != GameStatus::InProgress
    }
}

#[derive(Debug, Clone)]
pub struct GameHistory {
    setup: Setup,
    moves: Vec<MoveRecord>,
    move_num: isize,
    position: Position,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    legal: LegalMoves,
    status: GameStatus,
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl GameHistory {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        let position = Position::starting();
        let setup = Setup {
            board: position.to_byte_board(),
            side_to_move: Color::White,
            castling_rights: CASTLE_ALL,
            en_passant_target: None,
        };
        Self::from_setup(setup, position)
    }

    /// A new game from any position given as FEN.
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        let parsed = parse_fen(fen)?;
        let setup = Setup {
            board: parsed.position.to_byte_board(),
            side_to_move: parsed.side_to_move,
            castling_rights: parsed.castling_rights,
            en_passant_target: parsed.en_passant_target,
        };
        Ok(Self::from_setup(setup, parsed.position))
    }

    fn from_setup(setup: Setup, position: Position) -> Self {
        let ctx = MoveContext {
            castling_rights: setup.castling_rights,
            en_passant_target: setup.en_passant_target,
        };
        let legal = generate_legal_moves(&position, setup.side_to_move, &ctx);
        let status = status_for(&legal);
        Self {
            side_to_move: setup.side_to_move,
            castling_rights: setup.castling_rights,
            en_passant_target: setup.en_passant_target,
            setup,
            moves: Vec::new(),
            move_num: -1,
            position,
            legal,
            status,
        }
    }

    pub fn apply(&mut self, request: MoveRequest) -> Result<&MoveRecord, ChessErrors> {
        match request {
            MoveRequest::Standard { from, to } => self.apply_standard(from, to),
            MoveRequest::EnPassant { from, to } => self.apply_en_passant(from, to),
            MoveRequest::Promotion { from, to, kind } => self.apply_promotion(from, to, kind),
            MoveRequest::CastleKingSide => self.apply_castle_king_side(),
            MoveRequest::CastleQueenSide => self.apply_castle_queen_side(),
        }
    }

    pub fn apply_standard(&mut self, from: Square, to: Square) -> Result<&MoveRecord, ChessErrors> {
        self.ensure_accepting_moves()?;
        self.ensure_listed(from, to, |d| d.standard)?;
        self.commit(from, to, MoveKind::Standard)
    }

    pub fn apply_en_passant(&mut self, from: Square, to: Square) -> Result<&MoveRecord, ChessErrors> {
        self.ensure_accepting_moves()?;
        self.ensure_listed(from, to, |d| d.en_passant)?;
        self.commit(from, to, MoveKind::EnPassant)
    }

    pub fn apply_promotion(
        &mut self,
        from: Square,
        to: Square,
        kind: PieceKind,
    ) -> Result<&MoveRecord, ChessErrors> {
        if !kind.is_promotion_choice() {
            warn!(?kind, "rejected promotion choice");
            return Err(ChessErrors::InvalidPromotionChoice(kind));
        }
        self.ensure_accepting_moves()?;
        self.ensure_listed(from, to, |d| d.promotion)?;
        self.commit(from, to, MoveKind::Promotion(kind))
    }

    pub fn apply_castle_king_side(&mut self) -> Result<&MoveRecord, ChessErrors> {
        self.apply_castle(Wing::KingSide)
    }

    pub fn apply_castle_queen_side(&mut self) -> Result<&MoveRecord, ChessErrors> {
        self.apply_castle(Wing::QueenSide)
    }

    fn apply_castle(&mut self, wing: Wing) -> Result<&MoveRecord, ChessErrors> {
        self.ensure_accepting_moves()?;
        let from = self.position.king_of(self.side_to_move);
        let to = castle_king_target(self.side_to_move, wing);
        self.ensure_listed(from, to, |d| d.castle)?;
        let kind = match wing {
            Wing::KingSide => MoveKind::CastleKingSide,
            Wing::QueenSide => MoveKind::CastleQueenSide,
        };
        self.commit(from, to, kind)
    }

    fn ensure_accepting_moves(&self) -> Result<(), ChessErrors> {
        if self.status.is_finished() {
            warn!(status = ?self.status, "rejected move after the game ended");
            return Err(ChessErrors::GameFinished);
        }
        if !self.is_on_last_turn() {
            warn!(viewing = self.move_num, "rejected move while browsing history");
            return Err(ChessErrors::NotOnLatestPly {
                viewing: self.move_num,
                latest: self.last_index(),
            });
        }
        Ok(())
    }

    fn ensure_listed(
        &self,
        from: Square,
        to: Square,
        subset: impl Fn(&Destinations) -> u64,
    ) -> Result<(), ChessErrors> {
        let listed = self
            .position
            .piece_at(from)
            .is_some_and(|piece| piece.color == self.side_to_move)
            && subset(&self.legal.destinations(from)) & square_mask(to) != 0;
        if !listed {
            warn!(from, to, "rejected illegal move");
            return Err(ChessErrors::IllegalMove { from, to });
        }
        Ok(())
    }

    /// Apply a ply already found in the legal table and append its record.
    fn commit(&mut self, from: Square, to: Square, kind: MoveKind) -> Result<&MoveRecord, ChessErrors> {
        let color = self.side_to_move;
        let base_notation = standard_algebraic_base(&self.position, &self.legal, from, to, kind);
        let rights_before = self.castling_rights;

        let mut next = self.position.clone();
        let AppliedMove { piece, captured } = match kind {
            MoveKind::Standard => apply_standard(&mut next, from, to)?,
            MoveKind::EnPassant => apply_en_passant(&mut next, from, to)?,
            MoveKind::Promotion(choice) => apply_promotion(&mut next, from, to, choice)?,
            MoveKind::CastleKingSide => apply_castle(&mut next, color, Wing::KingSide)?,
            MoveKind::CastleQueenSide => apply_castle(&mut next, color, Wing::QueenSide)?,
        };

        let rights_after = update_castling_rights(rights_before, piece, from, to);
        let en_passant_target = match kind {
            MoveKind::Standard => en_passant_target_after(piece, from, to),
            _ => None,
        };

        let opponent = color.opposite();
        let ctx = MoveContext {
            castling_rights: rights_after,
            en_passant_target,
        };
        let legal = generate_legal_moves(&next, opponent, &ctx);
        let outcome = match (legal.is_check(), legal.has_any()) {
            (true, false) => MoveOutcome::Checkmate,
            (true, true) => MoveOutcome::Check,
            (false, false) => MoveOutcome::Stalemate,
            (false, true) => MoveOutcome::None,
        };

        let record = MoveRecord {
            from,
            to,
            color,
            piece: kind.castle_wing().is_none().then_some(piece),
            kind,
            board_after: next.to_byte_board(),
            castling_rights_before: rights_before,
            castling_rights_after: rights_after,
            en_passant_target,
            capture: captured.is_some(),
            base_notation,
            outcome,
        };

        self.position = next;
        self.side_to_move = opponent;
        self.castling_rights = rights_after;
        self.en_passant_target = en_passant_target;
        self.status = status_for(&legal);
        self.legal = legal;
        self.moves.push(record);
        self.move_num = self.last_index();

        let record = &self.moves[self.moves.len() - 1];
        debug!(ply = self.move_num, notation = %record.notation(), "applied move");
        if self.status.is_finished() {
            info!(status = ?self.status, "game over");
        }
        Ok(record)
    }

    /// Take back the last ply and resume from the position before it.
    ///
    /// The cursor returns to the new last ply. Refused after a timeout.
    pub fn undo(&mut self) -> Result<MoveRecord, ChessErrors> {
        if let GameStatus::TimedOut { .. } = self.status {
            warn!("rejected undo after timeout");
            return Err(ChessErrors::GameFinished);
        }
        let Some(undone) = self.moves.pop() else {
            return Err(ChessErrors::HistoryNavigation("no move to undo".to_owned()));
        };

        let (board, side, rights, en_passant_target) = match self.moves.last() {
            Some(prev) => (
                prev.board_after,
                prev.color.opposite(),
                prev.castling_rights_after,
                prev.en_passant_target,
            ),
            None => (
                self.setup.board,
                self.setup.side_to_move,
                self.setup.castling_rights,
                self.setup.en_passant_target,
            ),
        };

        let position = match Position::from_byte_board(&board) {
            Ok(position) => position,
            Err(e) => {
                self.moves.push(undone);
                return Err(e);
            }
        };
        let ctx = MoveContext {
            castling_rights: rights,
            en_passant_target,
        };
        self.legal = generate_legal_moves(&position, side, &ctx);
        self.status = status_for(&self.legal);
        self.position = position;
        self.side_to_move = side;
        self.castling_rights = rights;
        self.en_passant_target = en_passant_target;
        self.move_num = self.last_index();

        debug!(notation = %undone.notation(), ply = self.move_num, "undid move");
        Ok(undone)
    }

    /// Record that `loser`'s clock ran out. Only the side to move can lose on time.
    pub fn record_timeout(&mut self, loser: Color) -> Result<(), ChessErrors> {
        if self.status.is_finished() {
            return Err(ChessErrors::GameFinished);
        }
        if loser != self.side_to_move {
            return Err(ChessErrors::NotOnMove(loser));
        }
        self.status = GameStatus::TimedOut { loser };
        info!(loser = loser.name(), "game over on time");
        Ok(())
    }

    pub fn step_back(&mut self) -> Result<(), ChessErrors> {
        if self.move_num < 0 {
            return Err(ChessErrors::HistoryNavigation(
                "already at the initial position".to_owned(),
            ));
        }
        self.move_num -= 1;
        debug!(ply = self.move_num, "cursor moved");
        Ok(())
    }

    pub fn step_forward(&mut self) -> Result<(), ChessErrors> {
        if self.is_on_last_turn() {
            return Err(ChessErrors::HistoryNavigation(
                "already at the latest ply".to_owned(),
            ));
        }
        self.move_num += 1;
        debug!(ply = self.move_num, "cursor moved");
        Ok(())
    }

    pub fn jump_to_start(&mut self) {
        self.move_num = -1;
    }

    pub fn jump_to_end(&mut self) {
        self.move_num = self.last_index();
    }

    /// Move the cursor to `ply`, where -1 is the initial position.
    pub fn jump_to(&mut self, ply: isize) -> Result<(), ChessErrors> {
        self.check_ply(ply)?;
        self.move_num = ply;
        debug!(ply, "cursor moved");
        Ok(())
    }

    #[inline]
    pub fn is_on_last_turn(&self) -> bool {
        self.move_num == self.last_index()
    }

    fn last_index(&self) -> isize {
        self.moves.len() as isize - 1
    }

    fn check_ply(&self, ply: isize) -> Result<(), ChessErrors> {
        if ply < -1 || ply > self.last_index() {
            return Err(ChessErrors::HistoryNavigation(format!(
                "ply {ply} is outside -1..={}",
                self.last_index()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn move_num(&self) -> isize {
        self.move_num
    }

    #[inline]
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    #[inline]
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Position after the last ply, where new moves are made.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Whether `color` still holds the right to castle on `wing`.
    pub fn can_castle(&self, color: Color, wing: Wing) -> bool {
        self.castling_rights & castle_flag(color, wing) != 0
    }

    pub fn board_at(&self, ply: isize) -> Result<ByteBoard, ChessErrors> {
        self.check_ply(ply)?;
        Ok(match ply {
            -1 => self.setup.board,
            _ => self.moves[ply as usize].board_after,
        })
    }

    /// Board at the cursor.
    pub fn viewed_board(&self) -> ByteBoard {
        match self.move_num {
            -1 => self.setup.board,
            ply => self.moves[ply as usize].board_after,
        }
    }

    /// Legal destinations of the piece on `square` for the side to move.
    pub fn legal_destinations(&self, square: Square) -> Destinations {
        if self.status.is_finished() {
            return Destinations::EMPTY;
        }
        self.legal.destinations(square)
    }

    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal
    }

    /// Every legal ply for the side to move, one request per promotion choice.
    pub fn legal_move_requests(&self) -> Vec<MoveRequest> {
        let mut requests = Vec::with_capacity(self.legal.ply_count());
        if self.status.is_finished() {
            return requests;
        }
        for (from, d) in self.legal.origins() {
            requests.extend(squares_in(d.standard).map(|to| MoveRequest::Standard { from, to }));
            requests.extend(squares_in(d.en_passant).map(|to| MoveRequest::EnPassant { from, to }));
            for to in squares_in(d.promotion) {
                requests.extend(
                    PieceKind::PROMOTION_CHOICES
                        .iter()
                        .map(|&kind| MoveRequest::Promotion { from, to, kind }),
                );
            }
            requests.extend(squares_in(d.castle).map(|to| {
                if col_of(to) == 6 {
                    MoveRequest::CastleKingSide
                } else {
                    MoveRequest::CastleQueenSide
                }
            }));
        }
        requests
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_check(&self) -> bool {
        self.legal.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.status, GameStatus::Checkmate { .. })
    }

    pub fn is_stalemate(&self) -> bool {
        self.status == GameStatus::Stalemate
    }

    /// PGN result token for the current status.
    pub fn result_token(&self) -> &'static str {
        match self.status {
            GameStatus::InProgress => "*",
            GameStatus::Checkmate { winner: Color::White }
            | GameStatus::TimedOut { loser: Color::Black } => "1-0",
            GameStatus::Checkmate { winner: Color::Black }
            | GameStatus::TimedOut { loser: Color::White } => "0-1",
            GameStatus::Stalemate => "1/2-1/2",
        }
    }

    /// Origin and destination of the ply at the cursor, for highlighting.
    pub fn highlight_squares(&self) -> Option<(Square, Square)> {
        usize::try_from(self.move_num)
            .ok()
            .map(|ply| (self.moves[ply].from, self.moves[ply].to))
    }

    /// Summed piece values on the tail position, `(white, black)`.
    pub fn material_balance(&self) -> (u32, u32) {
        (
            self.position.material(Color::White),
            self.position.material(Color::Black),
        )
    }

    /// FEN of the tail position.
    pub fn fen(&self) -> String {
        generate_fen(
            &self.position.to_byte_board(),
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
        )
    }

    /// FEN of the position at the viewing cursor.
    pub fn viewed_fen(&self) -> String {
        self.fen_for_ply(self.move_num)
    }

    fn fen_for_ply(&self, ply: isize) -> String {
        match ply {
            -1 => self.setup_fen(),
            _ => {
                let record = &self.moves[ply as usize];
                generate_fen(
                    &record.board_after,
                    record.color.opposite(),
                    record.castling_rights_after,
                    record.en_passant_target,
                )
            }
        }
    }

    pub fn fen_at(&self, ply: isize) -> Result<String, ChessErrors> {
        self.check_ply(ply)?;
        Ok(self.fen_for_ply(ply))
    }

    fn setup_fen(&self) -> String {
        generate_fen(
            &self.setup.board,
            self.setup.side_to_move,
            self.setup.castling_rights,
            self.setup.en_passant_target,
        )
    }

    /// PGN with default headers and the given result token.
    pub fn pgn(&self, result: &str) -> String {
        self.pgn_with_headers(&PgnHeaders::default(), result)
    }

    pub fn pgn_with_headers(&self, headers: &PgnHeaders, result: &str) -> String {
        let setup_fen = self.setup_fen();
        let custom_setup = (setup_fen != STARTING_POSITION_FEN).then_some(setup_fen.as_str());
        let notations: Vec<String> = self.moves.iter().map(MoveRecord::notation).collect();
        write_pgn(
            headers,
            custom_setup,
            self.setup.side_to_move,
            &notations,
            result,
        )
    }
}

fn status_for(legal: &LegalMoves) -> GameStatus {
    match (legal.is_check(), legal.has_any()) {
        (true, false) => GameStatus::Checkmate {
            winner: legal.color().opposite(),
        },
        (false, false) => GameStatus::Stalemate,
        _ => GameStatus::InProgress,
    }
}
