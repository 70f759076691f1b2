//! Leaf-node counting through the public apply/undo API.
//!
//! Used to validate the move rules against published node counts.

use crate::chess_errors::ChessErrors;
use crate::game_state::game_history::GameHistory;
use crate::game_state::move_record::{MoveKind, MoveOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count only; the last ply is counted from the legal table without
/// being applied.
pub fn perft_nodes(game: &mut GameHistory, depth: u8) -> Result<u64, ChessErrors> {
    match depth {
        0 => Ok(1),
        1 => Ok(game.legal_move_requests().len() as u64),
        _ => {
            let mut nodes = 0u64;
            for request in game.legal_move_requests() {
                game.apply(request)?;
                nodes += perft_nodes(game, depth - 1)?;
                game.undo()?;
            }
            Ok(nodes)
        }
    }
}

/// Leaf count with per-leaf move statistics. Every leaf ply is applied.
pub fn perft(game: &mut GameHistory, depth: u8) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for request in game.legal_move_requests() {
        let record = game.apply(request)?;
        let leaf = leaf_counts(record.kind, record.capture, record.outcome);
        if depth == 1 {
            total.merge(leaf);
        } else {
            total.merge(perft(game, depth - 1)?);
        }
        game.undo()?;
    }

    Ok(total)
}

fn leaf_counts(kind: MoveKind, capture: bool, outcome: MoveOutcome) -> PerftCounts {
    PerftCounts {
        nodes: 1,
        captures: capture as u64,
        en_passant: (kind == MoveKind::EnPassant) as u64,
        castles: kind.castle_wing().is_some() as u64,
        promotions: matches!(kind, MoveKind::Promotion(_)) as u64,
        checks: matches!(outcome, MoveOutcome::Check | MoveOutcome::Checkmate) as u64,
        checkmates: (outcome == MoveOutcome::Checkmate) as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_nodes, PerftCounts};
    use crate::game_state::game_history::GameHistory;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ -";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -";

    fn nodes(fen: &str, depth: u8) -> u64 {
        let mut game = GameHistory::from_fen(fen).expect("perft FEN should parse");
        perft_nodes(&mut game, depth).expect("perft should run")
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameHistory::new();
        let counts = perft(&mut game, 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn starting_position_node_counts() {
        let mut game = GameHistory::new();
        assert_eq!(perft_nodes(&mut game, 1).expect("perft should run"), 20);
        assert_eq!(perft_nodes(&mut game, 2).expect("perft should run"), 400);
        assert_eq!(perft_nodes(&mut game, 3).expect("perft should run"), 8902);
        assert!(game.moves().is_empty());
    }

    #[test]
    fn starting_position_depth_three_statistics() {
        let mut game = GameHistory::new();
        let counts = perft(&mut game, 3).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                checks: 12,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn kiwipete_exercises_castling_and_en_passant() {
        let mut game = GameHistory::from_fen(KIWIPETE).expect("perft FEN should parse");
        let counts = perft(&mut game, 2).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
        assert_eq!(nodes(KIWIPETE, 1), 48);
    }

    #[test]
    fn rook_and_pawn_endgame_with_horizontal_pins() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        assert_eq!(nodes(POSITION_3, 3), 2812);
    }

    #[test]
    fn promotions_and_checks_from_black() {
        assert_eq!(nodes(POSITION_4, 1), 6);
        assert_eq!(nodes(POSITION_4, 2), 264);
    }

    #[test]
    fn promotion_captures_on_the_back_rank() {
        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1486);
    }
}
