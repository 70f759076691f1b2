//! PGN export.
//!
//! Writes the Seven Tag Roster followed by numbered movetext, breaking the
//! line every ten plies and ending with the game result token.

use chrono::Local;

use crate::game_state::chess_types::Color;

/// Header values for a PGN export. `Result` is supplied separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    /// `YYYY.MM.DD`, with `??` for unknown parts.
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        Self {
            event: "ChessLite Practice".to_owned(),
            site: "ChessLite".to_owned(),
            date: Local::now().format("%Y.%m.%d").to_string(),
            round: "-".to_owned(),
            white: "Player1".to_owned(),
            black: "Player2".to_owned(),
        }
    }
}

const PLIES_PER_LINE: usize = 10;

/// Serialize a finished or in-progress game.
///
/// `setup_fen` is written as `SetUp`/`FEN` tags when the game did not start
/// from the standard position. `first_mover` decides move numbering.
pub fn write_pgn(
    headers: &PgnHeaders,
    setup_fen: Option<&str>,
    first_mover: Color,
    notations: &[String],
    result: &str,
) -> String {
    let result = normalize_result(result);
    let mut out = String::new();

    let tags = [
        ("Event", headers.event.as_str()),
        ("Site", headers.site.as_str()),
        ("Date", headers.date.as_str()),
        ("Round", headers.round.as_str()),
        ("White", headers.white.as_str()),
        ("Black", headers.black.as_str()),
        ("Result", result),
    ];
    for (key, value) in tags {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    if let Some(fen) = setup_fen {
        out.push_str("[SetUp \"1\"]\n");
        out.push_str(&format!("[FEN \"{}\"]\n", escape_pgn_value(fen)));
    }
    out.push('\n');

    let offset = match first_mover {
        Color::White => 0,
        Color::Black => 1,
    };

    let mut lines = Vec::<String>::new();
    for (chunk_idx, chunk) in notations.chunks(PLIES_PER_LINE).enumerate() {
        let mut parts = Vec::<String>::with_capacity(chunk.len() + PLIES_PER_LINE / 2);
        for (i, notation) in chunk.iter().enumerate() {
            let ply = chunk_idx * PLIES_PER_LINE + i;
            let numbered = ply + offset;
            if numbered % 2 == 0 {
                parts.push(format!("{}.", numbered / 2 + 1));
            } else if ply == 0 {
                parts.push(format!("{}...", numbered / 2 + 1));
            }
            parts.push(notation.clone());
        }
        lines.push(parts.join(" "));
    }

    match lines.last_mut() {
        Some(last) => {
            last.push(' ');
            last.push_str(result);
        }
        None => lines.push(result.to_owned()),
    }

    out.push_str(&lines.join("\n"));
    out.push('\n');
    out
}

pub fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
