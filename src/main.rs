use std::io::{self, BufRead, Write};

use chesslite::chess_errors::ChessErrors;
use chesslite::game_state::chess_types::squares_in;
use chesslite::game_state::game_history::GameHistory;
use chesslite::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use chesslite::utils::long_algebraic::long_algebraic_to_move_request;
use chesslite::utils::render_game_state::render_game_state;
use tracing_subscriber::EnvFilter;

const HELP: &str = "commands: <move e.g. e2e4 / e7e8q>, undo, back, forward, start, end, \
goto N, moves SQ, fen, pgn, board, help, quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut game = match std::env::args().nth(1) {
        Some(fen) => match GameHistory::from_fen(&fen) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        },
        None => GameHistory::new(),
    };

    println!("{}", render_game_state(&game));
    println!("{HELP}");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command == "quit" || command == "exit" {
            break;
        }

        match run_command(&mut game, command) {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => println!("{}", render_game_state(&game)),
            Err(e) => println!("error: {e}"),
        }
        io::stdout().flush().ok();
    }
}

/// Run one command. `Ok(None)` means the board should be redrawn.
fn run_command(game: &mut GameHistory, command: &str) -> Result<Option<String>, ChessErrors> {
    let mut parts = command.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (verb, arg) {
        ("help", _) => Ok(Some(HELP.to_owned())),
        ("board", _) => Ok(None),
        ("undo", _) => game.undo().map(|_| None),
        ("back", _) => game.step_back().map(|_| None),
        ("forward", _) => game.step_forward().map(|_| None),
        ("start", _) => {
            game.jump_to_start();
            Ok(None)
        }
        ("end", _) => {
            game.jump_to_end();
            Ok(None)
        }
        ("goto", Some(ply)) => {
            let ply = ply.parse::<isize>().map_err(|_| {
                ChessErrors::HistoryNavigation(format!("not a ply number: {ply}"))
            })?;
            game.jump_to(ply).map(|_| None)
        }
        ("fen", _) => Ok(Some(game.viewed_fen())),
        ("pgn", _) => Ok(Some(game.pgn(game.result_token()))),
        ("moves", Some(square)) => {
            let from = algebraic_to_square(square)?;
            let d = game.legal_destinations(from);
            let list = |mask: u64| {
                squares_in(mask)
                    .map(square_to_algebraic)
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            Ok(Some(format!(
                "standard: {}\nen passant: {}\npromotion: {}\ncastle: {}",
                list(d.standard),
                list(d.en_passant),
                list(d.promotion),
                list(d.castle)
            )))
        }
        (text, None) => {
            let request = long_algebraic_to_move_request(text, game)?;
            let notation = game.apply(request)?.notation();
            Ok(Some(format!("{notation}\n{}", render_game_state(game))))
        }
        _ => Ok(Some(HELP.to_owned())),
    }
}
