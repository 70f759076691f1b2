use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use chesslite::game_state::game_history::GameHistory;
use chesslite::move_generation::legal_move_generator::generate_legal_moves;
use chesslite::moves::piece_rules::MoveContext;
use chesslite::utils::fen_parser::parse_fen;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    },
    BenchCase {
        name: "pinned_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
    },
];

fn bench_legal_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_table");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let parsed = parse_fen(case.fen).expect("benchmark FEN should parse");
        let ctx = MoveContext {
            castling_rights: parsed.castling_rights,
            en_passant_target: parsed.en_passant_target,
        };

        group.bench_with_input(BenchmarkId::from_parameter(case.name), &parsed, |b, parsed| {
            b.iter(|| {
                let legal =
                    generate_legal_moves(black_box(&parsed.position), parsed.side_to_move, &ctx);
                black_box(legal.ply_count())
            });
        });
    }

    group.finish();
}

fn bench_apply_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_undo");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let mut game = GameHistory::from_fen(case.fen).expect("benchmark FEN should parse");
        let requests = game.legal_move_requests();

        group.bench_function(BenchmarkId::from_parameter(case.name), |b| {
            b.iter(|| {
                for request in &requests {
                    game.apply(black_box(*request)).expect("listed move should apply");
                    game.undo().expect("undo should succeed");
                }
            });
        });
    }

    group.finish();
}

criterion_group!(legal_move_benches, bench_legal_table, bench_apply_undo);
criterion_main!(legal_move_benches);
