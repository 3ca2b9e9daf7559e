use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bitboard_chess::game_state::chess_board::ChessBoard;
use bitboard_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use bitboard_chess::search::board_scoring::PieceSquareScorer;
use bitboard_chess::search::iterative_deepening::SearchEngine;
use bitboard_chess::search::search_config::EngineConfig;

const POSITIONS: &[(&str, &str)] = &[
    ("startpos", STARTING_POSITION_FEN),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
    ),
    ("rook_endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn bench_fixed_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_fixed_depth");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for &(name, fen) in POSITIONS {
        for depth in 1..=3u8 {
            let mut board = ChessBoard::new(fen).expect("benchmark FEN should parse");
            let color = board.turn();
            group.bench_with_input(
                BenchmarkId::new(name, format!("d{depth}")),
                &depth,
                |b, &depth| {
                    b.iter(|| {
                        // Fresh table per iteration so runs stay comparable.
                        let mut engine =
                            SearchEngine::new(PieceSquareScorer, EngineConfig::default());
                        let best = engine
                            .find_best_move(black_box(&mut board), color, black_box(depth))
                            .expect("benchmark position has legal moves");
                        black_box(best.score)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_fixed_depth);
criterion_main!(search_benches);
