//! Plays the search engine against itself and reports apply/undo corruption.
//!
//! Usage:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --plies 120 --seed 7`
//!
//! Search limits come from the `CHESS_ENGINE_*` environment variables and
//! log verbosity from `RUST_LOG`.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use bitboard_chess::engines::engine_iterative::IterativeEngine;
use bitboard_chess::search::search_config::EngineConfig;
use bitboard_chess::utils::self_play::{find_board_corruption, SelfPlayConfig};

fn parse_arg<T: std::str::FromStr>(flag: &str, default: T) -> T {
    let args: Vec<String> = std::env::args().collect();
    args.windows(2)
        .find(|pair| pair[0] == flag)
        .and_then(|pair| pair[1].parse().ok())
        .unwrap_or(default)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let engine_config = EngineConfig::from_env();
    let config = SelfPlayConfig {
        max_plies: parse_arg("--plies", 200),
        opening_plies: parse_arg("--opening", 4),
        seed: parse_arg("--seed", 0),
        ..SelfPlayConfig::default()
    };

    let mut white = IterativeEngine::new(engine_config);
    let mut black = IterativeEngine::new(engine_config);
    match find_board_corruption(&mut white, &mut black, &config) {
        Ok(report) => {
            println!("{}", report.summary());
            for record in &report.corruptions {
                println!(
                    "corrupted at ply {}: {} before={} after_undo={}",
                    record.ply, record.chess_move, record.fen_before, record.fen_after_undo
                );
            }
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("self-play failed: {err}");
            ExitCode::FAILURE
        }
    }
}
