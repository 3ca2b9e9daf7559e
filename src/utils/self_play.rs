//! Engine-vs-engine playouts that hunt for apply/undo corruption.
//!
//! Every ply the chosen move is applied, undone and the FEN compared against
//! the position before, then the move is replayed for real. A seeded random
//! opening scatters games across different middlegames.

use tracing::{debug, info, warn};

use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::ChessErrors;
use crate::game_state::chess_board::ChessBoard;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{ChessMove, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfPlayOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    MaxPlies,
}

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub start_fen: String,
    /// Plies played after the opening.
    pub max_plies: u16,
    pub opening_plies: u8,
    pub seed: u64,
    pub go_params: GoParams,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            start_fen: STARTING_POSITION_FEN.to_owned(),
            max_plies: 200,
            opening_plies: 4,
            seed: 0,
            go_params: GoParams::default(),
        }
    }
}

/// A move whose undo did not restore the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptionRecord {
    pub ply: usize,
    pub chess_move: ChessMove,
    pub fen_before: String,
    pub fen_after_undo: String,
}

#[derive(Debug, Clone)]
pub struct SelfPlayReport {
    pub outcome: SelfPlayOutcome,
    pub final_fen: String,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub corruptions: Vec<CorruptionRecord>,
}

impl SelfPlayReport {
    pub fn is_clean(&self) -> bool {
        self.corruptions.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "outcome={:?} opening_plies={} plies={} corruptions={} final_fen={}",
            self.outcome,
            self.opening_moves.len(),
            self.played_moves.len(),
            self.corruptions.len(),
            self.final_fen
        )
    }
}

/// Play `white` against `black` from `config.start_fen`, checking every move
/// for apply/undo symmetry along the way.
pub fn find_board_corruption(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    config: &SelfPlayConfig,
) -> Result<SelfPlayReport, ChessErrors> {
    let mut board = ChessBoard::new(&config.start_fen)?;
    let mut corruptions = Vec::new();
    white.new_game();
    black.new_game();

    let mut opener = RandomEngine::new(config.seed);
    let mut opening_moves = Vec::new();
    for _ in 0..config.opening_plies {
        let Some(mv) = opener.choose_move(&mut board, &GoParams::default())?.best_move else {
            break;
        };
        checked_play(&mut board, mv, &mut corruptions)?;
        opening_moves.push(mv.to_string());
    }

    let mut played_moves = Vec::new();
    let mut outcome = SelfPlayOutcome::MaxPlies;
    for _ in 0..config.max_plies {
        let mover = board.turn();
        let legal_moves = board.all_legal_moves(mover);
        if legal_moves.is_empty() {
            outcome = if board.is_check(mover) {
                match mover {
                    Color::White => SelfPlayOutcome::BlackWinCheckmate,
                    Color::Black => SelfPlayOutcome::WhiteWinCheckmate,
                }
            } else {
                SelfPlayOutcome::DrawStalemate
            };
            break;
        }

        let engine: &mut dyn Engine = match mover {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let out = engine.choose_move(&mut board, &config.go_params)?;
        let chosen = out.best_move.unwrap_or(legal_moves[0]);
        if !legal_moves.contains(&chosen) {
            return Err(ChessErrors::InvalidMove {
                square: chosen.from,
                reason: "engine returned an illegal move",
            });
        }

        debug!(
            ply = board.history().len(),
            engine = engine.name(),
            fen = %board.save(),
            chess_move = %chosen,
            "self-play move"
        );
        checked_play(&mut board, chosen, &mut corruptions)?;
        played_moves.push(chosen.to_string());
    }

    let report = SelfPlayReport {
        outcome,
        final_fen: board.save(),
        opening_moves,
        played_moves,
        corruptions,
    };
    info!(summary = %report.summary(), "self-play finished");
    Ok(report)
}

/// Apply, undo and compare, then apply `mv` for good.
fn checked_play(
    board: &mut ChessBoard,
    mv: ChessMove,
    corruptions: &mut Vec<CorruptionRecord>,
) -> Result<(), ChessErrors> {
    let fen_before = board.save();
    let result = board.make_move(&mv)?;
    board.undo(&result);
    let fen_after_undo = board.save();
    if fen_before != fen_after_undo {
        warn!(%fen_before, %fen_after_undo, chess_move = %mv, "undo did not restore position");
        corruptions.push(CorruptionRecord {
            ply: board.history().len(),
            chess_move: mv,
            fen_before,
            fen_after_undo,
        });
    }
    board.make_move(&mv)?;
    Ok(())
}
