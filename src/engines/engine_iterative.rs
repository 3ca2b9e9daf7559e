use std::time::Duration;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::ChessErrors;
use crate::game_state::chess_board::ChessBoard;
use crate::game_state::chess_types::Color;
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::iterative_deepening::{ScoredMove, SearchEngine, SearchStats};
use crate::search::search_config::EngineConfig;

/// Alpha-beta search over material and piece-square scoring.
pub struct IterativeEngine {
    search: SearchEngine<PieceSquareScorer>,
}

impl IterativeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            search: SearchEngine::new(PieceSquareScorer, config),
        }
    }

    pub fn find_deepening_optimal_move(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        timeout: Duration,
    ) -> Result<ScoredMove, ChessErrors> {
        self.search.find_deepening_optimal_move(board, color, timeout)
    }

    pub fn find_best_move(
        &mut self,
        board: &mut ChessBoard,
        color: Color,
        depth: u8,
    ) -> Result<ScoredMove, ChessErrors> {
        self.search.find_best_move(board, color, depth)
    }

    pub fn stats(&self) -> SearchStats {
        self.search.stats()
    }

    pub fn config(&self) -> &EngineConfig {
        self.search.config()
    }
}

impl Default for IterativeEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        "Iterative"
    }

    fn new_game(&mut self) {
        self.search.new_game();
    }

    fn choose_move(
        &mut self,
        board: &mut ChessBoard,
        params: &GoParams,
    ) -> Result<EngineOutput, ChessErrors> {
        let color = board.turn();
        let searched = match (params.depth, params.movetime_ms) {
            (Some(depth), _) => self.find_best_move(board, color, depth),
            (None, Some(ms)) => {
                self.find_deepening_optimal_move(board, color, Duration::from_millis(ms))
            }
            (None, None) => {
                let timeout = self.config().default_timeout();
                self.find_deepening_optimal_move(board, color, timeout)
            }
        };

        let mut out = EngineOutput::default();
        let scored = match searched {
            Ok(scored) => scored,
            Err(ChessErrors::NoLegalMoves(_)) => {
                out.info_lines.push("iterative_engine no_legal_moves".to_owned());
                return Ok(out);
            }
            Err(err) => return Err(err),
        };

        let stats = self.stats();
        out.best_move = Some(scored.chess_move);
        out.score = Some(scored.score);
        out.info_lines.push(format!(
            "depth {} score cp {} nodes {} qnodes {} time {}",
            scored.depth,
            scored.score,
            stats.nodes,
            stats.quiescence_nodes,
            stats.elapsed.as_millis()
        ));
        Ok(out)
    }
}
