//! Uniform random legal-move engine.
//!
//! Used for diagnostics and to scatter self-play games across varied
//! positions. Seeded, so a given seed replays the same game.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::ChessErrors;
use crate::game_state::chess_board::ChessBoard;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(rand::random())
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(
        &mut self,
        board: &mut ChessBoard,
        params: &GoParams,
    ) -> Result<EngineOutput, ChessErrors> {
        let legal_moves = board.all_legal_moves(board.turn());

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("random_engine ignoring_depth {depth}"));
        }

        out.best_move = legal_moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::chess_board::ChessBoard;

    #[test]
    fn picks_a_legal_move() {
        let mut board = ChessBoard::new_game();
        let mut engine = RandomEngine::new(7);
        let out = engine
            .choose_move(&mut board, &GoParams::default())
            .expect("random engine should not fail");
        let mv = out.best_move.expect("start position has moves");
        assert!(board.all_legal_moves(board.turn()).contains(&mv));
        assert_eq!(out.score, None);
    }

    #[test]
    fn same_seed_same_choices() {
        let mut board = ChessBoard::new_game();
        let mut a = RandomEngine::new(42);
        let mut b = RandomEngine::new(42);
        for _ in 0..5 {
            let params = GoParams::default();
            let first = a.choose_move(&mut board, &params).expect("ok").best_move;
            let second = b.choose_move(&mut board, &params).expect("ok").best_move;
            assert_eq!(first, second);
        }
    }

    #[test]
    fn no_move_when_mated() {
        let mut board = ChessBoard::new("2kr4/1pp2p1p/5p2/4p3/4b3/4q3/7P/3K4 w - - 2 27")
            .expect("fixture FEN should parse");
        let out = RandomEngine::new(1)
            .choose_move(&mut board, &GoParams::default())
            .expect("random engine should not fail");
        assert_eq!(out.best_move, None);
    }
}
