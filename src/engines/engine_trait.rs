//! Common interface over move-choosing strategies.
//!
//! Self-play and benches drive engines through this trait so a search engine
//! and a random mover can be paired against each other.

use crate::errors::ChessErrors;
use crate::game_state::chess_board::ChessBoard;
use crate::game_state::chess_types::ChessMove;
use crate::search::board_scoring::Score;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Fixed search depth. Takes precedence over `movetime_ms`.
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` only when the side to move has no legal moves.
    pub best_move: Option<ChessMove>,
    pub score: Option<Score>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. The board is left as it was given.
    fn choose_move(
        &mut self,
        board: &mut ChessBoard,
        params: &GoParams,
    ) -> Result<EngineOutput, ChessErrors>;
}
