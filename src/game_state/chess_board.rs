//! Stateful board: a `BoardModel` plus the stack of applied moves.
//!
//! `ChessBoard` is what callers and search work with. Moves are applied in
//! place and undone strictly in reverse order; `MoveGuard` ties one applied
//! move to a scope and undoes it on drop, so early returns during search
//! cannot leave the board mutated.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::errors::ChessErrors;
use crate::game_state::bitboard::Bitboard;
use crate::game_state::board_model::BoardModel;
use crate::game_state::board_view::{board_view, BoardView};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::MoveResult;
use crate::move_generation::legal_move_apply::{apply_move, apply_promotion, undo_move};
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::{
    all_legal_moves, is_checkmate, is_stalemate, legal_move_indices,
};
use crate::move_generation::legal_move_shared::pseudo_legal_targets;
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    model: BoardModel,
    history: Vec<MoveResult>,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new_game()
    }
}

impl ChessBoard {
    pub fn new(fen: &str) -> Result<Self, ChessErrors> {
        BoardModel::from_fen(fen).map(Self::from_model)
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::new(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_model(model: BoardModel) -> Self {
        Self {
            model,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn model(&self) -> &BoardModel {
        &self.model
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.model.turn
    }

    /// Current position as FEN.
    pub fn save(&self) -> String {
        self.model.to_fen()
    }

    pub fn position_key(&self) -> String {
        self.model.position_key()
    }

    pub fn to_board_view(&self) -> BoardView {
        board_view(&self.model)
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        self.model.piece_on(square)
    }

    pub fn pseudo_legal_targets(&self, from: Square) -> Bitboard {
        pseudo_legal_targets(&self.model, from)
    }

    /// Legal destinations for the piece on `from`, whichever side owns it.
    pub fn legal_move_indices(&self, from: Square) -> Vec<Square> {
        legal_move_indices(&self.model, from)
    }

    pub fn all_legal_moves(&self, color: Color) -> Vec<ChessMove> {
        all_legal_moves(&self.model, color)
    }

    pub fn is_check(&self, color: Color) -> bool {
        is_check(&self.model, color)
    }

    pub fn is_checkmate(&self) -> bool {
        is_checkmate(&self.model)
    }

    pub fn is_stalemate(&self) -> bool {
        is_stalemate(&self.model)
    }

    /// The last applied move put a pawn on its last rank and no piece has
    /// been chosen yet.
    pub fn is_awaiting_promotion(&self) -> bool {
        self.history
            .last()
            .is_some_and(|last| last.is_promotion && last.promoted_to.is_none())
    }

    /// Apply `from -> to` for the side to move, without a legality check.
    /// The returned record is also kept on the history stack.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveResult, ChessErrors> {
        if let Some((color, _)) = self.model.piece_on(from) {
            if color != self.model.turn {
                return Err(ChessErrors::InvalidMove {
                    square: from,
                    reason: "piece does not belong to side to move",
                });
            }
        }
        let result = apply_move(&mut self.model, from, to)?;
        self.history.push(result.clone());
        Ok(result)
    }

    /// Choose the piece for a pawn that just reached its last rank.
    pub fn apply_promotion(&mut self, square: Square, kind: PieceKind) -> Result<(), ChessErrors> {
        let Some(last) = self
            .history
            .last_mut()
            .filter(|last| last.to == square && last.is_promotion && last.promoted_to.is_none())
        else {
            return Err(ChessErrors::InvalidMove {
                square,
                reason: "promotion must follow the pawn move onto the last rank",
            });
        };
        apply_promotion(&mut self.model, square, kind)?;
        last.promoted_to = Some(kind);
        Ok(())
    }

    /// Apply a generated move, including its promotion choice.
    pub fn make_move(&mut self, mv: &ChessMove) -> Result<MoveResult, ChessErrors> {
        let mut result = self.apply_move(mv.from, mv.to)?;
        match (mv.promoting_to, result.is_promotion) {
            (Some(kind), true) => {
                if let Err(err) = self.apply_promotion(mv.to, kind) {
                    self.undo_move();
                    return Err(err);
                }
                result.promoted_to = Some(kind);
            }
            (Some(_), false) => {
                self.undo_move();
                return Err(ChessErrors::InvalidMove {
                    square: mv.to,
                    reason: "promotion requested for a move that does not promote",
                });
            }
            (None, _) => {}
        }
        Ok(result)
    }

    /// Apply `mv` for the lifetime of the returned guard.
    pub fn play(&mut self, mv: &ChessMove) -> Result<MoveGuard<'_>, ChessErrors> {
        self.make_move(mv)?;
        let depth = self.history.len();
        Ok(MoveGuard { board: self, depth })
    }

    /// Revert the most recent move.
    ///
    /// Panics when nothing has been applied; an unbalanced undo means the
    /// caller's bookkeeping is broken.
    pub fn undo_move(&mut self) -> MoveResult {
        let Some(result) = self.history.pop() else {
            panic!("undo_move called with no applied moves");
        };
        undo_move(&mut self.model, &result);
        result
    }

    /// Revert `result`, which must be the most recent move.
    pub fn undo(&mut self, result: &MoveResult) {
        assert_eq!(
            self.history.last(),
            Some(result),
            "moves must be undone in reverse order"
        );
        self.undo_move();
    }

    pub fn history(&self) -> &[MoveResult] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveResult> {
        self.history.last()
    }

    /// Copy of this position with `color` to move and no history. The en
    /// passant target is dropped because it belonged to the other side.
    pub fn with_turn(&self, color: Color) -> ChessBoard {
        let mut model = self.model;
        if model.turn != color {
            model.turn = color;
            model.en_passant_target = None;
        }
        Self::from_model(model)
    }
}

impl FromStr for ChessBoard {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChessBoard::new(s)
    }
}

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(&self.model))
    }
}

/// One applied move, undone when the guard drops.
pub struct MoveGuard<'a> {
    board: &'a mut ChessBoard,
    depth: usize,
}

impl MoveGuard<'_> {
    /// Record of the guarded move.
    pub fn result(&self) -> &MoveResult {
        &self.board.history[self.depth - 1]
    }
}

impl Deref for MoveGuard<'_> {
    type Target = ChessBoard;

    fn deref(&self) -> &ChessBoard {
        &*self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut ChessBoard {
        &mut *self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            assert_eq!(
                self.board.history.len(),
                self.depth,
                "moves applied under a guard must be undone before it drops"
            );
        }
        self.board.undo_move();
    }
}

#[cfg(test)]
mod tests {
    use super::ChessBoard;
    use crate::errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    fn board(fen: &str) -> ChessBoard {
        ChessBoard::new(fen).expect("fixture FEN should parse")
    }

    #[test]
    fn new_game_round_trips_fen() {
        assert_eq!(ChessBoard::new_game().save(), STARTING_POSITION_FEN);
    }

    #[test]
    fn queenside_castle_updates_fen() {
        let mut b = board("rb3kbr/pppp1ppp/3n1q2/4p3/8/P2NNP2/BPQPPBPP/R3K2R w KQk - 0 0");
        b.apply_move(3, 5).expect("castle should apply");
        assert_eq!(
            b.save(),
            "rb3kbr/pppp1ppp/3n1q2/4p3/8/P2NNP2/BPQPPBPP/2KR3R b k - 1 1"
        );
    }

    #[test]
    fn black_kingside_castle_updates_fen() {
        let mut b = board("rnbqk2r/pppp1ppp/3bpn2/8/4P3/5PPP/PPPP4/RNBQKBNR b KQkq - 0 0");
        b.apply_move(59, 57).expect("castle should apply");
        assert_eq!(
            b.save(),
            "rnbq1rk1/pppp1ppp/3bpn2/8/4P3/5PPP/PPPP4/RNBQKBNR w KQ - 1 1"
        );
    }

    #[test]
    fn single_step_pawn_push_sets_no_target() {
        let mut b = board("rnbqkbnr/pppp1ppp/8/4p3/8/P7/1PPPPPPP/RNBQKBNR w KQkq - 0 1");
        b.apply_move(8, 16).expect("h2h3 should apply");
        assert_eq!(
            b.save(),
            "rnbqkbnr/pppp1ppp/8/4p3/8/P6P/1PPPPPP1/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn undo_restores_every_field() {
        let mut b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0");
        let start = b.clone();
        for mv in b.all_legal_moves(Color::White) {
            let result = b.make_move(&mv).expect("legal move should apply");
            b.undo(&result);
            assert_eq!(b, start, "undo of {mv:?} changed the board");
        }
    }

    #[test]
    fn guard_undoes_on_drop() {
        let mut b = ChessBoard::new_game();
        let mv = b.all_legal_moves(Color::White)[0];
        {
            let guard = b.play(&mv).expect("legal move should apply");
            assert_eq!(guard.turn(), Color::Black);
            assert_eq!(guard.result().from, mv.from);
        }
        assert_eq!(b.save(), STARTING_POSITION_FEN);
        assert!(b.history().is_empty());
    }

    #[test]
    fn promotion_flow_marks_and_clears_pending_state() {
        let mut b = board("7p/1P6/8/2p5/4P3/8/P1P5/8 w - - 0 0");
        let result = b.apply_move(54, 62).expect("b7b8 should apply");
        assert!(result.is_promotion);
        assert!(b.is_awaiting_promotion());
        b.apply_promotion(62, PieceKind::Knight)
            .expect("promotion should apply");
        assert!(!b.is_awaiting_promotion());
        assert_eq!(b.piece_on(62), Some((Color::White, PieceKind::Knight)));

        let undone = b.undo_move();
        assert_eq!(undone.promoted_to, Some(PieceKind::Knight));
        assert_eq!(b.save(), "7p/1P6/8/2p5/4P3/8/P1P5/8 w - - 0 0");
    }

    #[test]
    fn promotion_without_pending_pawn_is_rejected() {
        let mut b = ChessBoard::new_game();
        assert!(matches!(
            b.apply_promotion(62, PieceKind::Queen),
            Err(ChessErrors::InvalidMove { square: 62, .. })
        ));
    }

    #[test]
    fn make_move_rejects_stray_promotion_and_rolls_back() {
        let mut b = ChessBoard::new_game();
        let mv = ChessMove::new(11, 19).with_promotion(PieceKind::Queen);
        assert!(b.make_move(&mv).is_err());
        assert_eq!(b.save(), STARTING_POSITION_FEN);
    }

    #[test]
    #[should_panic(expected = "no applied moves")]
    fn undo_without_history_panics() {
        ChessBoard::new_game().undo_move();
    }

    #[test]
    #[should_panic(expected = "reverse order")]
    fn undoing_the_same_move_twice_panics() {
        let mut b = ChessBoard::new_game();
        b.apply_move(11, 27).expect("e2e4 should apply");
        let reply = b.apply_move(51, 35).expect("e7e5 should apply");
        b.undo(&reply);
        b.undo(&reply);
    }

    #[test]
    #[should_panic(expected = "reverse order")]
    fn out_of_order_undo_panics() {
        let mut b = ChessBoard::new_game();
        let first = b.apply_move(11, 27).expect("e2e4 should apply");
        b.apply_move(51, 35).expect("e7e5 should apply");
        b.undo(&first);
    }

    #[test]
    #[should_panic(expected = "undone before it drops")]
    fn guard_drop_with_unbalanced_history_panics() {
        let mut b = ChessBoard::new_game();
        let mut guard = b.play(&ChessMove::new(11, 27)).expect("e2e4 should apply");
        guard.apply_move(51, 35).expect("e7e5 should apply");
    }

    #[test]
    fn moving_the_waiting_side_is_rejected() {
        let mut b = ChessBoard::new_game();
        assert_eq!(
            b.apply_move(51, 35),
            Err(ChessErrors::InvalidMove {
                square: 51,
                reason: "piece does not belong to side to move",
            })
        );
        assert_eq!(b.save(), STARTING_POSITION_FEN);
        assert!(b.history().is_empty());

        b.apply_move(11, 27).expect("e2e4 should apply");
        assert!(matches!(
            b.apply_move(12, 20),
            Err(ChessErrors::InvalidMove { square: 12, .. })
        ));
        assert_eq!(b.turn(), Color::Black);
    }

    #[test]
    fn with_turn_flips_side_and_clears_target() {
        let b = board("rnbqkbnr/pp1p1ppp/2p5/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 - 0 0");
        let flipped = b.with_turn(Color::Black);
        assert_eq!(flipped.turn(), Color::Black);
        assert_eq!(flipped.model().en_passant_target, None);
        assert_eq!(b.with_turn(Color::White).model(), b.model());
    }
}
