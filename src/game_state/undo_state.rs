use crate::game_state::chess_types::*;

/// Record of one applied move: enough to describe it and to restore the
/// position it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub from: Square,
    pub to: Square,
    pub mover: Color,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,
    /// Differs from `to` only for en passant.
    pub captured_square: Option<Square>,
    pub is_en_passant: bool,
    pub is_castling: bool,
    /// A pawn reached its last rank and awaits a promotion choice.
    pub is_promotion: bool,
    pub promoted_to: Option<PieceKind>,

    pub prev_turn: Color,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Square>,
    pub prev_halfmove_clock: u32,
    pub prev_fullmove_number: u32,
}

impl MoveResult {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    pub fn as_chess_move(&self) -> ChessMove {
        ChessMove {
            from: self.from,
            to: self.to,
            is_capture: self.is_capture(),
            promoting_to: self.promoted_to,
        }
    }
}
