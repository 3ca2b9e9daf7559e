//! Piece-kind dispatch shared by the legality filter and move listing.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::en_passant_capture_square;
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::pawn_targets;
use crate::moves::sliding_moves::{bishop_targets, queen_targets, rook_targets};

/// Destinations for the piece on `from` ignoring whether its own king is
/// left in check. Empty when `from` is empty.
pub fn pseudo_legal_targets(model: &BoardModel, from: Square) -> Bitboard {
    let Some((color, kind)) = model.piece_on(from) else {
        return Bitboard::EMPTY;
    };
    let own = model.occupancy(color);
    let enemy = model.occupancy(color.opposite());

    match kind {
        PieceKind::Pawn => pawn_targets(from, color, own, enemy, model.en_passant_target),
        PieceKind::Knight => knight_targets(from, own),
        PieceKind::Bishop => bishop_targets(from, own, enemy),
        PieceKind::Rook => rook_targets(from, own, enemy),
        PieceKind::Queen => queen_targets(from, own, enemy),
        PieceKind::King => king_targets(model, from, color),
    }
}

/// Whether moving the `color` piece from `from` to `to` takes something.
#[inline]
pub fn is_capture_move(model: &BoardModel, color: Color, from: Square, to: Square) -> bool {
    if model.occupancy(color.opposite()).contains(to) {
        return true;
    }
    model
        .piece_of_color_on(color, from)
        .and_then(|kind| en_passant_capture_square(model, color, kind, from, to))
        .is_some()
}
