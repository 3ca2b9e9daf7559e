//! Full legal move generation pipeline.
//!
//! Takes pseudo-legal destinations per piece, plays each candidate on a
//! scratch copy of the model, and keeps only those that leave the mover's
//! king safe. Listing expands promotions and puts captures first.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_shared::{is_capture_move, pseudo_legal_targets};

/// Subset of `targets` the piece on `from` can reach without leaving its
/// own king attacked.
pub fn filter_moves_for_check(model: &BoardModel, from: Square, targets: Bitboard) -> Bitboard {
    let Some((color, _)) = model.piece_on(from) else {
        return Bitboard::EMPTY;
    };

    let mut scratch = *model;
    let mut legal = Bitboard::EMPTY;
    for to in targets.squares() {
        let Ok(result) = apply_move(&mut scratch, from, to) else {
            continue;
        };
        if !is_check(&scratch, color) {
            legal |= Bitboard::from_square(to);
        }
        undo_move(&mut scratch, &result);
    }

    debug_assert_eq!(&scratch, model, "legality probe must restore the model");
    legal
}

/// Legal destinations for the piece on `from`.
pub fn legal_targets(model: &BoardModel, from: Square) -> Bitboard {
    filter_moves_for_check(model, from, pseudo_legal_targets(model, from))
}

/// Legal destinations for the piece on `from`, ascending.
pub fn legal_move_indices(model: &BoardModel, from: Square) -> Vec<Square> {
    legal_targets(model, from).squares().collect()
}

/// Every legal move for `color`, captures first.
///
/// A pawn move onto its last rank appears once per promotion choice.
pub fn all_legal_moves(model: &BoardModel, color: Color) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(48);

    for from in model.occupancy(color).squares() {
        let is_pawn = model.bitboard(color, PieceKind::Pawn).contains(from);
        for to in legal_targets(model, from).squares() {
            let base = ChessMove::new(from, to).with_capture(is_capture_move(model, color, from, to));
            if is_pawn && rank_of(to) == promotion_rank(color) {
                moves.extend(
                    PieceKind::PROMOTIONS
                        .into_iter()
                        .map(|kind| base.with_promotion(kind)),
                );
            } else {
                moves.push(base);
            }
        }
    }

    moves.sort_by_key(|mv| !mv.is_capture);
    moves
}

/// Side to move is in check with no legal reply.
pub fn is_checkmate(model: &BoardModel) -> bool {
    is_check(model, model.turn) && all_legal_moves(model, model.turn).is_empty()
}

/// Side to move is not in check but has no legal reply.
pub fn is_stalemate(model: &BoardModel) -> bool {
    !is_check(model, model.turn) && all_legal_moves(model, model.turn).is_empty()
}
