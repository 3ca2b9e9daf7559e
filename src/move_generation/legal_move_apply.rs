//! In-place move application and its exact inverse.
//!
//! `apply_move` mutates the model and returns a `MoveResult` holding every
//! field it overwrote. `undo_move` consumes that record and restores the
//! prior position bit for bit.

use tracing::trace;

use crate::errors::ChessErrors;
use crate::game_state::bitboard::squares_adjacent;
use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_rules::{castling_lane_for, castling_rights_after, promotion_rank};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::MoveResult;

pub fn apply_move(
    model: &mut BoardModel,
    from: Square,
    to: Square,
) -> Result<MoveResult, ChessErrors> {
    if from > 63 || to > 63 {
        return Err(ChessErrors::InvalidMove {
            square: from.max(to),
            reason: "square index out of range",
        });
    }

    let (mover, moved_piece) = model.piece_on(from).ok_or(ChessErrors::InvalidMove {
        square: from,
        reason: "no piece on origin square",
    })?;
    if from == to || model.piece_of_color_on(mover, to).is_some() {
        return Err(ChessErrors::InvalidMove {
            square: to,
            reason: "destination holds a piece of the moving side",
        });
    }
    let enemy = mover.opposite();

    let mut result = MoveResult {
        from,
        to,
        mover,
        moved_piece,
        captured_piece: None,
        captured_square: None,
        is_en_passant: false,
        is_castling: false,
        is_promotion: false,
        promoted_to: None,
        prev_turn: model.turn,
        prev_castling_rights: model.castling_rights,
        prev_en_passant_target: model.en_passant_target,
        prev_halfmove_clock: model.halfmove_clock,
        prev_fullmove_number: model.fullmove_number,
    };

    // Captures, including the pawn taken en passant behind the target square.
    if let Some(captured_square) = en_passant_capture_square(model, mover, moved_piece, from, to) {
        model.remove_piece(enemy, PieceKind::Pawn, captured_square);
        result.captured_piece = Some(PieceKind::Pawn);
        result.captured_square = Some(captured_square);
        result.is_en_passant = true;
    } else if let Some(captured) = model.piece_of_color_on(enemy, to) {
        model.remove_piece(enemy, captured, to);
        result.captured_piece = Some(captured);
        result.captured_square = Some(to);
    }

    model.remove_piece(mover, moved_piece, from);
    model.put_piece(mover, moved_piece, to);

    if moved_piece == PieceKind::King {
        if let Some(lane) = castling_lane_for(from, to)
            .filter(|lane| lane.color == mover)
            .filter(|lane| model.bitboard(mover, PieceKind::Rook).contains(lane.rook_from))
        {
            model.remove_piece(mover, PieceKind::Rook, lane.rook_from);
            model.put_piece(mover, PieceKind::Rook, lane.rook_to);
            result.is_castling = true;
        }
    }

    model.castling_rights = castling_rights_after(model.castling_rights, from, to);

    model.en_passant_target = if moved_piece == PieceKind::Pawn
        && from.abs_diff(to) == 16
        && enemy_pawn_beside(model, enemy, to)
    {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || result.is_capture() {
        model.halfmove_clock = 0;
    } else {
        model.halfmove_clock = model.halfmove_clock.saturating_add(1);
    }
    match mover {
        Color::Black => model.fullmove_number = model.fullmove_number.saturating_add(1),
        Color::White if model.fullmove_number == 0 => model.fullmove_number = 1,
        Color::White => {}
    }

    result.is_promotion = moved_piece == PieceKind::Pawn && rank_of(to) == promotion_rank(mover);
    model.turn = enemy;

    trace!(from, to, piece = ?moved_piece, capture = ?result.captured_piece, "applied move");
    Ok(result)
}

/// Replace the pawn on `square` with `kind`.
pub fn apply_promotion(
    model: &mut BoardModel,
    square: Square,
    kind: PieceKind,
) -> Result<(), ChessErrors> {
    if !kind.is_promotion_choice() {
        return Err(ChessErrors::InvalidMove {
            square,
            reason: "pawns promote to knight, bishop, rook, or queen",
        });
    }

    let (color, piece) = model.piece_on(square).ok_or(ChessErrors::InvalidMove {
        square,
        reason: "no piece to promote",
    })?;
    if piece != PieceKind::Pawn || rank_of(square) != promotion_rank(color) {
        return Err(ChessErrors::InvalidMove {
            square,
            reason: "only a pawn on its last rank can promote",
        });
    }

    model.remove_piece(color, PieceKind::Pawn, square);
    model.put_piece(color, kind, square);
    Ok(())
}

/// Restore the position `result` was produced from.
pub fn undo_move(model: &mut BoardModel, result: &MoveResult) {
    let mover = result.mover;
    let piece_on_destination = result.promoted_to.unwrap_or(result.moved_piece);

    model.remove_piece(mover, piece_on_destination, result.to);
    model.put_piece(mover, result.moved_piece, result.from);

    if let (Some(captured), Some(square)) = (result.captured_piece, result.captured_square) {
        model.put_piece(mover.opposite(), captured, square);
    }

    if result.is_castling {
        if let Some(lane) = castling_lane_for(result.from, result.to) {
            model.remove_piece(mover, PieceKind::Rook, lane.rook_to);
            model.put_piece(mover, PieceKind::Rook, lane.rook_from);
        }
    }

    model.turn = result.prev_turn;
    model.castling_rights = result.prev_castling_rights;
    model.en_passant_target = result.prev_en_passant_target;
    model.halfmove_clock = result.prev_halfmove_clock;
    model.fullmove_number = result.prev_fullmove_number;
}

/// Square of the pawn removed when `from -> to` is an en passant capture.
pub(crate) fn en_passant_capture_square(
    model: &BoardModel,
    mover: Color,
    moved_piece: PieceKind,
    from: Square,
    to: Square,
) -> Option<Square> {
    if moved_piece != PieceKind::Pawn
        || model.en_passant_target != Some(to)
        || file_of(from) == file_of(to)
    {
        return None;
    }

    let behind = match mover {
        Color::White => to.checked_sub(8)?,
        Color::Black => to.checked_add(8).filter(|&sq| sq < 64)?,
    };
    model
        .bitboard(mover.opposite(), PieceKind::Pawn)
        .contains(behind)
        .then_some(behind)
}

fn enemy_pawn_beside(model: &BoardModel, enemy: Color, landing: Square) -> bool {
    model
        .bitboard(enemy, PieceKind::Pawn)
        .squares()
        .any(|pawn| rank_of(pawn) == rank_of(landing) && squares_adjacent(pawn, landing))
}
