//! Attack and check detection.
//!
//! Attacks are found by casting every piece pattern outward from the target
//! square and intersecting with the attacker's pieces of that kind: a knight
//! on a square a knight-jump away attacks it, a rook or queen reachable by a
//! rook ray attacks it, and so on.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::*;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::sliding_moves::{bishop_targets, rook_targets};

/// Per-piece-kind patterns cast outward from `square` as if a `defender`
/// piece stood there, indexed by `PieceKind::index()`.
///
/// Intersecting entry `k` with the opponent's `k` pieces yields the
/// opponent pieces of that kind attacking `square`.
pub fn checking_moves(model: &BoardModel, square: Square, defender: Color) -> [Bitboard; 6] {
    let own = model.occupancy(defender);
    let enemy = model.occupancy(defender.opposite());
    let diagonal = bishop_targets(square, own, enemy);
    let straight = rook_targets(square, own, enemy);

    let mut patterns = [Bitboard::EMPTY; 6];
    patterns[PieceKind::Pawn.index()] = pawn_attacks(defender, square);
    patterns[PieceKind::Knight.index()] = knight_attacks(square);
    patterns[PieceKind::Bishop.index()] = diagonal;
    patterns[PieceKind::Rook.index()] = straight;
    patterns[PieceKind::Queen.index()] = diagonal | straight;
    patterns[PieceKind::King.index()] = king_attacks(square);
    patterns
}

/// Squares holding `attacker_color` pieces that attack `square`.
pub fn attackers_of(model: &BoardModel, square: Square, attacker_color: Color) -> Bitboard {
    let patterns = checking_moves(model, square, attacker_color.opposite());
    PieceKind::ALL
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, kind| {
            acc | (patterns[kind.index()] & model.bitboard(attacker_color, kind))
        })
}

#[inline]
pub fn is_square_attacked(model: &BoardModel, square: Square, attacker_color: Color) -> bool {
    !attackers_of(model, square, attacker_color).is_empty()
}

/// True when the `color` king is attacked. A side without a king is never
/// in check.
#[inline]
pub fn is_check(model: &BoardModel, color: Color) -> bool {
    let Some(king_sq) = model.king_square(color) else {
        return false;
    };
    is_square_attacked(model, king_sq, color.opposite())
}
