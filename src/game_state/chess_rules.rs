//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals: the standard starting
//! position, the named squares the rules refer to, and the four castling
//! lanes with the squares each one needs empty and unattacked.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{
    CastlingRights, Color, Square, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const H1: Square = 0;
pub const G1: Square = 1;
pub const F1: Square = 2;
pub const E1: Square = 3;
pub const D1: Square = 4;
pub const C1: Square = 5;
pub const B1: Square = 6;
pub const A1: Square = 7;
pub const H8: Square = 56;
pub const G8: Square = 57;
pub const F8: Square = 58;
pub const E8: Square = 59;
pub const D8: Square = 60;
pub const C8: Square = 61;
pub const B8: Square = 62;
pub const A8: Square = 63;

/// One castling option: where king and rook start and land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub color: Color,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook.
    pub must_be_empty: Bitboard,
    /// Squares the king crosses or lands on after leaving its home square.
    pub king_path: [Square; 2],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        right: CASTLE_WHITE_KINGSIDE,
        color: Color::White,
        king_from: E1,
        king_to: G1,
        rook_from: H1,
        rook_to: F1,
        must_be_empty: Bitboard::new((1 << F1) | (1 << G1)),
        king_path: [F1, G1],
    },
    CastlingLane {
        right: CASTLE_WHITE_QUEENSIDE,
        color: Color::White,
        king_from: E1,
        king_to: C1,
        rook_from: A1,
        rook_to: D1,
        must_be_empty: Bitboard::new((1 << D1) | (1 << C1) | (1 << B1)),
        king_path: [D1, C1],
    },
    CastlingLane {
        right: CASTLE_BLACK_KINGSIDE,
        color: Color::Black,
        king_from: E8,
        king_to: G8,
        rook_from: H8,
        rook_to: F8,
        must_be_empty: Bitboard::new((1 << F8) | (1 << G8)),
        king_path: [F8, G8],
    },
    CastlingLane {
        right: CASTLE_BLACK_QUEENSIDE,
        color: Color::Black,
        king_from: E8,
        king_to: C8,
        rook_from: A8,
        rook_to: D8,
        must_be_empty: Bitboard::new((1 << D8) | (1 << C8) | (1 << B8)),
        king_path: [D8, C8],
    },
];

/// Lane matching a king move, if that move is a castling move.
pub fn castling_lane_for(king_from: Square, king_to: Square) -> Option<&'static CastlingLane> {
    CASTLING_LANES
        .iter()
        .find(|lane| lane.king_from == king_from && lane.king_to == king_to)
}

/// Rights left after a move touching `from` and `to`.
///
/// Leaving a king or rook home square, or landing on a rook home square,
/// gives up every right tied to that square.
pub fn castling_rights_after(rights: CastlingRights, from: Square, to: Square) -> CastlingRights {
    CASTLING_LANES.iter().fold(rights, |remaining, lane| {
        let touched = from == lane.king_from || from == lane.rook_from || to == lane.rook_from;
        if touched {
            remaining & !lane.right
        } else {
            remaining
        }
    })
}

/// Rank a pawn of `color` promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Rank a pawn of `color` may double-push from.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::ALL_CASTLING_RIGHTS;

    #[test]
    fn king_move_clears_both_rights_for_that_color() {
        let rights = castling_rights_after(ALL_CASTLING_RIGHTS, E1, E1 + 8);
        assert_eq!(rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn capturing_on_a_rook_corner_clears_that_right() {
        let rights = castling_rights_after(ALL_CASTLING_RIGHTS, 9, H1);
        assert_eq!(rights, ALL_CASTLING_RIGHTS & !CASTLE_WHITE_KINGSIDE);
        let rights = castling_rights_after(ALL_CASTLING_RIGHTS, 40, A8);
        assert_eq!(rights, ALL_CASTLING_RIGHTS & !CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn unrelated_moves_keep_rights() {
        assert_eq!(
            castling_rights_after(ALL_CASTLING_RIGHTS, 11, 27),
            ALL_CASTLING_RIGHTS
        );
    }

    #[test]
    fn lane_lookup_matches_only_castling_king_moves() {
        let lane = castling_lane_for(E8, C8).expect("e8c8 is a castling move");
        assert_eq!(lane.rook_from, A8);
        assert_eq!(lane.rook_to, D8);
        assert!(castling_lane_for(E1, F1).is_none());
    }
}
