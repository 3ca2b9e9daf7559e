//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Scores are centipawns; positive favours White.

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::*;

pub type Score = i32;

pub const CENTIPAWNS_PER_PAWN: Score = 100;

pub trait BoardScorer: Send + Sync {
    /// Score from White's point of view.
    fn score(&self, model: &BoardModel) -> Score;
}

/// Piece value in whole pawns. The king is priceless and scores nothing.
#[inline]
pub const fn piece_value(piece: PieceKind) -> Score {
    match piece {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// Material of `color` in centipawns.
pub fn material_score(model: &BoardModel, color: Color) -> Score {
    PieceKind::ALL
        .into_iter()
        .map(|piece| {
            model.bitboard(color, piece).count() as Score * piece_value(piece) * CENTIPAWNS_PER_PAWN
        })
        .sum()
}

/// Piece-square bonus of `color`, with Black reading the tables flipped
/// top to bottom.
pub fn positional_score(model: &BoardModel, color: Color) -> Score {
    let mut score = 0;
    for piece in PieceKind::ALL {
        let table = &PIECE_SQUARE_TABLES[piece.index()];
        for square in model.bitboard(color, piece).squares() {
            let oriented = match color {
                Color::White => square,
                Color::Black => mirror_vertical(square),
            };
            score += table[63 - oriented as usize];
        }
    }
    score
}

#[inline]
pub fn score_of_color(model: &BoardModel, color: Color) -> Score {
    material_score(model, color) + positional_score(model, color)
}

/// White's score minus Black's.
#[inline]
pub fn overall_delta(model: &BoardModel) -> Score {
    score_of_color(model, Color::White) - score_of_color(model, Color::Black)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, model: &BoardModel) -> Score {
        material_score(model, Color::White) - material_score(model, Color::Black)
    }
}

/// Material plus piece-square tables. The default scorer for search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl BoardScorer for PieceSquareScorer {
    fn score(&self, model: &BoardModel) -> Score {
        overall_delta(model)
    }
}

// Tables are laid out a8..h8 first, h1 last, as seen by White.
#[rustfmt::skip]
const PIECE_SQUARE_TABLES: [[Score; 64]; 6] = [
    // Pawn
    [
          0,   0,   0,   0,   0,   0,   0,   0,
         50,  50,  50,  50,  50,  50,  50,  50,
         10,  10,  20,  30,  30,  20,  10,  10,
          5,   5,  10,  25,  25,  10,   5,   5,
          0,   0,   0,  20,  20,   0,   0,   0,
          5,  -5, -10,   0,   0, -10,  -5,   5,
          5,  10,  10, -20, -20,  10,  10,   5,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
        -50, -40, -30, -30, -30, -30, -40, -50,
        -40, -20,   0,   0,   0,   0, -20, -40,
        -30,   0,  10,  15,  15,  10,   0, -30,
        -30,   5,  15,  20,  20,  15,   5, -30,
        -30,   0,  15,  20,  20,  15,   0, -30,
        -30,   5,  10,  15,  15,  10,   5, -30,
        -40, -20,   0,   5,   5,   0, -20, -40,
        -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Bishop
    [
        -20, -10, -10, -10, -10, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   0,   5,  10,  10,   5,   0, -10,
        -10,   5,   5,  10,  10,   5,   5, -10,
        -10,   0,  10,  10,  10,  10,   0, -10,
        -10,  10,  10,  10,  10,  10,  10, -10,
        -10,   5,   0,   0,   0,   0,   5, -10,
        -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Rook
    [
          0,   0,   0,   5,   5,   0,   0,   0,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
          5,  10,  10,  10,  10,  10,  10,   5,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Queen
    [
        -20, -10, -10,  -5,  -5, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   5,   5,   5,   5,   5,   0, -10,
          0,   0,   5,   5,   5,   5,   0,  -5,
         -5,   0,   5,   5,   5,   5,   0,  -5,
        -10,   0,   5,   5,   5,   5,   0, -10,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -20, -10, -10,  -5,  -5, -10, -10, -20,
    ],
    // King
    [
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -20, -30, -30, -40, -40, -30, -30, -20,
        -10, -20, -20, -20, -20, -20, -20, -10,
         20,  20,   0,   0,   0,   0,  20,  20,
         20,  30,  10,   0,   0,  10,  30,  20,
    ],
];
