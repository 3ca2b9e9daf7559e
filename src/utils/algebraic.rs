//! Square and bitboard conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and the h1 = 0
//! square layout used by the board model and FEN/long-algebraic helpers.

use crate::errors::ChessErrors;
use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

/// Convert algebraic notation (for example: "e4") to a one-hot bitboard.
#[inline]
pub fn algebraic_to_bitboard(square: &str) -> Result<Bitboard, ChessErrors> {
    algebraic_to_square(square).map(Bitboard::from_square)
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, ChessErrors> {
    if square > 63 {
        return Err(ChessErrors::InvalidSquare(square.to_string()));
    }

    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));

    Ok(format!("{file_char}{rank_char}"))
}

/// Convert a one-hot bitboard to algebraic notation.
#[inline]
pub fn bitboard_to_algebraic(bitboard: Bitboard) -> Result<String, ChessErrors> {
    if !bitboard.is_single_bit() {
        return Err(ChessErrors::InvalidSquare(format!(
            "bitboard with {} set bits",
            bitboard.count()
        )));
    }

    square_to_algebraic(bitboard.bit_index())
}
