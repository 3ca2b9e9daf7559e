//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type returned by parsing, move
//! application, and search entry points. Parse-style variants describe bad
//! caller input and are meant to be surfaced to users. `InvalidMove` signals
//! a caller defect: legal-move lists never produce such a call, so it is a
//! defensive check rather than a recoverable runtime condition.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// Malformed Forsyth-Edwards Notation: missing field, wrong rank length,
    /// unknown character, or an unparseable counter.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// An algebraic square such as `e4` could not be interpreted.
    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),

    /// A `0b`/`0x` bitboard literal could not be parsed into 64 bits.
    #[error("invalid bitboard literal: {0}")]
    InvalidBitboardLiteral(String),

    /// A long algebraic move such as `e7e8q` could not be interpreted.
    #[error("invalid long algebraic move: {0}")]
    InvalidLongAlgebraic(String),

    /// Apply or promotion referencing an empty or wrong square.
    #[error("invalid move at square {square}: {reason}")]
    InvalidMove { square: Square, reason: &'static str },

    /// Search was asked to pick a move for a side with nothing to play.
    #[error("no legal moves for {0}")]
    NoLegalMoves(Color),
}
