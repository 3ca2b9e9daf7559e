//! Core value types shared by every subsystem.
//!
//! Squares are `u8` indices with h1 = 0, g1 = 1, ... a1 = 7, h2 = 8, ...
//! a8 = 63. Shifting a square bit left by one moves it toward the a-file and
//! shifting left by eight moves it one rank north.

use std::fmt;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices in the order search expands them.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub const fn fen_char(self, color: Color) -> char {
        let lower = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => lower.to_ascii_uppercase(),
            Color::Black => lower,
        }
    }

    pub const fn from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((color, kind))
    }
}

/// Board square index (`0..=63`, h1 = 0, a8 = 63).
pub type Square = u8;

/// Compact castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const ALL_CASTLING_RIGHTS: CastlingRights = 0b1111;

/// Square for a file (`0` = a) and rank (`0` = first rank).
#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    rank * 8 + (7 - file)
}

/// File of a square, `0` = a-file.
#[inline]
pub const fn file_of(square: Square) -> u8 {
    7 - square % 8
}

/// Rank of a square, `0` = first rank.
#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

/// Square seen from the other side of the board (a1 <-> a8).
#[inline]
pub const fn mirror_vertical(square: Square) -> Square {
    square ^ 56
}

/// A fully described move as produced by legal move generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
    pub promoting_to: Option<PieceKind>,
}

impl ChessMove {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            is_capture: false,
            promoting_to: None,
        }
    }

    pub const fn with_capture(mut self, is_capture: bool) -> Self {
        self.is_capture = is_capture;
        self
    }

    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promoting_to = Some(kind);
        self
    }

    /// Same origin, destination, and promotion choice.
    pub fn same_squares(&self, other: &ChessMove) -> bool {
        self.from == other.from && self.to == other.to && self.promoting_to == other.promoting_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_squares_follow_h1_zero_layout() {
        assert_eq!(square_at(7, 0), 0); // h1
        assert_eq!(square_at(0, 0), 7); // a1
        assert_eq!(square_at(7, 7), 56); // h8
        assert_eq!(square_at(0, 7), 63); // a8
        assert_eq!(square_at(4, 0), 3); // e1
    }

    #[test]
    fn file_and_rank_invert_square_at() {
        for square in 0u8..64 {
            assert_eq!(square_at(file_of(square), rank_of(square)), square);
        }
    }

    #[test]
    fn mirror_swaps_first_and_last_rank() {
        assert_eq!(mirror_vertical(3), 59);
        assert_eq!(mirror_vertical(59), 3);
    }

    #[test]
    fn fen_chars_round_trip_through_piece_kinds() {
        for kind in PieceKind::ALL {
            for color in Color::ALL {
                let ch = kind.fen_char(color);
                assert_eq!(PieceKind::from_fen_char(ch), Some((color, kind)));
            }
        }
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }

    #[test]
    fn only_minor_and_major_pieces_are_promotion_choices() {
        assert!(!PieceKind::Pawn.is_promotion_choice());
        assert!(!PieceKind::King.is_promotion_choice());
        assert!(PieceKind::PROMOTIONS
            .iter()
            .all(|kind| kind.is_promotion_choice()));
    }
}
