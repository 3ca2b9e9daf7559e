//! 64-bit square sets.
//!
//! Bit `n` stands for square `n` in the h1 = 0 layout. The newtype keeps
//! shift and mask arithmetic explicit at call sites while still compiling to
//! plain `u64` operations.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::str::FromStr;

use crate::errors::ChessErrors;
use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);
pub const FILE_A: Bitboard = Bitboard(0x8080_8080_8080_8080);
pub const FILE_H: Bitboard = Bitboard(0x0101_0101_0101_0101);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    #[inline]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Single-square set. Panics on an index outside `0..64`.
    #[inline]
    pub const fn from_square(square: Square) -> Self {
        assert!(square < 64, "square index out of range");
        Self(1u64 << square)
    }

    /// Shift toward higher indices; amounts of 64 or more yield the empty set.
    #[inline]
    pub const fn shift_left(self, amount: u32) -> Self {
        if amount >= 64 {
            Self::EMPTY
        } else {
            Self(self.0 << amount)
        }
    }

    #[inline]
    pub const fn shift_right(self, amount: u32) -> Self {
        if amount >= 64 {
            Self::EMPTY
        } else {
            Self(self.0 >> amount)
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_single_bit(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    /// Index of the lowest set bit. Only meaningful for a non-empty set.
    #[inline]
    pub const fn bit_index(self) -> Square {
        debug_assert!(self.0 != 0, "bit_index of an empty bitboard");
        self.0.trailing_zeros() as Square
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        assert!(square < 64, "square index out of range");
        self.0 & (1u64 << square) != 0
    }

    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Ascending iterator over the squares in the set.
    #[inline]
    pub const fn squares(self) -> SquareIter {
        SquareIter(self.0)
    }

    /// Parses `0b...` or `0x...` literals, ignoring `_` separators.
    pub fn from_literal(text: &str) -> Result<Self, ChessErrors> {
        let trimmed = text.trim();
        let (radix, digits) = match trimmed.get(..2) {
            Some("0b") | Some("0B") => (2, &trimmed[2..]),
            Some("0x") | Some("0X") => (16, &trimmed[2..]),
            _ => {
                return Err(ChessErrors::InvalidBitboardLiteral(format!(
                    "expected 0b or 0x prefix in '{trimmed}'"
                )))
            }
        };

        let cleaned: String = digits.chars().filter(|&ch| ch != '_').collect();
        if cleaned.is_empty() {
            return Err(ChessErrors::InvalidBitboardLiteral(format!(
                "no digits in '{trimmed}'"
            )));
        }

        u64::from_str_radix(&cleaned, radix)
            .map(Bitboard)
            .map_err(|err| ChessErrors::InvalidBitboardLiteral(format!("'{trimmed}': {err}")))
    }
}

impl FromStr for Bitboard {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bitboard::from_literal(s)
    }
}

impl From<u64> for Bitboard {
    fn from(bits: u64) -> Self {
        Bitboard(bits)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

/// 8x8 grid with rank 8 on top, `1` for members and `.` otherwise.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let mark = if self.contains(square_at(file, rank)) {
                    '1'
                } else {
                    '.'
                };
                write!(f, "{mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SquareIter {}

/// True when `a` and `b` touch, including diagonally.
#[inline]
pub const fn squares_adjacent(a: Square, b: Square) -> bool {
    let file_gap = file_of(a).abs_diff(file_of(b));
    let rank_gap = rank_of(a).abs_diff(rank_of(b));
    a != b && file_gap <= 1 && rank_gap <= 1
}
